//! Venue input rules shared by the repository and HTTP layers.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity label used in `CoreError::NotFound`.
pub const ENTITY: &str = "Venue";

/// Sort order applied when a create or update omits it.
pub const DEFAULT_SORT_ORDER: i32 = 0;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that both localized names are present and non-blank.
///
/// Applies to create and update alike; whitespace-only names are rejected.
pub fn validate_names(name_cs: &str, name_en: &str) -> Result<(), CoreError> {
    let missing: Vec<&str> = [("name_cs", name_cs), ("name_en", name_en)]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Missing required venue name(s): {}",
            missing.join(", ")
        )))
    }
}

/// Validate that a capacity, when given, is not negative.
pub fn validate_capacity(capacity: Option<i32>) -> Result<(), CoreError> {
    match capacity {
        Some(c) if c < 0 => Err(CoreError::Validation(format!(
            "Venue capacity must not be negative, got {c}"
        ))),
        _ => Ok(()),
    }
}

/// Resolve the `active` flag for a full update.
///
/// A venue stays active unless the caller explicitly sends `false`.
pub fn resolve_active(active: Option<bool>) -> bool {
    active != Some(false)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
