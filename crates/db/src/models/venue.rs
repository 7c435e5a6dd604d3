//! Venue entity model and DTOs.
//!
//! Venues carry a Czech and an English display name. Both are mandatory;
//! a missing or `null` name deserializes to an empty string so that
//! [`validate`] can reject it with a validation error instead of a body
//! rejection.
//!
//! [`validate`]: CreateVenue::validate

use festival_core::error::CoreError;
use festival_core::types::{DbId, Timestamp};
use festival_core::venue::{validate_capacity, validate_names};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A row from the `venues` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venue {
    pub id: DbId,
    pub name_cs: String,
    pub name_en: String,
    pub capacity: Option<i32>,
    pub sort_order: i32,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new venue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateVenue {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name_cs: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name_en: String,
    pub capacity: Option<i32>,
    pub sort_order: Option<i32>,
}

impl CreateVenue {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_names(&self.name_cs, &self.name_en)?;
        validate_capacity(self.capacity)
    }
}

/// DTO for replacing a venue.
///
/// Every column is rewritten: an absent `capacity` clears it, an absent
/// `sort_order` resets it to the default, and `active` stays true unless
/// explicitly `false`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVenue {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name_cs: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name_en: String,
    pub capacity: Option<i32>,
    pub sort_order: Option<i32>,
    pub active: Option<bool>,
}

impl UpdateVenue {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_names(&self.name_cs, &self.name_en)?;
        validate_capacity(self.capacity)
    }
}
