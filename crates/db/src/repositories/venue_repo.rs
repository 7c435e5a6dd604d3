//! Repository for the `venues` table.

use festival_core::types::DbId;
use festival_core::venue::{resolve_active, DEFAULT_SORT_ORDER};
use sqlx::PgPool;

use crate::models::venue::{CreateVenue, UpdateVenue, Venue};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name_cs, name_en, capacity, sort_order, active, created_at, updated_at";

/// Outcome of [`VenueRepo::delete`].
#[derive(Debug, Clone)]
pub enum VenueDeletion {
    /// The venue is referenced by screenings and was only marked inactive.
    Deactivated(Venue),
    /// The venue had no screenings and the row was removed.
    Deleted(Venue),
    /// No venue with the given id exists.
    NotFound,
}

/// Provides CRUD operations for venues.
pub struct VenueRepo;

impl VenueRepo {
    /// Insert a new venue, returning the created row.
    ///
    /// Callers validate names first; the table's CHECK constraints reject
    /// blank names as a backstop.
    pub async fn create(pool: &PgPool, input: &CreateVenue) -> Result<Venue, sqlx::Error> {
        let query = format!(
            "INSERT INTO venues (name_cs, name_en, capacity, sort_order) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(input.name_cs.trim())
            .bind(input.name_en.trim())
            .bind(input.capacity)
            .bind(input.sort_order.unwrap_or(DEFAULT_SORT_ORDER))
            .fetch_one(pool)
            .await
    }

    /// Find a venue by its internal ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM venues WHERE id = $1");
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List venues, optionally including inactive ones.
    ///
    /// Ordered by sort_order, then Czech name.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Venue>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM venues ORDER BY sort_order, name_cs")
        } else {
            format!("SELECT {COLUMNS} FROM venues WHERE active = true ORDER BY sort_order, name_cs")
        };
        sqlx::query_as::<_, Venue>(&query).fetch_all(pool).await
    }

    /// Replace all mutable columns of a venue.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVenue,
    ) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!(
            "UPDATE venues SET \
                name_cs = $2, \
                name_en = $3, \
                capacity = $4, \
                sort_order = $5, \
                active = $6, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .bind(input.name_cs.trim())
            .bind(input.name_en.trim())
            .bind(input.capacity)
            .bind(input.sort_order.unwrap_or(DEFAULT_SORT_ORDER))
            .bind(resolve_active(input.active))
            .fetch_optional(pool)
            .await
    }

    /// Number of screenings that reference the venue.
    pub async fn count_screenings(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM screenings WHERE venue_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Mark a venue inactive, returning the updated row.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!(
            "UPDATE venues SET active = false, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently remove a venue, returning the removed row.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!("DELETE FROM venues WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a venue, falling back to deactivation while screenings
    /// still reference it.
    ///
    /// A screening inserted between the count and the `DELETE` trips the
    /// foreign key; that case is also resolved by deactivating.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<VenueDeletion, sqlx::Error> {
        let screenings = Self::count_screenings(pool, id).await?;

        if screenings > 0 {
            tracing::debug!(venue_id = id, screenings, "Venue in use, deactivating");
            return Self::deactivate_in_use(pool, id).await;
        }

        match Self::hard_delete(pool, id).await {
            Ok(Some(venue)) => Ok(VenueDeletion::Deleted(venue)),
            Ok(None) => Ok(VenueDeletion::NotFound),
            Err(e) if is_foreign_key_violation(&e) => {
                tracing::debug!(venue_id = id, "Venue gained a screening, deactivating");
                Self::deactivate_in_use(pool, id).await
            }
            Err(e) => Err(e),
        }
    }

    async fn deactivate_in_use(pool: &PgPool, id: DbId) -> Result<VenueDeletion, sqlx::Error> {
        Ok(match Self::deactivate(pool, id).await? {
            Some(venue) => VenueDeletion::Deactivated(venue),
            None => VenueDeletion::NotFound,
        })
    }
}

/// Whether `err` is a PostgreSQL foreign key violation (SQLSTATE 23503).
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23503"),
        _ => false,
    }
}
