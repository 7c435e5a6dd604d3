//! Handlers for the `/venues` resource.
//!
//! Venues referenced by screenings are never removed: `DELETE` marks them
//! inactive instead and says so in the response.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use festival_core::error::CoreError;
use festival_core::types::DbId;
use festival_core::venue::ENTITY;
use festival_db::models::venue::{CreateVenue, UpdateVenue, Venue};
use festival_db::repositories::{VenueDeletion, VenueRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of a successful `DELETE /venues/{id}`.
#[derive(Debug, Serialize)]
pub struct VenueDeleteResponse {
    pub data: Venue,
    /// `true` when the venue was only deactivated.
    pub soft_deleted: bool,
    pub message: &'static str,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/venues?include_inactive=false
///
/// List active venues ordered by sort order, then Czech name.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let venues = VenueRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: venues }))
}

/// GET /api/v1/venues/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: venue }))
}

/// POST /api/v1/venues
///
/// Both `name_cs` and `name_en` are required.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateVenue>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let venue = VenueRepo::create(&state.pool, &input).await?;
    tracing::info!(venue_id = venue.id, "Venue created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: venue })))
}

/// PUT /api/v1/venues/{id}
///
/// Replace a venue. `active` stays true unless explicitly `false`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVenue>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let venue = VenueRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: venue }))
}

/// DELETE /api/v1/venues/{id}
///
/// Removes the venue, or deactivates it while screenings reference it.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let response = match VenueRepo::delete(&state.pool, id).await? {
        VenueDeletion::Deactivated(venue) => {
            tracing::info!(venue_id = id, "Venue in use by screenings, deactivated");
            VenueDeleteResponse {
                data: venue,
                soft_deleted: true,
                message: "Venue is used by screenings and was deactivated",
            }
        }
        VenueDeletion::Deleted(venue) => {
            tracing::info!(venue_id = id, "Venue deleted");
            VenueDeleteResponse {
                data: venue,
                soft_deleted: false,
                message: "Venue deleted",
            }
        }
        VenueDeletion::NotFound => return Err(not_found(id)),
    };
    Ok(Json(response))
}
