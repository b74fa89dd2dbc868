//! HTTP handlers for the REST API.
//!
//! Each handler parses its request, delegates to [`ListingService`] and lets
//! [`AppError`] render failures as `{ "error": ... }` bodies.
//!
//! [`ListingService`]: crate::service::ListingService

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};

use super::dto::{MessageResponse, SeedResponse, StatusResponse};
use super::error::AppError;
use super::state::AppState;
use crate::models::{timestamp, Listing, ListingPatch};
use crate::query::SearchParams;
use crate::service::ServiceError;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Homzy API is running!".to_string(),
        database: state.service.source_name().to_string(),
        timestamp: timestamp::format(&timestamp::now()),
    })
}

/// GET /api/properties
#[tracing::instrument(skip(state))]
pub async fn list_properties(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> HandlerResult<Vec<Listing>> {
    let Query(params) = params?;
    Ok(Json(state.service.search(&params).await?))
}

/// GET /api/properties/{id}
#[tracing::instrument(skip(state))]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Listing> {
    Ok(Json(state.service.get(&id).await?))
}

/// POST /api/properties
#[tracing::instrument(skip_all)]
pub async fn create_property(
    State(state): State<AppState>,
    body: Result<Json<Listing>, JsonRejection>,
) -> Result<(StatusCode, Json<Listing>), AppError> {
    let Json(listing) = body?;
    let created = state.service.create(listing).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/properties/{id}
///
/// Only the keys present in the body are changed.
#[tracing::instrument(skip(state, body))]
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> HandlerResult<Listing> {
    let Json(body) = body?;
    let patch = ListingPatch::from_json(body)
        .map_err(|e| ServiceError::InvalidBody(e.to_string()))?;
    Ok(Json(state.service.update(&id, &patch).await?))
}

/// DELETE /api/properties/{id}
#[tracing::instrument(skip(state))]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<MessageResponse> {
    state.service.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Property deleted successfully".to_string(),
    }))
}

/// POST /api/seed-data
#[tracing::instrument(skip(state))]
pub async fn seed_data(State(state): State<AppState>) -> HandlerResult<SeedResponse> {
    let outcome = state.service.seed().await?;
    Ok(Json(SeedResponse {
        message: outcome.message(),
        count: outcome.count(),
    }))
}
