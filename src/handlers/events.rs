use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AdminOnly;
use crate::models::CreateEventRequest;
use crate::query::{EventQuery, ExploreParams, IndexParams};
use crate::seed::synthetic_events;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

/// GET /events/index: the homepage widget's bounded listing.
pub async fn list_index(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<Response, AppError> {
    let query = EventQuery::for_index(&params, Utc::now());
    let events = state.store.find(&query).await?;
    Ok(success(events, "Events retrieved").into_response())
}

/// GET /events: the explore page's unbounded listing.
pub async fn list_explore(
    State(state): State<AppState>,
    Query(params): Query<ExploreParams>,
) -> Result<Response, AppError> {
    let query = EventQuery::for_explore(&params, Utc::now());
    let events = state.store.find(&query).await?;
    Ok(success(events, "Events retrieved").into_response())
}

/// GET /events/:id: a malformed id is indistinguishable from a missing
/// record on this surface.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = match parse_id(&id) {
        Some(id) => state.store.get(id).await?,
        None => None,
    };

    match event {
        Some(event) => Ok(success(event, "Event retrieved").into_response()),
        None => Err(not_found()),
    }
}

/// POST /events: admin-only create; every violated field is reported
/// before the store is touched.
pub async fn create(
    AdminOnly(_caller): AdminOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Response, AppError> {
    let new_event = request.validate().map_err(AppError::Validation)?;
    let event = state.store.insert(new_event).await?;
    tracing::info!(event_id = %event.id, title = %event.title, "Event created");
    Ok(success(event, "Event created").into_response())
}

/// PUT /events/feature/:id: admin-only atomic flip of the featured flag.
pub async fn toggle_feature(
    AdminOnly(_caller): AdminOnly,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = match parse_id(&id) {
        Some(id) => state.store.toggle_featured(id).await?,
        None => None,
    };

    match event {
        Some(event) => {
            tracing::info!(event_id = %event.id, featured = event.featured, "Feature flag toggled");
            Ok(success(event, "Event updated").into_response())
        }
        None => Err(not_found()),
    }
}

#[derive(Serialize)]
struct SeedPayload {
    inserted: usize,
}

/// GET /events/test/generate-test-data: destructive reset + reseed. The
/// route is only mounted when test routes are enabled; see routes::create_routes.
pub async fn generate_test_data(State(state): State<AppState>) -> Result<Response, AppError> {
    tracing::warn!("Replacing ALL events with synthetic test data");

    let fixtures = synthetic_events(Utc::now());
    let inserted = state.store.reset(fixtures).await?;

    Ok(success(SeedPayload { inserted }, "Test data generated").into_response())
}

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

fn not_found() -> AppError {
    AppError::NotFound("Event not found".to_string())
}
