use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::auth::Authenticated;
use crate::utils::response::success;

pub mod events;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "campus-events-api",
    };

    success(payload, "Health check successful").into_response()
}

/// GET /auth: resolves the presented credential. The dashboard uses this
/// to decide whether a session is still good before rendering.
pub async fn current_user(Authenticated(user): Authenticated) -> Response {
    success(user, "Caller resolved").into_response()
}
