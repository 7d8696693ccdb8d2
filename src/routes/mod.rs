use axum::routing::{get, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, with_security_headers};
use crate::handlers::{self, events};
use crate::state::AppState;

/// Assembles the full HTTP surface. The destructive test-data route is only
/// registered when `enable_test_routes` is set; otherwise the path simply
/// does not exist.
pub fn create_routes(state: AppState, enable_test_routes: bool) -> Router {
    let mut event_routes = Router::new()
        .route("/", get(events::list_explore).post(events::create))
        .route("/index", get(events::list_index))
        .route("/feature/:id", put(events::toggle_feature))
        .route("/:id", get(events::get_by_id));

    if enable_test_routes {
        event_routes =
            event_routes.route("/test/generate-test-data", get(events::generate_test_data));
    }

    let router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/auth", get(handlers::current_user))
        .nest("/events", event_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer()),
        );

    with_security_headers(router)
}
