use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use campus_events_server::auth::TokenTable;
use campus_events_server::config::{Config, StoreBackend};
use campus_events_server::routes::create_routes;
use campus_events_server::state::AppState;
use campus_events_server::store::{EventStore, MemoryEventStore, PgEventStore};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let store: Arc<dyn EventStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await
                .expect("Failed to connect to database");

            tracing::info!("Successfully connected to database");

            sqlx::migrate!()
                .run(&pool)
                .await
                .expect("Failed to run migrations");

            tracing::info!("Migrations run successfully");

            Arc::new(PgEventStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory event store; data will not survive a restart");
            Arc::new(MemoryEventStore::default())
        }
    };

    let auth = Arc::new(TokenTable::from_spec(&config.api_tokens));
    let state = AppState::new(store, auth);

    let app: Router = create_routes(state, config.enable_test_routes);

    tracing::info!("🚀 Server running at http://{}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
