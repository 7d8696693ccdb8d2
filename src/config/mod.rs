use std::env;
use std::net::SocketAddr;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::with_security_headers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub store_backend: StoreBackend,
    pub enable_test_routes: bool,
    pub api_tokens: String,
}

impl Config {
    pub fn from_env() -> Self {
        let is_production = env::var("RUST_ENV")
            .map(|v| v.to_lowercase() == "production")
            .unwrap_or(false);

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/campus_events".to_string()),
            bind_addr: env::var("BIND_ADDR")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3001))),
            store_backend: match env::var("EVENT_STORE").as_deref() {
                Ok("memory") => StoreBackend::Memory,
                _ => StoreBackend::Postgres,
            },
            enable_test_routes: test_routes_enabled(
                env::var("ENABLE_TEST_ROUTES").ok().as_deref(),
                is_production,
            ),
            api_tokens: env::var("API_TOKENS").unwrap_or_default(),
        }
    }
}

/// The destructive test-data route only exists when explicitly requested,
/// and never in production.
fn test_routes_enabled(flag: Option<&str>, is_production: bool) -> bool {
    let requested = matches!(flag, Some("true") | Some("1"));
    if requested && is_production {
        tracing::warn!("Test routes requested but refused in production");
        return false;
    }
    requested
}
