use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::store::EventStore;

/// Dependencies every handler sees, injected at router construction.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { store, auth }
    }
}
