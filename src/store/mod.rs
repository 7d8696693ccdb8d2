use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Event, NewEvent};
use crate::query::EventQuery;

pub mod memory;
pub mod postgres;

pub use memory::MemoryEventStore;
pub use postgres::PgEventStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

/// Persistence boundary for events. Handlers only ever see this trait, so
/// the Postgres store and the in-memory store are interchangeable.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Applies the query's filters and date bound, sorted ascending by
    /// `date.from`, capped by the query's limit when present.
    async fn find(&self, query: &EventQuery) -> Result<Vec<Event>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Event>, StoreError>;

    /// Persists a new event, assigning its id and timestamps.
    async fn insert(&self, event: NewEvent) -> Result<Event, StoreError>;

    /// Atomically flips the featured flag. Returns the updated event, or
    /// None when no event has that id.
    async fn toggle_featured(&self, id: Uuid) -> Result<Option<Event>, StoreError>;

    /// Deletes every event, then inserts the given fixtures. Not safe to
    /// run concurrently with other operations; callers must serialize.
    async fn reset(&self, fixtures: Vec<NewEvent>) -> Result<usize, StoreError>;
}
