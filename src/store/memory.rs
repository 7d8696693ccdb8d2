use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Event, NewEvent};
use crate::query::EventQuery;
use crate::store::{EventStore, StoreError};

/// Event store backed by process memory. Serves the test suite and the
/// `EVENT_STORE=memory` development mode; observable behavior matches the
/// Postgres store.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: RwLock<HashMap<Uuid, Event>>,
}

fn materialize(new: NewEvent) -> Event {
    let now = Utc::now();
    Event {
        id: Uuid::new_v4(),
        title: new.title,
        description: new.description,
        location: new.location,
        date: new.date,
        thumbnail_url: new.thumbnail_url,
        school: new.school,
        tags: new.tags,
        featured: new.featured,
        rsvp_link: new.rsvp_link,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn find(&self, query: &EventQuery) -> Result<Vec<Event>, StoreError> {
        let events = self.events.read().await;
        let mut matched: Vec<Event> = events
            .values()
            .filter(|event| query.matches(event))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.date.from.cmp(&b.date.from));
        if let Some(limit) = query.limit {
            matched.truncate(limit as usize);
        }
        Ok(matched)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn insert(&self, event: NewEvent) -> Result<Event, StoreError> {
        let event = materialize(event);
        self.events.write().await.insert(event.id, event.clone());
        Ok(event)
    }

    async fn toggle_featured(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        let mut events = self.events.write().await;
        Ok(events.get_mut(&id).map(|event| {
            event.featured = !event.featured;
            event.updated_at = Utc::now();
            event.clone()
        }))
    }

    async fn reset(&self, fixtures: Vec<NewEvent>) -> Result<usize, StoreError> {
        let mut events = self.events.write().await;
        events.clear();
        let count = fixtures.len();
        for fixture in fixtures {
            let event = materialize(fixture);
            events.insert(event.id, event);
        }
        Ok(count)
    }
}
