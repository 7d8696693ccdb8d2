use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::{FromRow, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{DateRange, Event, Location, NewEvent};
use crate::query::{EventQuery, TagFilter};
use crate::store::{EventStore, StoreError};

const EVENT_COLUMNS: &str = "id, title, description, room, address, latitude, longitude, \
     date_from, date_to, multi_day, thumbnail_url, school, tags, featured, rsvp_link, \
     created_at, updated_at";

/// Event store backed by Postgres. Events are stored flat; the nested wire
/// shape is reassembled when rows are mapped back out.
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    description: String,
    room: Option<String>,
    address: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    date_from: DateTime<Utc>,
    date_to: DateTime<Utc>,
    multi_day: bool,
    thumbnail_url: Option<String>,
    school: Option<String>,
    tags: Vec<String>,
    featured: bool,
    rsvp_link: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            title: row.title,
            description: row.description,
            location: Location {
                room: row.room,
                address: row.address,
                latitude: row.latitude,
                longitude: row.longitude,
            },
            date: DateRange {
                from: row.date_from,
                to: row.date_to,
                multi_day: row.multi_day,
            },
            thumbnail_url: row.thumbnail_url,
            school: row.school,
            tags: row.tags,
            featured: row.featured,
            rsvp_link: row.rsvp_link,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Folds the query's optional filters into a WHERE conjunction. Tag
/// semantics mirror the document store this schema descends from:
/// a literal candidate is `= ANY(tags)`, a membership list is the array
/// overlap operator.
fn build_find_query(query: &EventQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE date_from >= "
    ));
    qb.push_bind(query.starts_on_or_after);

    if let Some(school) = &query.school {
        qb.push(" AND school = ");
        qb.push_bind(school.clone());
    }

    match &query.tags {
        TagFilter::None => {}
        TagFilter::Literal(tag) => {
            qb.push(" AND ");
            qb.push_bind(tag.clone());
            qb.push(" = ANY(tags)");
        }
        TagFilter::AnyOf(tags) => {
            qb.push(" AND tags && ");
            qb.push_bind(tags.clone());
        }
    }

    if let Some(featured) = query.featured {
        qb.push(" AND featured = ");
        qb.push_bind(featured);
    }

    qb.push(" ORDER BY date_from ASC");

    if let Some(limit) = query.limit {
        qb.push(" LIMIT ");
        qb.push_bind(limit);
    }

    qb
}

async fn insert_event(pool: &PgPool, event: NewEvent) -> Result<EventRow, StoreError> {
    let sql = format!(
        "INSERT INTO events (id, title, description, room, address, latitude, longitude, \
         date_from, date_to, multi_day, thumbnail_url, school, tags, featured, rsvp_link) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
         RETURNING {EVENT_COLUMNS}"
    );

    let row = sqlx::query_as::<_, EventRow>(&sql)
        .bind(Uuid::new_v4())
        .bind(event.title)
        .bind(event.description)
        .bind(event.location.room)
        .bind(event.location.address)
        .bind(event.location.latitude)
        .bind(event.location.longitude)
        .bind(event.date.from)
        .bind(event.date.to)
        .bind(event.date.multi_day)
        .bind(event.thumbnail_url)
        .bind(event.school)
        .bind(event.tags)
        .bind(event.featured)
        .bind(event.rsvp_link)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn find(&self, query: &EventQuery) -> Result<Vec<Event>, StoreError> {
        let mut qb = build_find_query(query);
        let rows: Vec<EventRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Event::from))
    }

    async fn insert(&self, event: NewEvent) -> Result<Event, StoreError> {
        Ok(insert_event(&self.pool, event).await?.into())
    }

    async fn toggle_featured(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        let sql = format!(
            "UPDATE events SET featured = NOT featured, updated_at = NOW() \
             WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Event::from))
    }

    async fn reset(&self, fixtures: Vec<NewEvent>) -> Result<usize, StoreError> {
        sqlx::query("DELETE FROM events").execute(&self.pool).await?;

        let count = fixtures.len();
        for fixture in fixtures {
            insert_event(&self.pool, fixture).await?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{ExploreParams, IndexParams};
    use chrono::Utc;

    #[test]
    fn find_query_folds_all_filters() {
        let params = IndexParams {
            school: Some("viterbi".to_string()),
            tags: Some("WORKSHOP".to_string()),
            featured: Some("true".to_string()),
            limit: Some("6".to_string()),
        };
        let sql = build_find_query(&EventQuery::for_index(&params, Utc::now())).into_sql();

        assert!(sql.contains("date_from >= $1"));
        assert!(sql.contains("school = $2"));
        assert!(sql.contains("$3 = ANY(tags)"));
        assert!(sql.contains("featured = $4"));
        assert!(sql.contains("ORDER BY date_from ASC"));
        assert!(sql.contains("LIMIT $5"));
    }

    #[test]
    fn unconstrained_explore_query_keeps_only_date_bound() {
        let sql =
            build_find_query(&EventQuery::for_explore(&ExploreParams::default(), Utc::now()))
                .into_sql();

        assert!(sql.contains("date_from >= $1"));
        assert!(!sql.contains("school = "));
        assert!(!sql.contains("= ANY(tags)"));
        assert!(!sql.contains("tags && "));
        assert!(!sql.contains("featured = "));
        assert!(!sql.contains("LIMIT"));
    }

    #[test]
    fn explore_tag_list_uses_array_overlap() {
        let params = ExploreParams {
            tags: Some("WORKSHOP,CAREER".to_string()),
            ..Default::default()
        };
        let sql = build_find_query(&EventQuery::for_explore(&params, Utc::now())).into_sql();

        assert!(sql.contains("tags && $2"));
    }
}
