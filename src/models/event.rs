use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::FieldError;

/// Organizational units the frontend renders cohort pages for. The store
/// accepts any string so unknown cohorts simply never match a filter.
pub const SCHOOLS: &[&str] = &["viterbi", "dornsife", "annenberg", "marshall"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub room: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    #[serde(default)]
    pub multi_day: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Location,
    pub date: DateRange,
    pub thumbnail_url: Option<String>,
    pub school: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub rsvp_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A fully validated event payload. The store assigns the id and timestamps.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: Location,
    pub date: DateRange,
    pub thumbnail_url: Option<String>,
    pub school: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub rsvp_link: Option<String>,
}

/// Raw create payload as it arrives on the wire. Required fields are kept
/// optional and loosely typed here so that validation can report every
/// violated field at once instead of failing on the first deserialization
/// error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Location,
    pub date: CreateDateRange,
    pub thumbnail_url: Option<String>,
    pub school: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub rsvp_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateDateRange {
    pub from: Option<String>,
    pub to: Option<String>,
    pub multi_day: bool,
}

impl CreateEventRequest {
    /// Checks every required field and collects all violations before the
    /// request is allowed anywhere near the store.
    pub fn validate(self) -> Result<NewEvent, Vec<FieldError>> {
        let mut violations = Vec::new();

        let title = self.title.unwrap_or_default();
        if title.trim().is_empty() {
            violations.push(FieldError::new("title", "Title is required"));
        }

        let description = self.description.unwrap_or_default();
        if description.trim().is_empty() {
            violations.push(FieldError::new("description", "Description is required"));
        }

        let from = parse_timestamp(self.date.from.as_deref());
        if from.is_none() {
            violations.push(FieldError::new("date.from", "Invalid 'from' date format"));
        }

        let to = parse_timestamp(self.date.to.as_deref());
        if to.is_none() {
            violations.push(FieldError::new("date.to", "Invalid 'to' date format"));
        }

        match (from, to) {
            (Some(from), Some(to)) if violations.is_empty() => Ok(NewEvent {
                title,
                description,
                location: self.location,
                date: DateRange {
                    from,
                    to,
                    multi_day: self.date.multi_day,
                },
                thumbnail_url: self.thumbnail_url,
                school: self.school,
                tags: self.tags,
                featured: self.featured,
                rsvp_link: self.rsvp_link,
            }),
            _ => Err(violations),
        }
    }
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw?)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateEventRequest {
        CreateEventRequest {
            title: Some("Robotics Workshop".to_string()),
            description: Some("Build and race line followers".to_string()),
            date: CreateDateRange {
                from: Some("2030-04-01T18:00:00Z".to_string()),
                to: Some("2030-04-01T20:00:00Z".to_string()),
                multi_day: false,
            },
            school: Some("viterbi".to_string()),
            tags: vec!["WORKSHOP".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn valid_request_passes_validation() {
        let event = valid_request().validate().expect("should validate");
        assert_eq!(event.title, "Robotics Workshop");
        assert!(!event.featured);
        assert_eq!(event.date.to - event.date.from, chrono::Duration::hours(2));
    }

    #[test]
    fn empty_title_is_reported_by_field() {
        let mut request = valid_request();
        request.title = Some(String::new());

        let violations = request.validate().unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "title");
    }

    #[test]
    fn all_violations_are_collected_at_once() {
        let violations = CreateEventRequest::default().validate().unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, ["title", "description", "date.from", "date.to"]);
    }

    #[test]
    fn unparseable_dates_are_rejected() {
        let mut request = valid_request();
        request.date.from = Some("yesterday".to_string());

        let violations = request.validate().unwrap_err();
        assert_eq!(violations[0].field, "date.from");
    }

    #[test]
    fn wire_names_are_camel_case() {
        let raw = serde_json::json!({
            "title": "Info Session",
            "description": "Recruiting info session",
            "date": { "from": "2030-04-01T18:00:00Z", "to": "2030-04-02T20:00:00Z", "multiDay": true },
            "thumbnailUrl": "https://example.com/thumb.png",
            "rsvpLink": "https://example.com/rsvp"
        });

        let request: CreateEventRequest = serde_json::from_value(raw).unwrap();
        let event = request.validate().unwrap();
        assert!(event.date.multi_day);
        assert_eq!(
            event.thumbnail_url.as_deref(),
            Some("https://example.com/thumb.png")
        );
        assert_eq!(event.rsvp_link.as_deref(), Some("https://example.com/rsvp"));
    }
}
