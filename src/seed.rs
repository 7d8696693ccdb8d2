//! Synthetic fixtures for the destructive test-data reset.
//!
//! Shapes match the dataset the dashboards were built against: two school
//! cohorts of plain events plus four cohorts of featured events, one day
//! apart, all sharing the fixture room and tag set. Dates are relative to a
//! caller-supplied base instant so the fixtures always land in the future
//! window the listing queries select.

use chrono::{DateTime, Duration, Utc};

use crate::models::{DateRange, Location, NewEvent};

const CAMPUS_LATITUDE: f64 = 34.02176870202642;
const CAMPUS_LONGITUDE: f64 = -118.28651879471587;

const FIXTURE_ROOM: &str = "Taper Hall 112";
const FIXTURE_ADDRESS: &str = "1015 W 34st, LA 90089";
const FIXTURE_THUMBNAIL: &str = "https://dummyimage.com/600x400/000/fff";
const FIXTURE_TAGS: &[&str] = &["WORKSHOP", "CAREER"];

const FIXTURE_DESCRIPTION: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
     sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim \
     veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo \
     consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore \
     eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa \
     qui officia deserunt mollit anim id est laborum.";

const PLAIN_COHORTS: &[(&str, &str)] = &[
    ("Dornsife Event", "dornsife"),
    ("Viterbi Event", "viterbi"),
];

const FEATURED_COHORTS: &[(&str, &str)] = &[
    ("Featured Viterbi Event", "viterbi"),
    ("Featured Dornsife Event", "dornsife"),
    ("Featured Annenberg Event", "annenberg"),
    ("Featured Marshall Event", "marshall"),
];

/// Deterministic stand-in for the ~±0.005 degree scatter the dataset had.
fn jitter(seed: usize) -> f64 {
    (seed * 37 % 100) as f64 / 10_000.0 - 0.005
}

fn coordinate(index: usize) -> (f64, f64) {
    (
        CAMPUS_LATITUDE + jitter(index * 2),
        CAMPUS_LONGITUDE + jitter(index * 2 + 1),
    )
}

fn fixture(
    title: String,
    school: &str,
    featured: bool,
    from: DateTime<Utc>,
    (latitude, longitude): (f64, f64),
) -> NewEvent {
    NewEvent {
        title,
        description: FIXTURE_DESCRIPTION.to_string(),
        location: Location {
            room: Some(FIXTURE_ROOM.to_string()),
            address: Some(FIXTURE_ADDRESS.to_string()),
            latitude: Some(latitude),
            longitude: Some(longitude),
        },
        date: DateRange {
            from,
            to: from + Duration::hours(2),
            multi_day: false,
        },
        thumbnail_url: Some(FIXTURE_THUMBNAIL.to_string()),
        school: Some(school.to_string()),
        tags: FIXTURE_TAGS.iter().map(|t| t.to_string()).collect(),
        featured,
        rsvp_link: None,
    }
}

/// The full synthetic dataset: 18 plain events (6 Dornsife, 12 Viterbi)
/// starting the day after `base`, then 16 featured events (4 per cohort)
/// starting 10 days after `base`.
pub fn synthetic_events(base: DateTime<Utc>) -> Vec<NewEvent> {
    let mut events = Vec::with_capacity(34);

    for i in 0..18 {
        let (title, school) = PLAIN_COHORTS[usize::from(i >= 6)];
        // the first four share a coordinate so map views have a cluster
        let coord = if i < 4 { coordinate(0) } else { coordinate(i) };
        events.push(fixture(
            format!("{title} {}", i + 1),
            school,
            false,
            base + Duration::days(i as i64 + 1),
            coord,
        ));
    }

    for i in 0..16 {
        let (title, school) = FEATURED_COHORTS[i / 4];
        events.push(fixture(
            format!("{title} {}", i + 1),
            school,
            true,
            base + Duration::days(i as i64 + 10),
            coordinate(18 + i),
        ));
    }

    events
}
