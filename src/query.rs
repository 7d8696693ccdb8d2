//! Translates raw listing query strings into a typed store query.
//!
//! Two calling contexts exist with deliberately different parameter
//! semantics. The index context feeds the homepage widget: `featured`
//! defaults to false, `tags` is matched as a single literal candidate, and
//! a `limit` caps the result. The explore context feeds the browsing page:
//! `featured` is tri-state (absent means unconstrained), `tags` is a
//! comma-separated list matched by membership, and no limit applies. Both
//! only ever return future or ongoing events, ascending by start time.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::Event;

/// Raw query parameters for `GET /events/index`.
///
/// Everything arrives as optional strings; interpretation (including the
/// `limit` parse) happens in [`EventQuery::for_index`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexParams {
    pub school: Option<String>,
    pub tags: Option<String>,
    pub featured: Option<String>,
    pub limit: Option<String>,
}

/// Raw query parameters for `GET /events`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExploreParams {
    pub school: Option<String>,
    pub tags: Option<String>,
    pub featured: Option<String>,
}

/// How the `tags` filter applies to an event's tag list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    /// No constraint.
    None,
    /// The event's tag list must contain exactly this string. The raw
    /// parameter is not split, so a comma-separated value can only match a
    /// tag that itself contains a comma. Asymmetric with [`TagFilter::AnyOf`]
    /// on purpose; see DESIGN.md.
    Literal(String),
    /// The event matches if any of its tags appears in this list.
    AnyOf(Vec<String>),
}

/// A fully resolved store query: conjunction of optional filters, a lower
/// bound on the start time, ascending sort by start time, and an optional
/// result cap.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub school: Option<String>,
    pub tags: TagFilter,
    pub featured: Option<bool>,
    pub starts_on_or_after: DateTime<Utc>,
    pub limit: Option<i64>,
}

impl EventQuery {
    /// Index context: `featured` is a plain boolean defaulting to false,
    /// `tags` stays a single literal candidate, and `limit` caps the result
    /// count (absent, unparseable, or non-positive values mean no cap).
    pub fn for_index(params: &IndexParams, now: DateTime<Utc>) -> Self {
        EventQuery {
            school: non_empty(&params.school),
            tags: match &params.tags {
                Some(raw) => TagFilter::Literal(raw.clone()),
                None => TagFilter::None,
            },
            featured: Some(params.featured.as_deref() == Some("true")),
            starts_on_or_after: now,
            limit: params
                .limit
                .as_deref()
                .and_then(|raw| raw.parse::<i64>().ok())
                .filter(|n| *n > 0),
        }
    }

    /// Explore context: `featured` is tri-state (absent or empty means no
    /// constraint), `tags` is split on commas into a membership test, and
    /// no limit applies.
    pub fn for_explore(params: &ExploreParams, now: DateTime<Utc>) -> Self {
        EventQuery {
            school: non_empty(&params.school),
            tags: match params.tags.as_deref() {
                None | Some("") => TagFilter::None,
                Some(raw) => TagFilter::AnyOf(raw.split(',').map(str::to_string).collect()),
            },
            featured: match params.featured.as_deref() {
                None | Some("") => None,
                Some(raw) => Some(raw == "true"),
            },
            starts_on_or_after: now,
            limit: None,
        }
    }

    /// The single predicate every filter folds into. Both store backends
    /// implement exactly this, so the in-memory store doubles as the
    /// executable contract for the SQL translation.
    pub fn matches(&self, event: &Event) -> bool {
        if event.date.from < self.starts_on_or_after {
            return false;
        }
        if let Some(school) = &self.school {
            if event.school.as_deref() != Some(school.as_str()) {
                return false;
            }
        }
        match &self.tags {
            TagFilter::None => {}
            TagFilter::Literal(tag) => {
                if !event.tags.iter().any(|t| t == tag) {
                    return false;
                }
            }
            TagFilter::AnyOf(list) => {
                if !event.tags.iter().any(|t| list.contains(t)) {
                    return false;
                }
            }
        }
        if let Some(featured) = self.featured {
            if event.featured != featured {
                return false;
            }
        }
        true
    }
}

fn non_empty(raw: &Option<String>) -> Option<String> {
    raw.clone().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, Location};
    use chrono::Duration;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        "2030-01-01T00:00:00Z".parse().unwrap()
    }

    fn event(school: Option<&str>, tags: &[&str], featured: bool, days_out: i64) -> Event {
        let from = now() + Duration::days(days_out);
        Event {
            id: Uuid::new_v4(),
            title: "Event".to_string(),
            description: "Description".to_string(),
            location: Location::default(),
            date: DateRange {
                from,
                to: from + Duration::hours(2),
                multi_day: false,
            },
            thumbnail_url: None,
            school: school.map(str::to_string),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            featured,
            rsvp_link: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn index_params(
        school: Option<&str>,
        tags: Option<&str>,
        featured: Option<&str>,
        limit: Option<&str>,
    ) -> IndexParams {
        IndexParams {
            school: school.map(str::to_string),
            tags: tags.map(str::to_string),
            featured: featured.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    fn explore_params(
        school: Option<&str>,
        tags: Option<&str>,
        featured: Option<&str>,
    ) -> ExploreParams {
        ExploreParams {
            school: school.map(str::to_string),
            tags: tags.map(str::to_string),
            featured: featured.map(str::to_string),
        }
    }

    #[test]
    fn index_featured_defaults_to_false() {
        let query = EventQuery::for_index(&index_params(None, None, None, None), now());
        assert_eq!(query.featured, Some(false));

        let query = EventQuery::for_index(&index_params(None, None, Some("yes"), None), now());
        assert_eq!(query.featured, Some(false));

        let query = EventQuery::for_index(&index_params(None, None, Some("true"), None), now());
        assert_eq!(query.featured, Some(true));
    }

    #[test]
    fn index_limit_parses_or_is_uncapped() {
        let query = EventQuery::for_index(&index_params(None, None, None, Some("4")), now());
        assert_eq!(query.limit, Some(4));

        for bad in [None, Some("abc"), Some("0"), Some("-3")] {
            let query = EventQuery::for_index(&index_params(None, None, None, bad), now());
            assert_eq!(query.limit, None, "limit {bad:?} should mean no cap");
        }
    }

    #[test]
    fn index_tags_stay_literal() {
        let query =
            EventQuery::for_index(&index_params(None, Some("WORKSHOP,CAREER"), None, None), now());
        assert_eq!(query.tags, TagFilter::Literal("WORKSHOP,CAREER".to_string()));

        // the literal candidate never matches an event tagged with the parts
        assert!(!query.matches(&event(None, &["WORKSHOP", "CAREER"], false, 1)));
    }

    #[test]
    fn index_empty_tags_is_a_literal_candidate() {
        let query = EventQuery::for_index(&index_params(None, Some(""), None, None), now());
        assert_eq!(query.tags, TagFilter::Literal(String::new()));
        assert!(!query.matches(&event(None, &["WORKSHOP"], false, 1)));
    }

    #[test]
    fn explore_tags_split_into_membership_test() {
        let query = EventQuery::for_explore(
            &explore_params(None, Some("WORKSHOP,CAREER"), None),
            now(),
        );
        assert_eq!(
            query.tags,
            TagFilter::AnyOf(vec!["WORKSHOP".to_string(), "CAREER".to_string()])
        );

        assert!(query.matches(&event(None, &["CAREER"], false, 1)));
        assert!(query.matches(&event(None, &["WORKSHOP", "SOCIAL"], false, 1)));
        assert!(!query.matches(&event(None, &["SOCIAL"], false, 1)));
    }

    #[test]
    fn explore_empty_tags_means_no_filter() {
        let query = EventQuery::for_explore(&explore_params(None, Some(""), None), now());
        assert_eq!(query.tags, TagFilter::None);
        assert!(query.matches(&event(None, &[], false, 1)));
    }

    #[test]
    fn explore_featured_is_tri_state() {
        let absent = EventQuery::for_explore(&explore_params(None, None, None), now());
        assert_eq!(absent.featured, None);
        assert!(absent.matches(&event(None, &[], true, 1)));
        assert!(absent.matches(&event(None, &[], false, 1)));

        let empty = EventQuery::for_explore(&explore_params(None, None, Some("")), now());
        assert_eq!(empty.featured, None);

        let only_featured = EventQuery::for_explore(&explore_params(None, None, Some("true")), now());
        assert_eq!(only_featured.featured, Some(true));
        assert!(only_featured.matches(&event(None, &[], true, 1)));
        assert!(!only_featured.matches(&event(None, &[], false, 1)));

        let only_plain = EventQuery::for_explore(&explore_params(None, None, Some("false")), now());
        assert_eq!(only_plain.featured, Some(false));
        assert!(!only_plain.matches(&event(None, &[], true, 1)));
        assert!(only_plain.matches(&event(None, &[], false, 1)));
    }

    #[test]
    fn past_events_never_match() {
        let query = EventQuery::for_explore(&explore_params(None, None, None), now());
        assert!(!query.matches(&event(None, &[], false, -1)));

        // an event starting exactly at the bound is ongoing, not past
        assert!(query.matches(&event(None, &[], false, 0)));
    }

    #[test]
    fn school_filter_is_exact_match() {
        let query = EventQuery::for_explore(&explore_params(Some("viterbi"), None, None), now());
        assert!(query.matches(&event(Some("viterbi"), &[], false, 1)));
        assert!(!query.matches(&event(Some("dornsife"), &[], false, 1)));
        assert!(!query.matches(&event(None, &[], false, 1)));
    }

    #[test]
    fn empty_school_means_no_filter() {
        for query in [
            EventQuery::for_index(&index_params(Some(""), None, None, None), now()),
            EventQuery::for_explore(&explore_params(Some(""), None, None), now()),
        ] {
            assert_eq!(query.school, None);
            assert!(query.matches(&event(Some("marshall"), &[], query.featured.unwrap_or(false), 1)));
        }
    }

    #[test]
    fn all_filter_combinations_stay_conjunctive() {
        // both filters, either alone, neither
        let combos = [
            (Some("viterbi"), Some("WORKSHOP")),
            (Some("viterbi"), None),
            (None, Some("WORKSHOP")),
            (None, None),
        ];

        let matching = event(Some("viterbi"), &["WORKSHOP"], false, 1);
        let wrong_school = event(Some("dornsife"), &["WORKSHOP"], false, 1);
        let wrong_tags = event(Some("viterbi"), &["SOCIAL"], false, 1);

        for (school, tags) in combos {
            let query = EventQuery::for_index(&index_params(school, tags, None, None), now());
            assert!(query.matches(&matching), "combo {school:?}/{tags:?}");
            if school.is_some() {
                assert!(!query.matches(&wrong_school), "combo {school:?}/{tags:?}");
            }
            if tags.is_some() {
                assert!(!query.matches(&wrong_tags), "combo {school:?}/{tags:?}");
            }

            let query = EventQuery::for_explore(&explore_params(school, tags, None), now());
            assert!(query.matches(&matching), "combo {school:?}/{tags:?}");
            if school.is_some() {
                assert!(!query.matches(&wrong_school), "combo {school:?}/{tags:?}");
            }
            if tags.is_some() {
                assert!(!query.matches(&wrong_tags), "combo {school:?}/{tags:?}");
            }
        }
    }
}
