//! Seed data every session starts from.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::announcement::Announcement;
use crate::event::Event;
use crate::feedback::Feedback;
use crate::issue::Issue;

const SAMPLE_SEED_JSON: &str = include_str!("../data/seed.json");

/// Initial contents of the four collections, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub feedback: Vec<Feedback>,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
}

impl SeedData {
    /// The built-in sample dataset.
    pub fn sample() -> Self {
        Self::from_json_str(SAMPLE_SEED_JSON).expect("embedded sample seed should parse")
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SeedError> {
        serde_json::from_str(raw).map_err(|e| SeedError::Parse(e.to_string()))
    }

    /// Load an alternative seed from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| SeedError::Io(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw).map_err(|e| SeedError::Parse(format!("{}: {e}", path.display())))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("seed I/O error: {0}")]
    Io(String),

    #[error("seed parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackStatus;
    use crate::issue::{Category, IssueStatus};

    #[test]
    fn sample_seed_parses() {
        let seed = SeedData::sample();
        assert_eq!(seed.issues.len(), 3);
        assert_eq!(seed.events.len(), 2);
        assert_eq!(seed.feedback.len(), 2);
        assert_eq!(seed.announcements.len(), 2);
    }

    #[test]
    fn sample_seed_keeps_reference_values() {
        let seed = SeedData::sample();

        let burst = &seed.issues[0];
        assert_eq!(burst.id, 1);
        assert_eq!(burst.category, Category::Water);
        assert_eq!(burst.status, IssueStatus::InProgress);
        assert_eq!(burst.progress, 40);
        assert_eq!(burst.timeline.len(), 3);
        assert!(burst.is_urgent);

        assert_eq!(seed.feedback[0].status, FeedbackStatus::InReview);
        assert_eq!(seed.feedback[0].issue_id, 1);
        assert!(seed.announcements[1].is_urgent);
    }

    #[test]
    fn partial_seed_defaults_missing_collections() {
        let seed = SeedData::from_json_str(r#"{"events": []}"#).expect("partial seed");
        assert_eq!(seed, SeedData::default());
    }

    #[test]
    fn malformed_seed_is_a_parse_error() {
        let err = SeedData::from_json_str("{\"issues\": [{}]}").expect_err("bad seed");
        assert!(matches!(err, SeedError::Parse(_)));
    }
}
