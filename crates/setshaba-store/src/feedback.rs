//! Feedback: a citizen message, optionally tied to an issue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::record::{Record, RecordId};

/// `issueId` value for feedback not tied to a specific issue.
pub const GENERAL_FEEDBACK_ISSUE_ID: RecordId = 0;

/// Review status of a feedback message. Any value may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackStatus {
    #[serde(rename = "In Review", alias = "InReview")]
    InReview,
    Acknowledged,
    Resolved,
}

impl FeedbackStatus {
    pub const ALL: [FeedbackStatus; 3] = [
        FeedbackStatus::InReview,
        FeedbackStatus::Acknowledged,
        FeedbackStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::InReview => "In Review",
            FeedbackStatus::Acknowledged => "Acknowledged",
            FeedbackStatus::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "inreview" => Ok(FeedbackStatus::InReview),
            "acknowledged" => Ok(FeedbackStatus::Acknowledged),
            "resolved" => Ok(FeedbackStatus::Resolved),
            _ => Err(format!("unknown feedback status `{s}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub message: String,
    /// Soft link to an issue. Not checked; may name a missing issue or
    /// [`GENERAL_FEEDBACK_ISSUE_ID`].
    #[serde(default)]
    pub issue_id: RecordId,
    pub status: FeedbackStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDraft {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub issue_id: RecordId,
    pub status: FeedbackStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Feedback {
    pub fn is_general(&self) -> bool {
        self.issue_id == GENERAL_FEEDBACK_ISSUE_ID
    }
}

impl Record for Feedback {
    type Draft = FeedbackDraft;
    const KIND: &'static str = "feedback";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: FeedbackDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            message: draft.message,
            issue_id: draft.issue_id,
            status: draft.status,
            submitted_at: draft.submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_display_form() {
        for status in FeedbackStatus::ALL {
            let json = serde_json::to_string(&status).expect("serialize");
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<FeedbackStatus>(), Ok(status));
        }
    }

    #[test]
    fn missing_issue_id_defaults_to_general_feedback() {
        let raw = r#"{
            "id": 5,
            "name": "Lerato",
            "email": "lerato@example.com",
            "message": "Street lights are out.",
            "status": "In Review",
            "submittedAt": "2025-08-17T09:00:00Z"
        }"#;

        let feedback: Feedback = serde_json::from_str(raw).expect("feedback should parse");
        assert!(feedback.is_general());
        assert_eq!(feedback.status, FeedbackStatus::InReview);
    }
}
