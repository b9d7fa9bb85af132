//! Serializable store mutations and their outcomes.

use serde::{Deserialize, Serialize};

use crate::announcement::AnnouncementDraft;
use crate::event::EventDraft;
use crate::feedback::{FeedbackDraft, FeedbackStatus};
use crate::issue::{IssueDraft, IssuePatch};
use crate::record::RecordId;
use crate::store::UpdateOutcome;

/// One store operation expressed as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Mutation {
    AddIssue {
        issue: IssueDraft,
    },
    UpdateIssue {
        id: RecordId,
        patch: IssuePatch,
    },
    AddFeedback {
        feedback: FeedbackDraft,
    },
    UpdateFeedbackStatus {
        id: RecordId,
        status: FeedbackStatus,
    },
    AddEvent {
        event: EventDraft,
    },
    AddAnnouncement {
        announcement: AnnouncementDraft,
    },
    SetIsAdmin {
        #[serde(rename = "isAdmin", alias = "is_admin")]
        is_admin: bool,
    },
}

impl Mutation {
    /// Stable action name, matching the serialized `action` tag.
    pub fn action(&self) -> &'static str {
        match self {
            Mutation::AddIssue { .. } => "add_issue",
            Mutation::UpdateIssue { .. } => "update_issue",
            Mutation::AddFeedback { .. } => "add_feedback",
            Mutation::UpdateFeedbackStatus { .. } => "update_feedback_status",
            Mutation::AddEvent { .. } => "add_event",
            Mutation::AddAnnouncement { .. } => "add_announcement",
            Mutation::SetIsAdmin { .. } => "set_is_admin",
        }
    }
}

/// What a mutation did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutationOutcome {
    Added {
        id: RecordId,
    },
    Updated {
        id: RecordId,
    },
    NotFound {
        id: RecordId,
    },
    AdminMode {
        #[serde(rename = "isAdmin", alias = "is_admin")]
        is_admin: bool,
    },
}

impl MutationOutcome {
    pub fn from_update(id: RecordId, outcome: UpdateOutcome) -> Self {
        match outcome {
            UpdateOutcome::Applied => MutationOutcome::Updated { id },
            UpdateOutcome::NotFound => MutationOutcome::NotFound { id },
        }
    }

    /// Whether the store state changed (or, for admin mode, was set).
    pub fn changed_state(&self) -> bool {
        !matches!(self, MutationOutcome::NotFound { .. })
    }
}
