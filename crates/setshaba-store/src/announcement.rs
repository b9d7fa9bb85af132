//! Announcement: a published notice from the municipality.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub is_urgent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementDraft {
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub is_urgent: bool,
}

impl Record for Announcement {
    type Draft = AnnouncementDraft;
    const KIND: &'static str = "announcements";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: AnnouncementDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            published_at: draft.published_at,
            is_urgent: draft.is_urgent,
        }
    }
}
