//! Issue: a citizen-reported infrastructure problem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::record::{Record, RecordId};

/// Infrastructure area an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Water,
    Electricity,
    Roads,
    Waste,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Water,
        Category::Electricity,
        Category::Roads,
        Category::Waste,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Water => "Water",
            Category::Electricity => "Electricity",
            Category::Roads => "Roads",
            Category::Waste => "Waste",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Parse a category name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category `{s}`"))
    }
}

/// Lifecycle status of an issue.
///
/// Any status may be set from any other; there is no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    Reported,
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    Resolved,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 3] = [
        IssueStatus::Reported,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Reported => "Reported",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
        }
    }

    /// Progress percentage conventionally paired with this status.
    pub fn conventional_progress(&self) -> u8 {
        match self {
            IssueStatus::Reported => 0,
            IssueStatus::InProgress => 50,
            IssueStatus::Resolved => 100,
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    /// Accepts the display form (`In Progress`) as well as `in-progress`,
    /// `in_progress`, and `inprogress`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "reported" => Ok(IssueStatus::Reported),
            "inprogress" => Ok(IssueStatus::InProgress),
            "resolved" => Ok(IssueStatus::Resolved),
            _ => Err(format!("unknown issue status `{s}`")),
        }
    }
}

/// One step in an issue's history, e.g. `08:30 AM` / `Reported`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub time: String,
    pub event: String,
}

impl TimelineEntry {
    pub fn new(time: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            event: event.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: RecordId,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub location: String,
    pub status: IssueStatus,
    /// Percentage in `0..=100`. Not checked against `status`.
    pub progress: u8,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub is_urgent: bool,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    /// Opaque photo handle attached by the reporter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// An issue before the store has assigned its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDraft {
    pub title: String,
    pub category: Category,
    pub description: String,
    pub location: String,
    pub status: IssueStatus,
    pub progress: u8,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub is_urgent: bool,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Record for Issue {
    type Draft = IssueDraft;
    const KIND: &'static str = "issues";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: IssueDraft) -> Self {
        Self {
            id,
            title: draft.title,
            category: draft.category,
            description: draft.description,
            location: draft.location,
            status: draft.status,
            progress: draft.progress,
            timeline: draft.timeline,
            is_urgent: draft.is_urgent,
            reported_by: draft.reported_by,
            reported_at: draft.reported_at,
            image_url: draft.image_url,
        }
    }
}

/// Partial issue update: present fields overwrite, absent fields are kept.
///
/// The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<TimelineEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_urgent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl IssuePatch {
    pub fn status(status: IssueStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow merge of this patch over `issue`.
    pub fn merged_over(&self, issue: &Issue) -> Issue {
        let patch = self.clone();
        Issue {
            id: issue.id,
            title: patch.title.unwrap_or_else(|| issue.title.clone()),
            category: patch.category.unwrap_or(issue.category),
            description: patch
                .description
                .unwrap_or_else(|| issue.description.clone()),
            location: patch.location.unwrap_or_else(|| issue.location.clone()),
            status: patch.status.unwrap_or(issue.status),
            progress: patch.progress.unwrap_or(issue.progress),
            timeline: patch.timeline.unwrap_or_else(|| issue.timeline.clone()),
            is_urgent: patch.is_urgent.unwrap_or(issue.is_urgent),
            reported_by: patch
                .reported_by
                .unwrap_or_else(|| issue.reported_by.clone()),
            reported_at: patch.reported_at.unwrap_or(issue.reported_at),
            image_url: patch.image_url.or_else(|| issue.image_url.clone()),
        }
    }
}
