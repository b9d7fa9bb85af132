//! Form input to store drafts.
//!
//! Forms carry raw text as typed by the user. Converting a form checks that
//! required fields are non-empty, parses the typed fields (category, date),
//! and fills in the fields the portal decides on its own: initial status and
//! progress, the first timeline entry, reporter, timestamps, urgency.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use setshaba_store::{
    AnnouncementDraft, Category, EventDraft, FeedbackDraft, FeedbackStatus,
    GENERAL_FEEDBACK_ISSUE_ID, IssueDraft, IssuePatch, IssueStatus, RecordId, TimelineEntry,
};

/// Format of timeline timestamps, e.g. `08:30 AM`.
pub const TIMELINE_TIME_FORMAT: &str = "%I:%M %p";

/// Format of event dates as entered in the event form.
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("unknown category `{0}`")]
    UnknownCategory(String),

    #[error("invalid event date `{0}`: expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Who is filing an issue. Decides the first timeline entry and reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueOrigin {
    Citizen,
    Admin,
}

impl IssueOrigin {
    pub fn timeline_event(&self) -> &'static str {
        match self {
            IssueOrigin::Citizen => "Reported",
            IssueOrigin::Admin => "Created by admin",
        }
    }

    pub fn reported_by(&self) -> &'static str {
        match self {
            IssueOrigin::Citizen => "Citizen Report",
            IssueOrigin::Admin => "Admin",
        }
    }
}

/// A device position as supplied by the browser's geolocation service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn to_location(&self) -> String {
        format_coordinates(self.latitude, self.longitude)
    }
}

/// Location text for a geolocated report: six decimals each, comma separated.
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.6}, {longitude:.6}")
}

/// Urgency heuristic applied when an issue is filed: any water problem, or
/// a title mentioning a burst.
pub fn is_flagged_urgent(category: Category, title: &str) -> bool {
    category == Category::Water || title.to_lowercase().contains("burst")
}

/// Reference handed back to a citizen after reporting: `TR` plus the last
/// six digits of the submission time in epoch milliseconds.
pub fn tracking_id<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    let millis = now.timestamp_millis().rem_euclid(1_000_000);
    format!("TR{millis:06}")
}

/// Patch moving an issue to `status` with its conventional progress.
pub fn status_patch(status: IssueStatus) -> IssuePatch {
    IssuePatch::status(status).with_progress(status.conventional_progress())
}

fn required<'a>(name: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    if value.is_empty() {
        Err(FormError::MissingField(name))
    } else {
        Ok(value)
    }
}

/// Issue report form, shared by the citizen report page and the admin
/// "add issue" dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueForm {
    pub title: String,
    pub category: String,
    pub location: String,
    pub description: String,
    /// Photo handle from the file picker, or a pasted URL.
    pub image_url: String,
    /// Filled by "Use Location". Replaces whatever `location` holds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl IssueForm {
    pub fn into_draft(
        self,
        origin: IssueOrigin,
        now: &DateTime<FixedOffset>,
    ) -> Result<IssueDraft, FormError> {
        let location = match &self.coordinates {
            Some(coordinates) => coordinates.to_location(),
            None => self.location.clone(),
        };

        required("title", &self.title)?;
        let category = required("category", &self.category)?
            .parse::<Category>()
            .map_err(|_| FormError::UnknownCategory(self.category.clone()))?;
        required("location", &location)?;
        required("description", &self.description)?;

        let is_urgent = is_flagged_urgent(category, &self.title);
        let image_url = (!self.image_url.is_empty()).then_some(self.image_url);

        Ok(IssueDraft {
            title: self.title,
            category,
            description: self.description,
            location,
            status: IssueStatus::Reported,
            progress: IssueStatus::Reported.conventional_progress(),
            timeline: vec![TimelineEntry::new(
                now.format(TIMELINE_TIME_FORMAT).to_string(),
                origin.timeline_event(),
            )],
            is_urgent,
            reported_by: origin.reported_by().to_string(),
            reported_at: now.with_timezone(&Utc),
            image_url,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedbackForm {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Issue the feedback refers to; general feedback when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<RecordId>,
}

impl FeedbackForm {
    pub fn into_draft(self, now: &DateTime<FixedOffset>) -> Result<FeedbackDraft, FormError> {
        required("name", &self.name)?;
        required("email", &self.email)?;
        required("message", &self.message)?;

        Ok(FeedbackDraft {
            name: self.name,
            email: self.email,
            message: self.message,
            issue_id: self.issue_id.unwrap_or(GENERAL_FEEDBACK_ISSUE_ID),
            status: FeedbackStatus::InReview,
            submitted_at: now.with_timezone(&Utc),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub location: String,
    pub time: String,
}

impl EventForm {
    pub fn into_draft(self) -> Result<EventDraft, FormError> {
        required("title", &self.title)?;
        required("description", &self.description)?;
        required("date", &self.date)?;
        required("location", &self.location)?;
        required("time", &self.time)?;

        let date = NaiveDate::parse_from_str(&self.date, EVENT_DATE_FORMAT)
            .map_err(|_| FormError::InvalidDate(self.date.clone()))?;

        Ok(EventDraft {
            title: self.title,
            description: self.description,
            date,
            location: self.location,
            time: self.time,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnouncementForm {
    pub title: String,
    pub description: String,
    pub is_urgent: bool,
}

impl AnnouncementForm {
    pub fn into_draft(self, now: &DateTime<FixedOffset>) -> Result<AnnouncementDraft, FormError> {
        required("title", &self.title)?;
        required("description", &self.description)?;

        Ok(AnnouncementDraft {
            title: self.title,
            description: self.description,
            published_at: now.with_timezone(&Utc),
            is_urgent: self.is_urgent,
        })
    }
}
