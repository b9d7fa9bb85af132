//! The portal: one store, its journal, and the actions users can take.
//!
//! Every action ends in a [`Notice`]. Rejected actions (missing fields, bad
//! credentials, admin actions outside admin mode) leave the store untouched.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use setshaba_store::{
    CommunityStore, FeedbackStatus, IssueStatus, Journal, Mutation, MutationOutcome, RecordId,
    StoreError,
};

use crate::config::{ConfigError, PortalConfig};
use crate::forms::{
    AnnouncementForm, EventForm, FeedbackForm, FormError, IssueForm, IssueOrigin, status_patch,
    tracking_id,
};
use crate::notice::Notice;

const REPORT_MISSING_FIELDS: &str = "Please fill in all required fields.";
const MISSING_FIELDS: &str = "Please fill in all fields.";

/// A user action, as written in session scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PortalAction {
    ReportIssue(IssueForm),
    SubmitFeedback(FeedbackForm),
    Login {
        username: String,
        password: String,
    },
    Logout,
    CreateIssue(IssueForm),
    ChangeIssueStatus {
        id: RecordId,
        status: IssueStatus,
    },
    CreateEvent(EventForm),
    PublishAnnouncement(AnnouncementForm),
    SetFeedbackStatus {
        id: RecordId,
        status: FeedbackStatus,
    },
}

impl PortalAction {
    pub fn action(&self) -> &'static str {
        match self {
            PortalAction::ReportIssue(_) => "report_issue",
            PortalAction::SubmitFeedback(_) => "submit_feedback",
            PortalAction::Login { .. } => "login",
            PortalAction::Logout => "logout",
            PortalAction::CreateIssue(_) => "create_issue",
            PortalAction::ChangeIssueStatus { .. } => "change_issue_status",
            PortalAction::CreateEvent(_) => "create_event",
            PortalAction::PublishAnnouncement(_) => "publish_announcement",
            PortalAction::SetFeedbackStatus { .. } => "set_feedback_status",
        }
    }

    /// Whether the action belongs to the admin dashboard.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            PortalAction::CreateIssue(_)
                | PortalAction::ChangeIssueStatus { .. }
                | PortalAction::CreateEvent(_)
                | PortalAction::PublishAnnouncement(_)
                | PortalAction::SetFeedbackStatus { .. }
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Portal {
    store: CommunityStore,
    journal: Journal,
    config: PortalConfig,
}

impl Portal {
    pub fn new(store: CommunityStore, config: PortalConfig) -> Self {
        Self {
            store,
            journal: Journal::new(),
            config,
        }
    }

    /// A portal over the store the config describes.
    pub fn from_config(config: PortalConfig) -> Result<Self, ConfigError> {
        let store = config.build_store()?;
        Ok(Self::new(store, config))
    }

    pub fn store(&self) -> &CommunityStore {
        &self.store
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn into_parts(self) -> (CommunityStore, Journal) {
        (self.store, self.journal)
    }

    pub fn dispatch(&mut self, action: PortalAction, now: DateTime<FixedOffset>) -> Notice {
        if action.requires_admin() && !self.store.is_admin() {
            tracing::warn!(action = action.action(), "admin action outside admin mode");
            return Notice::destructive("Access Denied", "Admin login required.");
        }

        match action {
            PortalAction::ReportIssue(form) => self.report_issue(form, now),
            PortalAction::SubmitFeedback(form) => self.submit_feedback(form, now),
            PortalAction::Login { username, password } => self.login(&username, &password, now),
            PortalAction::Logout => self.logout(now),
            PortalAction::CreateIssue(form) => self.create_issue(form, now),
            PortalAction::ChangeIssueStatus { id, status } => {
                self.change_issue_status(id, status, now)
            }
            PortalAction::CreateEvent(form) => self.create_event(form, now),
            PortalAction::PublishAnnouncement(form) => self.publish_announcement(form, now),
            PortalAction::SetFeedbackStatus { id, status } => {
                self.set_feedback_status(id, status, now)
            }
        }
    }

    /// Citizen issue report. Replies with a tracking id.
    pub fn report_issue(&mut self, form: IssueForm, now: DateTime<FixedOffset>) -> Notice {
        let issue = match form.into_draft(IssueOrigin::Citizen, &now) {
            Ok(draft) => draft,
            Err(err) => return rejected("report_issue", &err, REPORT_MISSING_FIELDS),
        };
        match self.commit(Mutation::AddIssue { issue }, now) {
            Ok(_) => Notice::success(
                "Report Submitted Successfully",
                format!("Your tracking ID is: {}", tracking_id(&now)),
            ),
            Err(err) => submission_failed(&err),
        }
    }

    pub fn submit_feedback(&mut self, form: FeedbackForm, now: DateTime<FixedOffset>) -> Notice {
        let feedback = match form.into_draft(&now) {
            Ok(draft) => draft,
            Err(err) => return rejected("submit_feedback", &err, MISSING_FIELDS),
        };
        match self.commit(Mutation::AddFeedback { feedback }, now) {
            Ok(_) => Notice::success(
                "Feedback Submitted",
                "Thank you for your feedback. We'll review it shortly.",
            ),
            Err(err) => submission_failed(&err),
        }
    }

    pub fn login(&mut self, username: &str, password: &str, now: DateTime<FixedOffset>) -> Notice {
        if !self.config.admin.matches(username, password) {
            tracing::warn!(username, "admin login rejected");
            return Notice::destructive("Login Failed", "Invalid username or password.");
        }
        match self.commit(Mutation::SetIsAdmin { is_admin: true }, now) {
            Ok(_) => Notice::success("Login Successful", "Welcome to the admin dashboard."),
            Err(err) => submission_failed(&err),
        }
    }

    pub fn logout(&mut self, now: DateTime<FixedOffset>) -> Notice {
        match self.commit(Mutation::SetIsAdmin { is_admin: false }, now) {
            Ok(_) => Notice::success("Logged Out", "Admin mode has been turned off."),
            Err(err) => submission_failed(&err),
        }
    }

    pub fn create_issue(&mut self, form: IssueForm, now: DateTime<FixedOffset>) -> Notice {
        let issue = match form.into_draft(IssueOrigin::Admin, &now) {
            Ok(draft) => draft,
            Err(err) => return rejected("create_issue", &err, MISSING_FIELDS),
        };
        match self.commit(Mutation::AddIssue { issue }, now) {
            Ok(_) => Notice::success("Issue Added", "New issue has been created successfully."),
            Err(err) => submission_failed(&err),
        }
    }

    /// Move an issue to `status` with its conventional progress.
    pub fn change_issue_status(
        &mut self,
        id: RecordId,
        status: IssueStatus,
        now: DateTime<FixedOffset>,
    ) -> Notice {
        let mutation = Mutation::UpdateIssue {
            id,
            patch: status_patch(status),
        };
        match self.commit(mutation, now) {
            Ok(MutationOutcome::NotFound { id }) => Notice::destructive(
                "Issue Not Found",
                format!("No issue with id {id} exists."),
            ),
            Ok(_) => Notice::success("Issue Updated", "Issue status has been updated successfully."),
            Err(err) => submission_failed(&err),
        }
    }

    pub fn create_event(&mut self, form: EventForm, now: DateTime<FixedOffset>) -> Notice {
        let event = match form.into_draft() {
            Ok(draft) => draft,
            Err(err) => return rejected("create_event", &err, MISSING_FIELDS),
        };
        match self.commit(Mutation::AddEvent { event }, now) {
            Ok(_) => Notice::success("Event Created", "New event has been added successfully."),
            Err(err) => submission_failed(&err),
        }
    }

    pub fn publish_announcement(
        &mut self,
        form: AnnouncementForm,
        now: DateTime<FixedOffset>,
    ) -> Notice {
        let announcement = match form.into_draft(&now) {
            Ok(draft) => draft,
            Err(err) => return rejected("publish_announcement", &err, MISSING_FIELDS),
        };
        match self.commit(Mutation::AddAnnouncement { announcement }, now) {
            Ok(_) => Notice::success(
                "Announcement Published",
                "Your announcement has been published successfully.",
            ),
            Err(err) => submission_failed(&err),
        }
    }

    pub fn set_feedback_status(
        &mut self,
        id: RecordId,
        status: FeedbackStatus,
        now: DateTime<FixedOffset>,
    ) -> Notice {
        match self.commit(Mutation::UpdateFeedbackStatus { id, status }, now) {
            Ok(MutationOutcome::NotFound { id }) => Notice::destructive(
                "Feedback Not Found",
                format!("No feedback with id {id} exists."),
            ),
            Ok(_) => Notice::success(
                "Status Updated",
                format!(
                    "Feedback has been marked as {}.",
                    status.as_str().to_lowercase()
                ),
            ),
            Err(err) => submission_failed(&err),
        }
    }

    fn commit(
        &mut self,
        mutation: Mutation,
        now: DateTime<FixedOffset>,
    ) -> Result<MutationOutcome, StoreError> {
        self.journal
            .record(&mut self.store, mutation, now.with_timezone(&Utc))
    }
}

fn rejected(action: &'static str, err: &FormError, missing_message: &str) -> Notice {
    tracing::warn!(action, error = %err, "form rejected");
    match err {
        FormError::MissingField(_) => Notice::destructive("Missing Information", missing_message),
        FormError::UnknownCategory(_) | FormError::InvalidDate(_) => {
            Notice::destructive("Invalid Information", err.to_string())
        }
    }
}

fn submission_failed(err: &StoreError) -> Notice {
    tracing::warn!(error = %err, "store rejected mutation");
    Notice::destructive("Submission Failed", err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-08-18T10:00:00+02:00").expect("valid timestamp")
    }

    fn portal() -> Portal {
        Portal::from_config(PortalConfig::default()).expect("sample portal")
    }

    #[test]
    fn admin_actions_are_denied_outside_admin_mode() {
        let mut portal = portal();
        let before = portal.store().snapshot_ref();

        let notice = portal.dispatch(
            PortalAction::ChangeIssueStatus {
                id: 2,
                status: IssueStatus::Resolved,
            },
            now(),
        );

        assert!(notice.is_destructive());
        assert_eq!(notice.title, "Access Denied");
        assert_eq!(portal.store().snapshot_ref(), before);
        assert!(portal.journal().is_empty());
    }

    #[test]
    fn login_toggles_admin_mode_and_is_journaled() {
        let mut portal = portal();

        let failed = portal.dispatch(
            PortalAction::Login {
                username: "admin".to_string(),
                password: "wrong".to_string(),
            },
            now(),
        );
        assert_eq!(failed.title, "Login Failed");
        assert!(!portal.store().is_admin());

        let ok = portal.dispatch(
            PortalAction::Login {
                username: "admin".to_string(),
                password: "admin".to_string(),
            },
            now(),
        );
        assert_eq!(ok.title, "Login Successful");
        assert!(portal.store().is_admin());

        portal.dispatch(PortalAction::Logout, now());
        assert!(!portal.store().is_admin());
        assert_eq!(portal.journal().len(), 2);
    }

    #[test]
    fn status_change_on_unknown_issue_is_reported_not_applied() {
        let mut portal = portal();
        portal.login("admin", "admin", now());
        let before = portal.store().snapshot_ref();

        let notice = portal.change_issue_status(999, IssueStatus::Resolved, now());

        assert!(notice.is_destructive());
        assert_eq!(notice.title, "Issue Not Found");
        assert_eq!(portal.store().snapshot_ref(), before);
    }

    #[test]
    fn feedback_status_message_uses_lowercase_status() {
        let mut portal = portal();
        portal.login("admin", "admin", now());

        let notice = portal.set_feedback_status(1, FeedbackStatus::InReview, now());
        insta::assert_snapshot!(notice.description, @"Feedback has been marked as in review.");
    }

    #[test]
    fn action_tag_matches_serialized_name() {
        let action = PortalAction::SetFeedbackStatus {
            id: 1,
            status: FeedbackStatus::Resolved,
        };
        let value = serde_json::to_value(&action).expect("serialize");
        assert_eq!(value["action"], action.action());
        assert_eq!(value["status"], "Resolved");
    }
}
