//! Canonical in-memory state of the community portal.
//!
//! This is the mutation boundary for `setshaba-store`:
//! - four record collections plus the admin-mode flag
//! - create/update operations with `max(id)+1` assignment
//! - no delete, search, or lookup by id (callers inspect whole collections)

use serde::Serialize;
use tracing::{debug, info};

use crate::announcement::{Announcement, AnnouncementDraft};
use crate::collection::Collection;
use crate::digest::snapshot_ref;
use crate::event::{Event, EventDraft};
use crate::feedback::{Feedback, FeedbackDraft, FeedbackStatus};
use crate::issue::{Issue, IssueDraft, IssuePatch};
use crate::mutation::{Mutation, MutationOutcome};
use crate::record::{Record, RecordId};
use crate::seed::SeedData;

/// Errors raised while building or growing the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: RecordId },

    #[error("{kind} id space exhausted")]
    IdSpaceExhausted { kind: &'static str },
}

/// Result of an update addressed by id.
///
/// An unknown id is not an error: the collection is left untouched and the
/// caller gets `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    NotFound,
}

impl UpdateOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Applied)
    }
}

impl From<bool> for UpdateOutcome {
    fn from(applied: bool) -> Self {
        if applied {
            UpdateOutcome::Applied
        } else {
            UpdateOutcome::NotFound
        }
    }
}

/// The single source of truth for one portal session.
///
/// Cloning is cheap: collections are shared snapshots, so a clone is an
/// independent store that diverges only on its next mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityStore {
    issues: Collection<Issue>,
    events: Collection<Event>,
    feedback: Collection<Feedback>,
    announcements: Collection<Announcement>,
    is_admin: bool,
}

impl CommunityStore {
    /// Build a store from seed records. Admin mode starts off.
    pub fn from_seed(seed: SeedData) -> Result<Self, StoreError> {
        Ok(Self {
            issues: Collection::from_records(seed.issues)?,
            events: Collection::from_records(seed.events)?,
            feedback: Collection::from_records(seed.feedback)?,
            announcements: Collection::from_records(seed.announcements)?,
            is_admin: false,
        })
    }

    /// Store seeded with the built-in sample dataset.
    pub fn seeded() -> Self {
        Self::from_seed(SeedData::sample()).expect("sample seed ids are unique per collection")
    }

    pub fn issues(&self) -> &Collection<Issue> {
        &self.issues
    }

    pub fn events(&self) -> &Collection<Event> {
        &self.events
    }

    pub fn feedback(&self) -> &Collection<Feedback> {
        &self.feedback
    }

    pub fn announcements(&self) -> &Collection<Announcement> {
        &self.announcements
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Prepend a new issue with id `max(ids)+1`. Fields are not validated.
    pub fn add_issue(&mut self, draft: IssueDraft) -> Result<RecordId, StoreError> {
        let id = self.issues.insert_front(draft)?;
        debug!(collection = Issue::KIND, id, "record added");
        Ok(id)
    }

    /// Merge `patch` over the issue with `id`, keeping its position.
    pub fn update_issue(&mut self, id: RecordId, patch: IssuePatch) -> UpdateOutcome {
        if patch.is_empty() {
            debug!(collection = Issue::KIND, id, "empty issue patch");
        }
        let outcome: UpdateOutcome = self
            .issues
            .replace_matching(id, |issue| patch.merged_over(issue))
            .into();
        log_update(Issue::KIND, id, outcome);
        outcome
    }

    pub fn add_feedback(&mut self, draft: FeedbackDraft) -> Result<RecordId, StoreError> {
        let id = self.feedback.insert_front(draft)?;
        debug!(collection = Feedback::KIND, id, "record added");
        Ok(id)
    }

    /// Set the status of the feedback with `id`; other fields are kept.
    pub fn update_feedback_status(&mut self, id: RecordId, status: FeedbackStatus) -> UpdateOutcome {
        let outcome: UpdateOutcome = self
            .feedback
            .replace_matching(id, |feedback| Feedback {
                status,
                ..feedback.clone()
            })
            .into();
        log_update(Feedback::KIND, id, outcome);
        outcome
    }

    pub fn add_event(&mut self, draft: EventDraft) -> Result<RecordId, StoreError> {
        let id = self.events.insert_front(draft)?;
        debug!(collection = Event::KIND, id, "record added");
        Ok(id)
    }

    pub fn add_announcement(&mut self, draft: AnnouncementDraft) -> Result<RecordId, StoreError> {
        let id = self.announcements.insert_front(draft)?;
        debug!(collection = Announcement::KIND, id, "record added");
        Ok(id)
    }

    /// Replace the admin-mode flag. Carries no identity and no expiry.
    pub fn set_is_admin(&mut self, is_admin: bool) {
        if self.is_admin != is_admin {
            info!(is_admin, "admin mode changed");
        }
        self.is_admin = is_admin;
    }

    /// Apply one mutation value to this store.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationOutcome, StoreError> {
        let outcome = match mutation {
            Mutation::AddIssue { issue } => MutationOutcome::Added {
                id: self.add_issue(issue)?,
            },
            Mutation::UpdateIssue { id, patch } => {
                MutationOutcome::from_update(id, self.update_issue(id, patch))
            }
            Mutation::AddFeedback { feedback } => MutationOutcome::Added {
                id: self.add_feedback(feedback)?,
            },
            Mutation::UpdateFeedbackStatus { id, status } => {
                MutationOutcome::from_update(id, self.update_feedback_status(id, status))
            }
            Mutation::AddEvent { event } => MutationOutcome::Added {
                id: self.add_event(event)?,
            },
            Mutation::AddAnnouncement { announcement } => MutationOutcome::Added {
                id: self.add_announcement(announcement)?,
            },
            Mutation::SetIsAdmin { is_admin } => {
                self.set_is_admin(is_admin);
                MutationOutcome::AdminMode { is_admin }
            }
        };
        Ok(outcome)
    }

    /// Functional form of [`CommunityStore::apply`]: consume this state and
    /// return the next one.
    pub fn applied(mut self, mutation: Mutation) -> Result<(Self, MutationOutcome), StoreError> {
        let outcome = self.apply(mutation)?;
        Ok((self, outcome))
    }

    /// Content-addressed reference of the current state.
    pub fn snapshot_ref(&self) -> String {
        snapshot_ref(self)
    }
}

fn log_update(kind: &'static str, id: RecordId, outcome: UpdateOutcome) {
    match outcome {
        UpdateOutcome::Applied => debug!(collection = kind, id, "record updated"),
        UpdateOutcome::NotFound => debug!(collection = kind, id, "update skipped: id not present"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{Category, IssueStatus, TimelineEntry};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn draft(title: &str) -> IssueDraft {
        IssueDraft {
            title: title.to_string(),
            category: Category::Waste,
            description: "Bins not collected.".to_string(),
            location: "Vilakazi Street".to_string(),
            status: IssueStatus::Reported,
            progress: 0,
            timeline: vec![TimelineEntry::new("10:00 AM", "Reported")],
            is_urgent: false,
            reported_by: "Citizen Report".to_string(),
            reported_at: Utc
                .with_ymd_and_hms(2025, 8, 18, 10, 0, 0)
                .single()
                .expect("valid timestamp"),
            image_url: None,
        }
    }

    #[test]
    fn seeded_store_matches_sample_sizes() {
        let store = CommunityStore::seeded();
        assert_eq!(store.issues().len(), 3);
        assert_eq!(store.events().len(), 2);
        assert_eq!(store.feedback().len(), 2);
        assert_eq!(store.announcements().len(), 2);
        assert!(!store.is_admin());
    }

    #[test]
    fn add_issue_prepends_with_next_id() {
        let mut store = CommunityStore::seeded();
        let id = store.add_issue(draft("Overflowing bins")).expect("add");

        assert_eq!(id, 4);
        assert_eq!(store.issues().len(), 4);
        let first = store.issues().first().expect("non-empty");
        assert_eq!(first.id, 4);
        assert_eq!(first.title, "Overflowing bins");
    }

    #[test]
    fn add_to_empty_store_assigns_first_record_id() {
        let mut store = CommunityStore::default();
        let id = store.add_issue(draft("First")).expect("add");
        assert_eq!(id, crate::record::FIRST_RECORD_ID);
    }

    #[test]
    fn update_issue_replaces_only_target_record() {
        let mut store = CommunityStore::seeded();
        let before = store.issues().snapshot();

        let outcome = store.update_issue(2, IssuePatch::status(IssueStatus::InProgress));
        assert_eq!(outcome, UpdateOutcome::Applied);

        let after = store.issues().snapshot();
        assert_eq!(store.issues().ids(), vec![1, 2, 3]);
        assert_eq!(after[1].status, IssueStatus::InProgress);
        assert_eq!(after[1].progress, before[1].progress);
        assert!(Arc::ptr_eq(&before[0], &after[0]));
        assert!(Arc::ptr_eq(&before[2], &after[2]));
    }

    #[test]
    fn update_issue_unknown_id_is_silent_no_op() {
        let mut store = CommunityStore::seeded();
        let before = store.issues().snapshot();

        let outcome = store.update_issue(999, IssuePatch::status(IssueStatus::Resolved));

        assert_eq!(outcome, UpdateOutcome::NotFound);
        assert!(Arc::ptr_eq(&before, &store.issues().snapshot()));
    }

    #[test]
    fn update_feedback_status_keeps_other_fields() {
        let mut store = CommunityStore::seeded();
        let before = store
            .feedback()
            .iter()
            .find(|f| f.id == 1)
            .cloned()
            .expect("seed feedback 1");

        let outcome = store.update_feedback_status(1, FeedbackStatus::Resolved);
        assert!(outcome.is_applied());

        let after = store
            .feedback()
            .iter()
            .find(|f| f.id == 1)
            .cloned()
            .expect("feedback 1 still present");
        assert_eq!(after.status, FeedbackStatus::Resolved);
        assert_eq!(
            Feedback {
                status: before.status,
                ..after
            },
            before
        );
    }

    #[test]
    fn set_is_admin_is_idempotent() {
        let mut once = CommunityStore::seeded();
        once.set_is_admin(true);

        let mut twice = CommunityStore::seeded();
        twice.set_is_admin(true);
        twice.set_is_admin(true);

        assert_eq!(once.is_admin(), twice.is_admin());
        assert_eq!(once, twice);
    }

    #[test]
    fn applied_leaves_previous_state_untouched() {
        let original = CommunityStore::seeded();
        let (next, outcome) = original
            .clone()
            .applied(Mutation::SetIsAdmin { is_admin: true })
            .expect("apply");

        assert_eq!(outcome, MutationOutcome::AdminMode { is_admin: true });
        assert!(next.is_admin());
        assert!(!original.is_admin());
    }

    #[test]
    fn clones_diverge_only_after_mutation() {
        let mut store = CommunityStore::seeded();
        let reader = store.clone();

        store.add_issue(draft("Blocked drain")).expect("add");

        assert_eq!(reader.issues().len(), 3);
        assert_eq!(store.issues().len(), 4);
    }
}
