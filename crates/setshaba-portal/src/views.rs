//! Read-side views over a store: filters, counts, and the page summaries.
//!
//! Views only read. They take a `&CommunityStore` (or a collection) and
//! return owned values, so a view computed before a mutation keeps showing
//! the state it was computed from.

use chrono::NaiveDate;
use serde::Serialize;
use setshaba_store::{
    Announcement, Category, CommunityStore, Event, Feedback, FeedbackStatus, Issue, IssueStatus,
};

use crate::config::DisplayConfig;
use crate::forms::is_flagged_urgent;

/// Issues page filter. Empty search and `None` filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub search: String,
    pub category: Option<Category>,
    pub status: Option<IssueStatus>,
}

impl IssueFilter {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.category.is_some() || self.status.is_some()
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || [&issue.title, &issue.description, &issue.location]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));

        matches_search
            && self.category.is_none_or(|category| issue.category == category)
            && self.status.is_none_or(|status| issue.status == status)
    }
}

/// Issues matching `filter`, in store order.
pub fn filter_issues(store: &CommunityStore, filter: &IssueFilter) -> Vec<Issue> {
    store
        .issues()
        .iter()
        .filter(|issue| filter.matches(issue))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub reported: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl StatusCounts {
    pub fn tally<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.status {
                IssueStatus::Reported => counts.reported += 1,
                IssueStatus::InProgress => counts.in_progress += 1,
                IssueStatus::Resolved => counts.resolved += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.reported + self.in_progress + self.resolved
    }

    /// Everything not yet resolved.
    pub fn active(&self) -> usize {
        self.reported + self.in_progress
    }
}

/// Citizen home page counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeStats {
    pub total_issues: usize,
    pub urgent_issues: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

pub fn home_stats(store: &CommunityStore) -> HomeStats {
    let counts = StatusCounts::tally(store.issues().iter());
    HomeStats {
        total_issues: counts.total(),
        urgent_issues: store.issues().iter().filter(|i| i.is_urgent).count(),
        in_progress: counts.in_progress,
        resolved: counts.resolved,
    }
}

/// Admin dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_issues: usize,
    pub active_issues: usize,
    pub resolved_issues: usize,
    pub pending_feedback: usize,
    pub upcoming_events: usize,
}

pub fn dashboard_stats(store: &CommunityStore, today: NaiveDate) -> DashboardStats {
    let counts = StatusCounts::tally(store.issues().iter());
    DashboardStats {
        total_issues: counts.total(),
        active_issues: counts.active(),
        resolved_issues: counts.resolved,
        pending_feedback: store
            .feedback()
            .iter()
            .filter(|f| f.status == FeedbackStatus::InReview)
            .count(),
        upcoming_events: upcoming_events(store, today).len(),
    }
}

/// Issues carrying the urgent flag, as listed on the home page.
pub fn urgent_issues(store: &CommunityStore) -> Vec<Issue> {
    store
        .issues()
        .iter()
        .filter(|issue| issue.is_urgent)
        .cloned()
        .collect()
}

/// The dashboard recomputes urgency instead of trusting the flag, and hides
/// resolved issues.
pub fn dashboard_urgent_issues(store: &CommunityStore) -> Vec<Issue> {
    store
        .issues()
        .iter()
        .filter(|issue| {
            issue.status != IssueStatus::Resolved && is_flagged_urgent(issue.category, &issue.title)
        })
        .cloned()
        .collect()
}

pub fn recent_issues(store: &CommunityStore, limit: usize) -> Vec<Issue> {
    store.issues().iter().take(limit).cloned().collect()
}

pub fn recent_announcements(store: &CommunityStore, limit: usize) -> Vec<Announcement> {
    store.announcements().iter().take(limit).cloned().collect()
}

pub fn recent_feedback(store: &CommunityStore, limit: usize) -> Vec<Feedback> {
    store.feedback().iter().take(limit).cloned().collect()
}

/// Events strictly after `today`.
pub fn upcoming_events(store: &CommunityStore, today: NaiveDate) -> Vec<Event> {
    store
        .events()
        .iter()
        .filter(|event| event.date > today)
        .cloned()
        .collect()
}

/// Feedback split into the three status columns of the feedback page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackBoard {
    pub in_review: Vec<Feedback>,
    pub acknowledged: Vec<Feedback>,
    pub resolved: Vec<Feedback>,
}

impl FeedbackBoard {
    pub fn column(&self, status: FeedbackStatus) -> &[Feedback] {
        match status {
            FeedbackStatus::InReview => &self.in_review,
            FeedbackStatus::Acknowledged => &self.acknowledged,
            FeedbackStatus::Resolved => &self.resolved,
        }
    }
}

pub fn feedback_by_status(store: &CommunityStore) -> FeedbackBoard {
    let mut board = FeedbackBoard::default();
    for feedback in store.feedback().iter() {
        let column = match feedback.status {
            FeedbackStatus::InReview => &mut board.in_review,
            FeedbackStatus::Acknowledged => &mut board.acknowledged,
            FeedbackStatus::Resolved => &mut board.resolved,
        };
        column.push(feedback.clone());
    }
    board
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub stats: HomeStats,
    pub urgent_issues: Vec<Issue>,
    pub recent_issues: Vec<Issue>,
    pub recent_announcements: Vec<Announcement>,
}

impl HomeView {
    pub fn build(store: &CommunityStore, display: &DisplayConfig) -> Self {
        Self {
            stats: home_stats(store),
            urgent_issues: urgent_issues(store),
            recent_issues: recent_issues(store, display.recent_issues),
            recent_announcements: recent_announcements(store, display.recent_announcements),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub urgent_issues: Vec<Issue>,
    pub recent_issues: Vec<Issue>,
    pub recent_feedback: Vec<Feedback>,
    pub feedback: FeedbackBoard,
}

impl DashboardView {
    pub fn build(store: &CommunityStore, today: NaiveDate, display: &DisplayConfig) -> Self {
        Self {
            stats: dashboard_stats(store, today),
            urgent_issues: dashboard_urgent_issues(store),
            recent_issues: recent_issues(store, display.dashboard_recent_issues),
            recent_feedback: recent_feedback(store, display.dashboard_recent_feedback),
            feedback: feedback_by_status(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setshaba_store::IssuePatch;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 18).expect("valid date")
    }

    fn ids(issues: &[Issue]) -> Vec<u64> {
        issues.iter().map(|issue| issue.id).collect()
    }

    #[test]
    fn search_is_case_insensitive_over_text_fields() {
        let store = CommunityStore::seeded();
        let filter = IssueFilter {
            search: "BURST".to_string(),
            ..IssueFilter::default()
        };
        assert!(filter.is_active());
        assert_eq!(ids(&filter_issues(&store, &filter)), vec![1]);

        let by_location = IssueFilter {
            search: "soweto".to_string(),
            ..IssueFilter::default()
        };
        assert!(!filter_issues(&store, &by_location).is_empty());
    }

    #[test]
    fn inactive_filter_returns_every_issue_in_order() {
        let store = CommunityStore::seeded();
        let filter = IssueFilter::default();
        assert!(!filter.is_active());
        assert_eq!(ids(&filter_issues(&store, &filter)), store.issues().ids());
    }

    #[test]
    fn category_and_status_filters_combine() {
        let store = CommunityStore::seeded();
        let filter = IssueFilter {
            category: Some(Category::Roads),
            status: Some(IssueStatus::Resolved),
            ..IssueFilter::default()
        };
        for issue in filter_issues(&store, &filter) {
            assert_eq!(issue.category, Category::Roads);
            assert_eq!(issue.status, IssueStatus::Resolved);
        }
    }

    #[test]
    fn home_and_dashboard_counts_agree_on_totals() {
        let store = CommunityStore::seeded();
        let home = home_stats(&store);
        let dashboard = dashboard_stats(&store, today());

        assert_eq!(home.total_issues, 3);
        assert_eq!(dashboard.total_issues, 3);
        assert_eq!(home.resolved, dashboard.resolved_issues);
        assert_eq!(
            dashboard.active_issues + dashboard.resolved_issues,
            dashboard.total_issues
        );
        assert_eq!(
            dashboard.pending_feedback,
            feedback_by_status(&store).in_review.len()
        );
    }

    #[test]
    fn dashboard_urgency_drops_resolved_issues() {
        let mut store = CommunityStore::seeded();
        assert!(ids(&dashboard_urgent_issues(&store)).contains(&1));

        store.update_issue(1, IssuePatch::status(IssueStatus::Resolved));
        assert!(!ids(&dashboard_urgent_issues(&store)).contains(&1));
        assert!(ids(&urgent_issues(&store)).contains(&1));
    }

    #[test]
    fn upcoming_events_are_strictly_after_today() {
        let store = CommunityStore::seeded();
        let first_date = store.events().first().expect("seed events").date;

        let upcoming = upcoming_events(&store, first_date);
        assert!(upcoming.iter().all(|event| event.date > first_date));
    }

    #[test]
    fn recent_lists_take_from_the_front() {
        let store = CommunityStore::seeded();
        assert_eq!(ids(&recent_issues(&store, 2)), vec![1, 2]);
        assert_eq!(recent_announcements(&store, 10).len(), 2);
        assert!(recent_issues(&store, 0).is_empty());
    }

    #[test]
    fn dashboard_recent_lists_take_first_five_in_store_order() {
        let mut store = CommunityStore::seeded();
        let submitted_at = store
            .feedback()
            .first()
            .map(|f| f.submitted_at)
            .expect("seed feedback");
        for n in 0..4 {
            store
                .add_feedback(setshaba_store::FeedbackDraft {
                    name: format!("Resident {n}"),
                    email: format!("resident{n}@example.com"),
                    message: "Any news?".to_string(),
                    issue_id: 1,
                    status: FeedbackStatus::InReview,
                    submitted_at,
                })
                .expect("add feedback");
        }

        let view = DashboardView::build(&store, today(), &DisplayConfig::default());

        assert_eq!(ids(&view.recent_issues), vec![1, 2, 3]);
        let feedback_ids: Vec<u64> = view.recent_feedback.iter().map(|f| f.id).collect();
        assert_eq!(feedback_ids, vec![6, 5, 4, 3, 1]);
    }

    #[test]
    fn feedback_board_columns_partition_feedback() {
        let mut store = CommunityStore::seeded();
        store.update_feedback_status(1, FeedbackStatus::Resolved);

        let board = feedback_by_status(&store);
        let total: usize = FeedbackStatus::ALL
            .iter()
            .map(|status| board.column(*status).len())
            .sum();
        assert_eq!(total, store.feedback().len());
        assert!(board.resolved.iter().any(|f| f.id == 1));
    }
}
