//! # setshaba-portal
//!
//! The portal layer that sits on top of `setshaba-store`.
//!
//! This crate provides:
//! - `forms`: form input to store drafts (validation, urgency, tracking ids)
//! - `auth`: the admin credential check
//! - `notice`: the user-facing outcome of each action
//! - `portal`: `Portal`, which owns a store and its journal and dispatches
//!   `PortalAction`s
//! - `views`: filters, counters, and the home/dashboard summaries
//! - `session`: JSONL scripts of portal actions
//! - `config`: `setshaba.toml`
//!
//! The store never validates. Everything a user can get wrong is checked
//! here, before a mutation is built.

pub mod auth;
pub mod config;
pub mod forms;
pub mod notice;
pub mod portal;
pub mod session;
pub mod views;

pub use auth::{AdminCredentials, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
pub use config::{
    ConfigError, DEFAULT_CONFIG_PATH, DisplayConfig, LogConfig, PortalConfig, StoreConfig,
};
pub use forms::{
    AnnouncementForm, Coordinates, EVENT_DATE_FORMAT, EventForm, FeedbackForm, FormError,
    IssueForm, IssueOrigin, TIMELINE_TIME_FORMAT, format_coordinates, is_flagged_urgent,
    status_patch, tracking_id,
};
pub use notice::{Notice, NoticeVariant};
pub use portal::{Portal, PortalAction};
pub use session::{ScriptedAction, SessionError, SessionStep, read_actions, run_session};
pub use views::{
    DashboardStats, DashboardView, FeedbackBoard, HomeStats, HomeView, IssueFilter, StatusCounts,
    dashboard_stats, dashboard_urgent_issues, feedback_by_status, filter_issues, home_stats,
    recent_announcements, recent_feedback, recent_issues, upcoming_events, urgent_issues,
};
