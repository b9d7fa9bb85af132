//! # setshaba-store
//!
//! Community state store for the Setshaba Connect portal.
//!
//! This crate provides:
//! - `Issue`, `Event`, `Feedback`, and `Announcement` records (and their drafts)
//! - `Collection` (immutable, shared snapshots with `max(id)+1` assignment)
//! - `CommunityStore` (the single source of truth plus the admin-mode flag)
//! - `Mutation`/`Journal` (serializable mutations, journaling, replay)
//! - `SeedData` (the fixed sample dataset every session starts from)
//!
//! It intentionally does not filter, search, or validate. Those concerns live
//! with the caller (`setshaba-portal`).
//!
//! ## Data model
//!
//! ```text
//! SeedData (fixed sample values)
//!     │  from_seed
//! CommunityStore ──apply(Mutation)──▶ CommunityStore'
//!     │                                   │
//!     └── snapshot() readers keep         └── Journal records MutationEvent
//!         the prior consistent view
//! ```

pub mod announcement;
pub mod collection;
pub mod digest;
pub mod event;
pub mod feedback;
pub mod issue;
pub mod journal;
pub mod mutation;
pub mod record;
pub mod seed;
pub mod store;

pub use announcement::{Announcement, AnnouncementDraft};
pub use collection::{Collection, Snapshot};
pub use digest::{SNAPSHOT_REF_PREFIX, snapshot_ref};
pub use event::{Event, EventDraft};
pub use feedback::{Feedback, FeedbackDraft, FeedbackStatus, GENERAL_FEEDBACK_ISSUE_ID};
pub use issue::{Category, Issue, IssueDraft, IssuePatch, IssueStatus, TimelineEntry};
pub use journal::{
    Journal, JournalError, MUTATION_EVENT_SCHEMA, MutationEvent, ReplayError, read_journal,
    replay, write_journal, write_journal_to_path,
};
pub use mutation::{Mutation, MutationOutcome};
pub use record::{FIRST_RECORD_ID, Record, RecordId};
pub use seed::{SeedData, SeedError};
pub use store::{CommunityStore, StoreError, UpdateOutcome};
