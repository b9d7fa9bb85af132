//! Mutation journal: an ordered record of what a session did to its store.
//!
//! `setshaba.mutation.v1` is the envelope:
//! - one event per applied mutation, numbered from 1
//! - the recorded outcome (assigned id, not-found, admin flag)
//! - deterministic replay onto the same base store
//!
//! Journals can be exported as JSONL. Nothing reloads them into a running
//! session; every session still starts from seed data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use crate::mutation::{Mutation, MutationOutcome};
use crate::store::{CommunityStore, StoreError};

pub const MUTATION_EVENT_SCHEMA: &str = "setshaba.mutation.v1";

fn default_mutation_event_schema() -> String {
    MUTATION_EVENT_SCHEMA.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationEvent {
    #[serde(default = "default_mutation_event_schema")]
    pub schema: String,
    pub sequence: u64,
    pub occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    pub mutation: Mutation,
    pub outcome: MutationOutcome,
}

impl MutationEvent {
    pub fn new(
        sequence: u64,
        occurred_at: DateTime<Utc>,
        mutation: Mutation,
        outcome: MutationOutcome,
    ) -> Self {
        Self {
            schema: MUTATION_EVENT_SCHEMA.to_string(),
            sequence,
            occurred_at,
            mutation,
            outcome,
        }
    }
}

/// Applies mutations to a store and keeps the resulting events.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    events: Vec<MutationEvent>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `mutation` to `store` and append the event on success.
    ///
    /// A failed mutation leaves both the store and the journal unchanged.
    pub fn record(
        &mut self,
        store: &mut CommunityStore,
        mutation: Mutation,
        occurred_at: DateTime<Utc>,
    ) -> Result<MutationOutcome, StoreError> {
        let outcome = store.apply(mutation.clone())?;
        let sequence = self.events.len() as u64 + 1;
        self.events
            .push(MutationEvent::new(sequence, occurred_at, mutation, outcome));
        Ok(outcome)
    }

    pub fn events(&self) -> &[MutationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Re-apply `events` on top of `base`, checking each recorded outcome.
pub fn replay(
    base: CommunityStore,
    events: &[MutationEvent],
) -> Result<CommunityStore, ReplayError> {
    let mut store = base;
    for (index, event) in events.iter().enumerate() {
        if event.schema != MUTATION_EVENT_SCHEMA {
            return Err(ReplayError::UnsupportedSchema(event.schema.clone()));
        }

        let expected = index as u64 + 1;
        if event.sequence != expected {
            return Err(ReplayError::SequenceGap {
                expected,
                found: event.sequence,
            });
        }

        let replayed = store.apply(event.mutation.clone())?;
        if replayed != event.outcome {
            return Err(ReplayError::Diverged {
                sequence: event.sequence,
                recorded: event.outcome,
                replayed,
            });
        }
    }
    Ok(store)
}

pub fn read_journal(reader: impl BufRead) -> Result<Vec<MutationEvent>, JournalError> {
    let mut events = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| JournalError::Io(line_no + 1, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event: MutationEvent = serde_json::from_str(trimmed)
            .map_err(|e| JournalError::Parse(line_no + 1, e.to_string()))?;
        events.push(event);
    }
    Ok(events)
}

pub fn write_journal(writer: &mut impl Write, events: &[MutationEvent]) -> Result<(), JournalError> {
    for event in events {
        let line =
            serde_json::to_string(event).map_err(|e| JournalError::Serialize(e.to_string()))?;
        writeln!(writer, "{line}").map_err(|e| JournalError::Write(e.to_string()))?;
    }
    Ok(())
}

pub fn write_journal_to_path(
    path: impl AsRef<Path>,
    events: &[MutationEvent],
) -> Result<(), JournalError> {
    let path = path.as_ref();
    let file =
        File::create(path).map_err(|e| JournalError::Write(format!("{}: {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    write_journal(&mut writer, events)?;
    writer
        .flush()
        .map_err(|e| JournalError::Write(format!("{}: {e}", path.display())))
}

/// Errors from journal I/O.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("line {0}: I/O error: {1}")]
    Io(usize, String),

    #[error("line {0}: parse error: {1}")]
    Parse(usize, String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("journal write error: {0}")]
    Write(String),
}

/// Errors from journal replay.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("unsupported mutation schema: {0}")]
    UnsupportedSchema(String),

    #[error("journal sequence gap: expected {expected}, found {found}")]
    SequenceGap { expected: u64, found: u64 },

    #[error("replay diverged at sequence {sequence}: recorded {recorded:?}, replayed {replayed:?}")]
    Diverged {
        sequence: u64,
        recorded: MutationOutcome,
        replayed: MutationOutcome,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
