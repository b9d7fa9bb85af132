//! Session scripts: JSONL sequences of portal actions.
//!
//! One action per line, e.g.
//!
//! ```text
//! # citizen reports, admin resolves
//! {"action":"report_issue","title":"Leak","category":"Water","location":"Main St","description":"Drip"}
//! {"action":"login","username":"admin","password":"admin"}
//! {"action":"change_issue_status","id":4,"status":"Resolved","at":"2025-08-18T12:00:00+02:00"}
//! ```
//!
//! `at` pins the action's clock; actions without it use the session clock.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

use crate::notice::Notice;
use crate::portal::{Portal, PortalAction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<FixedOffset>>,
    #[serde(flatten)]
    pub action: PortalAction,
}

/// Parse a script, keeping the 1-based line number of each action.
pub fn read_actions(reader: impl BufRead) -> Result<Vec<(usize, ScriptedAction)>, SessionError> {
    let mut actions = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| SessionError::Io(line_no, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let action = serde_json::from_str(trimmed)
            .map_err(|e| SessionError::Parse(line_no, e.to_string()))?;
        actions.push((line_no, action));
    }
    Ok(actions)
}

/// One executed script line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStep {
    pub line: usize,
    pub action: &'static str,
    pub notice: Notice,
}

/// Dispatch every action in order. Unpinned actions run at `now`.
pub fn run_session(
    portal: &mut Portal,
    actions: Vec<(usize, ScriptedAction)>,
    now: DateTime<FixedOffset>,
) -> Vec<SessionStep> {
    actions
        .into_iter()
        .map(|(line, scripted)| {
            let action = scripted.action.action();
            let notice = portal.dispatch(scripted.action, scripted.at.unwrap_or(now));
            tracing::debug!(line, action, title = %notice.title, "session step");
            SessionStep {
                line,
                action,
                notice,
            }
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session I/O error at line {0}: {1}")]
    Io(usize, String),

    #[error("session parse error at line {0}: {1}")]
    Parse(usize, String),
}
