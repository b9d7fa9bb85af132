//! Event: a scheduled community gathering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    /// Calendar date, `YYYY-MM-DD` on the wire.
    pub date: NaiveDate,
    pub location: String,
    /// Free-form start time, e.g. `14:00`.
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
    pub time: String,
}

impl Record for Event {
    type Draft = EventDraft;
    const KIND: &'static str = "events";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: EventDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            date: draft.date,
            location: draft.location,
            time: draft.time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_date_is_plain_calendar_date() {
        let raw = r#"{
            "id": 7,
            "title": "Ward meeting",
            "description": "Quarterly ward meeting.",
            "date": "2025-09-01",
            "location": "Ward Office",
            "time": "17:30"
        }"#;

        let event: Event = serde_json::from_str(raw).expect("event should parse");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date"));

        let value = serde_json::to_value(&event).expect("serialize");
        assert_eq!(value["date"], "2025-09-01");
    }
}
