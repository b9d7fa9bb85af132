//! Copy-on-write record collections.
//!
//! A collection is never mutated in place: every change builds a new
//! sequence and swaps the shared pointer. Records untouched by a change are
//! shared between the old and the new sequence, so a reader holding an older
//! [`Snapshot`] keeps a consistent view and never sees a half-updated record.

use crate::record::{FIRST_RECORD_ID, Record, RecordId};
use crate::store::StoreError;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Immutable, shareable view of a collection at one point in time.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// Ordered records of one kind, most recent first.
#[derive(Debug)]
pub struct Collection<T> {
    records: Snapshot<T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(Vec::new()),
        }
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records.iter().map(|record| record.as_ref()))
    }
}

impl<T: Record> Collection<T> {
    /// Build a collection from records in their given order.
    ///
    /// Ids must be unique within the collection.
    pub fn from_records(records: Vec<T>) -> Result<Self, StoreError> {
        let mut seen = BTreeSet::new();
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(StoreError::DuplicateId {
                    kind: T::KIND,
                    id: record.id(),
                });
            }
        }
        Ok(Self {
            records: Arc::new(records.into_iter().map(Arc::new).collect()),
        })
    }

    /// The current sequence. Later changes never alter a returned snapshot.
    pub fn snapshot(&self) -> Snapshot<T> {
        Arc::clone(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in collection order (most recent first).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter().map(|record| record.as_ref())
    }

    pub fn first(&self) -> Option<&T> {
        self.records.first().map(|record| record.as_ref())
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.iter().map(Record::id).collect()
    }

    pub fn max_id(&self) -> Option<RecordId> {
        self.iter().map(Record::id).max()
    }

    /// Id the next inserted record receives: `max(ids) + 1`, or
    /// [`FIRST_RECORD_ID`] for an empty collection.
    pub fn next_id(&self) -> Result<RecordId, StoreError> {
        match self.max_id() {
            None => Ok(FIRST_RECORD_ID),
            Some(max) => max
                .checked_add(1)
                .ok_or(StoreError::IdSpaceExhausted { kind: T::KIND }),
        }
    }

    /// Assign the next id to `draft` and prepend the resulting record.
    pub(crate) fn insert_front(&mut self, draft: T::Draft) -> Result<RecordId, StoreError> {
        let id = self.next_id()?;
        let mut records = Vec::with_capacity(self.records.len() + 1);
        records.push(Arc::new(T::from_draft(id, draft)));
        records.extend(self.records.iter().cloned());
        self.records = Arc::new(records);
        Ok(id)
    }

    /// Replace the record with `id` by `update(record)`, keeping its position.
    ///
    /// Returns `false` and leaves the sequence pointer untouched when no
    /// record matches.
    pub(crate) fn replace_matching(&mut self, id: RecordId, update: impl FnOnce(&T) -> T) -> bool {
        let Some(position) = self.records.iter().position(|record| record.id() == id) else {
            return false;
        };

        let mut records = self.records.as_ref().clone();
        let replacement = Arc::new(update(&records[position]));
        records[position] = replacement;
        self.records = Arc::new(records);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: RecordId,
        text: String,
    }

    impl Record for Note {
        type Draft = String;
        const KIND: &'static str = "note";

        fn id(&self) -> RecordId {
            self.id
        }

        fn from_draft(id: RecordId, text: String) -> Self {
            Self { id, text }
        }
    }

    fn notes(ids: &[RecordId]) -> Collection<Note> {
        Collection::from_records(
            ids.iter()
                .map(|id| Note {
                    id: *id,
                    text: format!("note {id}"),
                })
                .collect(),
        )
        .expect("ids are unique")
    }

    #[test]
    fn empty_collection_starts_at_first_record_id() {
        let mut collection = Collection::<Note>::default();
        assert_eq!(collection.next_id().expect("id available"), FIRST_RECORD_ID);

        let id = collection
            .insert_front("hello".to_string())
            .expect("insert should succeed");
        assert_eq!(id, 1);
        assert_eq!(collection.ids(), vec![1]);
    }

    #[test]
    fn insert_front_uses_max_plus_one_not_length() {
        let mut collection = notes(&[2, 9, 4]);
        let id = collection
            .insert_front("new".to_string())
            .expect("insert should succeed");

        assert_eq!(id, 10);
        assert_eq!(collection.ids(), vec![10, 2, 9, 4]);
        assert_eq!(collection.first().map(|n| n.text.as_str()), Some("new"));
    }

    #[test]
    fn insert_front_leaves_older_snapshot_intact() {
        let mut collection = notes(&[1, 2]);
        let before = collection.snapshot();

        collection
            .insert_front("new".to_string())
            .expect("insert should succeed");

        assert_eq!(before.len(), 2);
        assert_eq!(collection.len(), 3);
        assert!(Arc::ptr_eq(&before[0], &collection.snapshot()[1]));
    }

    #[test]
    fn replace_matching_shares_untouched_records() {
        let mut collection = notes(&[3, 2, 1]);
        let before = collection.snapshot();

        let replaced = collection.replace_matching(2, |note| Note {
            text: "edited".to_string(),
            ..note.clone()
        });
        assert!(replaced);

        let after = collection.snapshot();
        assert_eq!(collection.ids(), vec![3, 2, 1]);
        assert_eq!(after[1].text, "edited");
        assert_eq!(before[1].text, "note 2");
        assert!(Arc::ptr_eq(&before[0], &after[0]));
        assert!(Arc::ptr_eq(&before[2], &after[2]));
        assert!(!Arc::ptr_eq(&before[1], &after[1]));
    }

    #[test]
    fn replace_matching_unknown_id_keeps_sequence_pointer() {
        let mut collection = notes(&[1, 2]);
        let before = collection.snapshot();

        let replaced = collection.replace_matching(99, |note| note.clone());

        assert!(!replaced);
        assert!(Arc::ptr_eq(&before, &collection.snapshot()));
    }

    #[test]
    fn from_records_rejects_duplicate_ids() {
        let err = Collection::from_records(vec![
            Note {
                id: 1,
                text: "a".to_string(),
            },
            Note {
                id: 1,
                text: "b".to_string(),
            },
        ])
        .expect_err("duplicate ids must be rejected");

        assert!(matches!(err, StoreError::DuplicateId { kind: "note", id: 1 }));
    }

    #[test]
    fn next_id_reports_exhausted_id_space() {
        let collection = notes(&[RecordId::MAX]);
        let err = collection.next_id().expect_err("no id above u64::MAX");
        assert!(matches!(err, StoreError::IdSpaceExhausted { kind: "note" }));
    }
}
