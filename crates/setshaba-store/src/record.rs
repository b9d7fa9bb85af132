//! Record identity shared by every collection.

use std::fmt::Debug;

/// Integer identifier of a record within its collection.
pub type RecordId = u64;

/// Id assigned to the first record of an empty collection.
pub const FIRST_RECORD_ID: RecordId = 1;

/// A record kind held by a [`crate::Collection`].
///
/// A record is built from its draft (the record minus its id) once the
/// collection has assigned an id.
pub trait Record: Clone + Debug {
    /// Record fields without the id.
    type Draft;

    /// Collection name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;
}
