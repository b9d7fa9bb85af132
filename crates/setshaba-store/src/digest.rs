//! Content-addressed references to store state.

use sha2::{Digest, Sha256};

use crate::store::CommunityStore;

pub const SNAPSHOT_REF_PREFIX: &str = "setshaba.snapshot:";

/// Deterministic reference over the four collections and the admin flag.
///
/// Two stores have the same ref exactly when their canonical JSON matches.
pub fn snapshot_ref(store: &CommunityStore) -> String {
    let canonical = serde_json::to_vec(store).expect("store snapshot should serialize");
    let hash = Sha256::digest(&canonical);
    format!("{SNAPSHOT_REF_PREFIX}{hash:x}")
}
