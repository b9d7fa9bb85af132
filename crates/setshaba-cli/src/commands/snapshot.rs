use serde_json::json;
use setshaba_portal::PortalConfig;

use crate::support::{build_store_or_exit, print_json};

pub fn run(config: &PortalConfig, json_output: bool) {
    let store = build_store_or_exit(config);
    let snapshot_ref = store.snapshot_ref();

    if json_output {
        let payload = json!({
            "action": "snapshot",
            "snapshotRef": snapshot_ref,
            "isAdmin": store.is_admin(),
            "counts": {
                "issues": store.issues().len(),
                "events": store.events().len(),
                "feedback": store.feedback().len(),
                "announcements": store.announcements().len()
            },
            "store": store
        });
        print_json(&payload);
    } else {
        println!(
            "setshaba snapshot\n  Ref: {}\n  Issues: {}\n  Events: {}\n  Feedback: {}\n  Announcements: {}\n  Admin mode: {}",
            snapshot_ref,
            store.issues().len(),
            store.events().len(),
            store.feedback().len(),
            store.announcements().len(),
            store.is_admin()
        );
    }
}
