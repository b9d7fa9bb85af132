use serde_json::json;
use setshaba_portal::{PortalConfig, upcoming_events};

use crate::support::{build_store_or_exit, print_json, today_or_exit};

pub fn run(config: &PortalConfig, upcoming: bool, today: Option<String>, json_output: bool) {
    let store = build_store_or_exit(config);
    let today = today_or_exit(today.as_deref());

    let rows = if upcoming {
        upcoming_events(&store, today)
    } else {
        store.events().iter().cloned().collect()
    };

    if json_output {
        let payload = json!({
            "action": "events.list",
            "upcomingOnly": upcoming,
            "today": today,
            "count": rows.len(),
            "items": rows
        });
        print_json(&payload);
    } else {
        println!("setshaba events\n  Count: {}", rows.len());
        for event in rows {
            println!(
                "  - #{} {} {} {} @ {}",
                event.id, event.date, event.time, event.title, event.location
            );
        }
    }
}
