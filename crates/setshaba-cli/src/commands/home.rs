use serde_json::json;
use setshaba_portal::{HomeView, PortalConfig};

use crate::support::{build_store_or_exit, print_json};

pub fn run(config: &PortalConfig, json_output: bool) {
    let store = build_store_or_exit(config);
    let view = HomeView::build(&store, &config.display);

    if json_output {
        let payload = json!({
            "action": "home",
            "home": view
        });
        print_json(&payload);
        return;
    }

    let stats = view.stats;
    println!(
        "setshaba home\n  Total issues: {}\n  Urgent: {}\n  In progress: {}\n  Resolved: {}",
        stats.total_issues, stats.urgent_issues, stats.in_progress, stats.resolved
    );
    println!("  Recent issues:");
    for issue in &view.recent_issues {
        println!("    - #{} [{}] {}", issue.id, issue.status.as_str(), issue.title);
    }
    println!("  Announcements:");
    for announcement in &view.recent_announcements {
        let marker = if announcement.is_urgent { "!" } else { "-" };
        println!("    {marker} {}", announcement.title);
    }
}
