use serde_json::json;
use setshaba_portal::{DashboardView, PortalConfig};
use setshaba_store::FeedbackStatus;

use crate::support::{build_store_or_exit, print_json, today_or_exit};

pub fn run(config: &PortalConfig, today: Option<String>, json_output: bool) {
    let store = build_store_or_exit(config);
    let today = today_or_exit(today.as_deref());
    let view = DashboardView::build(&store, today, &config.display);

    if json_output {
        let payload = json!({
            "action": "dashboard",
            "today": today,
            "dashboard": view
        });
        print_json(&payload);
        return;
    }

    let stats = view.stats;
    println!(
        "setshaba dashboard\n  Total issues: {}\n  Active: {}\n  Resolved: {}\n  Pending feedback: {}\n  Upcoming events: {}",
        stats.total_issues,
        stats.active_issues,
        stats.resolved_issues,
        stats.pending_feedback,
        stats.upcoming_events
    );
    println!("  Urgent issues: {}", view.urgent_issues.len());
    for issue in &view.urgent_issues {
        println!("    - #{} [{}] {}", issue.id, issue.status.as_str(), issue.title);
    }
    println!("  Recent issues:");
    for issue in &view.recent_issues {
        println!(
            "    - #{} [{} {}%] {}",
            issue.id,
            issue.status.as_str(),
            issue.progress,
            issue.title
        );
    }
    println!("  Recent feedback:");
    for feedback in &view.recent_feedback {
        let subject = if feedback.is_general() {
            "general".to_string()
        } else {
            format!("issue #{}", feedback.issue_id)
        };
        println!(
            "    - #{} {} ({subject}) [{}]",
            feedback.id,
            feedback.name,
            feedback.status.as_str()
        );
    }
    for status in FeedbackStatus::ALL {
        println!("  {}: {}", status.as_str(), view.feedback.column(status).len());
    }
}
