use serde_json::json;
use setshaba_portal::{IssueFilter, PortalConfig, StatusCounts, filter_issues};
use setshaba_store::{Category, IssueStatus};

use crate::support::{build_store_or_exit, parse_or_exit, print_json};

pub fn run(
    config: &PortalConfig,
    search: Option<String>,
    category: Option<String>,
    status: Option<String>,
    json_output: bool,
) {
    let filter = IssueFilter {
        search: search.unwrap_or_default(),
        category: category
            .as_deref()
            .map(|raw| parse_or_exit::<Category>("category", raw)),
        status: status
            .as_deref()
            .map(|raw| parse_or_exit::<IssueStatus>("status", raw)),
    };

    let store = build_store_or_exit(config);
    let rows = filter_issues(&store, &filter);
    let total = store.issues().len();
    let counts = StatusCounts::tally(&rows);

    if json_output {
        let payload = json!({
            "action": "issues.list",
            "filtered": filter.is_active(),
            "count": rows.len(),
            "total": total,
            "statusCounts": counts,
            "items": rows
        });
        print_json(&payload);
    } else {
        println!(
            "setshaba issues\n  Showing {} of {} issues\n  Reported: {}  In Progress: {}  Resolved: {}",
            rows.len(),
            total,
            counts.reported,
            counts.in_progress,
            counts.resolved
        );
        for issue in rows {
            let urgent = if issue.is_urgent { " URGENT" } else { "" };
            println!(
                "  - #{} [{} {}% {}{}] {} ({})",
                issue.id,
                issue.status.as_str(),
                issue.progress,
                issue.category,
                urgent,
                issue.title,
                issue.location
            );
        }
    }
}
