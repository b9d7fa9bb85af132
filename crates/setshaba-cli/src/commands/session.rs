use serde_json::json;
use setshaba_portal::{PortalConfig, SessionStep, read_actions, run_session};
use setshaba_store::write_journal_to_path;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use crate::support::{build_portal_or_exit, now_or_exit, print_json};

pub fn run(
    config: PortalConfig,
    script: String,
    journal_out: Option<PathBuf>,
    at: Option<String>,
    json_output: bool,
) {
    let now = now_or_exit(at.as_deref());
    let reader: Box<dyn BufRead> = if script == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&script).unwrap_or_else(|e| {
            eprintln!("error: failed to open {script}: {e}");
            std::process::exit(1);
        });
        Box::new(BufReader::new(file))
    };
    let actions = read_actions(reader).unwrap_or_else(|e| {
        eprintln!("error: {script}: {e}");
        std::process::exit(1);
    });

    tracing::info!(script = %script, actions = actions.len(), "session script loaded");

    let mut portal = build_portal_or_exit(config);
    let steps = run_session(&mut portal, actions, now);
    let (store, journal) = portal.into_parts();
    let changed = journal
        .events()
        .iter()
        .filter(|event| event.outcome.changed_state())
        .count();

    if let Some(path) = &journal_out {
        if let Err(e) = write_journal_to_path(path, journal.events()) {
            eprintln!("error: failed to write {}: {e}", path.display());
            std::process::exit(1);
        }
    }

    if json_output {
        let payload = json!({
            "action": "session",
            "script": script,
            "steps": steps,
            "mutations": journal.len(),
            "changed": changed,
            "journalPath": journal_out.as_ref().map(|p| p.display().to_string()),
            "snapshotRef": store.snapshot_ref(),
            "isAdmin": store.is_admin()
        });
        print_json(&payload);
    } else {
        println!(
            "setshaba session\n  Script: {}\n  Steps: {}\n  Mutations: {} ({} changed state)",
            script,
            steps.len(),
            journal.len(),
            changed
        );
        for SessionStep {
            line,
            action,
            notice,
        } in &steps
        {
            let marker = if notice.is_destructive() { "!" } else { "-" };
            println!("  {marker} line {line} {action}: {notice}");
        }
        if let Some(path) = &journal_out {
            println!("  Journal: {}", path.display());
        }
        println!("  Snapshot: {}", store.snapshot_ref());
    }
}
