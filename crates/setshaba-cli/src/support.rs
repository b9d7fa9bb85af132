use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use serde::Serialize;
use setshaba_portal::{EVENT_DATE_FORMAT, Portal, PortalConfig};
use setshaba_store::CommunityStore;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

pub fn load_config_or_exit(path: Option<&Path>) -> PortalConfig {
    PortalConfig::discover(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn build_store_or_exit(config: &PortalConfig) -> CommunityStore {
    config.build_store().unwrap_or_else(|e| {
        eprintln!("error: failed to build store: {e}");
        std::process::exit(1);
    })
}

pub fn build_portal_or_exit(config: PortalConfig) -> Portal {
    Portal::from_config(config).unwrap_or_else(|e| {
        eprintln!("error: failed to build portal: {e}");
        std::process::exit(1);
    })
}

pub fn parse_or_exit<T>(what: &str, raw: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().unwrap_or_else(|e| {
        eprintln!("error: invalid {what}: {e}");
        std::process::exit(1);
    })
}

pub fn today_or_exit(raw: Option<&str>) -> NaiveDate {
    match raw {
        Some(raw) => NaiveDate::parse_from_str(raw, EVENT_DATE_FORMAT).unwrap_or_else(|e| {
            eprintln!("error: invalid --today `{raw}`: {e}");
            std::process::exit(1);
        }),
        None => Local::now().date_naive(),
    }
}

pub fn now_or_exit(raw: Option<&str>) -> DateTime<FixedOffset> {
    match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw).unwrap_or_else(|e| {
            eprintln!("error: invalid --at `{raw}`: {e}");
            std::process::exit(1);
        }),
        None => Local::now().fixed_offset(),
    }
}

pub fn print_json(payload: &impl Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("json serialization")
    );
}
