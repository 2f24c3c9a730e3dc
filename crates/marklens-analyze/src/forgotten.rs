//! Staleness scoring from the date a bookmark was added.

use chrono::{NaiveDate, Utc};
use marklens_core::Record;
use serde_json::Value;

/// Hosts that suggest a test or throwaway bookmark.
const GENERIC_DOMAINS: &[&str] = &["localhost", "example.com"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Label how forgotten a bookmark looks from its age and metadata.
///
/// Fields: `forgotten_score` (label), `forgotten_score_reason`, and
/// `days_old` (integer, or null when the date is missing or unparseable).
pub fn score_forgotten(record: &mut Record) {
    let mut reasons: Vec<&str> = Vec::new();
    let mut label = "Recently Added";
    let mut days_old: Option<i64> = None;

    let date_str = record.date_added();
    if date_str.is_empty() {
        reasons.push("No date provided");
    } else {
        match NaiveDate::parse_from_str(date_str, DATE_FORMAT) {
            Ok(added) => {
                let age = (Utc::now().date_naive() - added).num_days();
                days_old = Some(age);
                if age > 365 * 10 {
                    label = "Extremely Forgotten";
                    reasons.push("Added over 10 years ago");
                } else if age > 365 * 5 {
                    label = "Likely Forgotten";
                    reasons.push("Added over 5 years ago");
                } else if age > 365 * 2 {
                    label = "Possibly Forgotten";
                    reasons.push("Added over 2 years ago");
                } else {
                    reasons.push("Added within 2 years");
                }
            }
            Err(_) => reasons.push("Invalid date format"),
        }
    }

    if record.description().is_empty() {
        reasons.push("No description");
    }

    if let Some(domain) = domain_of(record.url())
        && GENERIC_DOMAINS.contains(&domain)
    {
        reasons.push("Generic domain");
    }

    record.annotate("forgotten_score", label);
    record.annotate("forgotten_score_reason", reasons.join("; "));
    match days_old {
        Some(age) => record.annotate("days_old", age),
        None => record.annotate("days_old", Value::Null),
    }
}

/// The host component of a URL, without any port.
fn domain_of(url: &str) -> Option<&str> {
    let rest = url.split_once("//")?.1;
    let host = rest.split('/').next()?;
    let host = host.split('@').next_back()?;
    Some(host.split(':').next().unwrap_or(host))
}
