//! Folder-level outlier detection.
//!
//! Within each folder, every record gets a rarity score: the sum of
//! `1/frequency` over its normalised tokens, where frequency counts how many
//! records in the folder use the token. Tokens nobody else uses inflate the
//! score, so the maximum-rarity record is the one least similar to its
//! peers.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use marklens_core::Record;
use tracing::{debug, warn};

use crate::tokens::token_set;

/// Default wall-clock budget for one detection request.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(10);

/// Folders with fewer records than this cannot be compared meaningfully.
pub const MIN_GROUP_SIZE: usize = 3;

/// Bucket for records without a folder.
const UNKNOWN_FOLDER: &str = "Unknown";

const REASON_OUTLIER: &str = "least similar to others (heuristic)";
const REASON_NORMAL: &str = "similar to others (heuristic)";
const REASON_SMALL_GROUP: &str = "not enough data to evaluate";
const REASON_TIME_LIMIT: &str = "time limit reached";
const REASON_NO_TEXT: &str = "no usable text to compare";

/// Annotate each record with an outlier verdict relative to its folder peers.
///
/// Records are grouped by `folder_name` (`"Unknown"` when absent) and the
/// output is flattened group by group in first-seen order, not the original
/// flat order. The deadline is checked only between groups:
/// a pathologically large single group is scored to completion once started.
/// Once the deadline passes, all remaining records are marked "normal" with
/// a "time limit reached" reason (fail-open).
pub fn detect_outliers(records: Vec<Record>, deadline: Instant) -> Vec<Record> {
    let total = records.len();
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<Record>> = HashMap::new();

    for record in records {
        let folder = match record.folder_name() {
            "" => UNKNOWN_FOLDER.to_string(),
            name => name.to_string(),
        };
        groups
            .entry(folder)
            .or_insert_with_key(|key| {
                order.push(key.clone());
                Vec::new()
            })
            .push(record);
    }

    let mut out = Vec::with_capacity(total);
    let mut expired = false;

    for folder in &order {
        let mut group = groups.remove(folder).unwrap_or_default();

        if !expired && Instant::now() >= deadline {
            warn!(folder = %folder, "time budget exhausted; remaining groups fall back to normal");
            expired = true;
        }
        if expired {
            annotate_all(&mut group, REASON_TIME_LIMIT);
            out.append(&mut group);
            continue;
        }

        if group.len() < MIN_GROUP_SIZE {
            annotate_all(&mut group, REASON_SMALL_GROUP);
            out.append(&mut group);
            continue;
        }

        match score_group(&group) {
            Ok(outlier_index) => {
                debug!(folder = %folder, outlier_index, "flagged folder outlier");
                for (i, record) in group.iter_mut().enumerate() {
                    if i == outlier_index {
                        annotate(record, "outlier", REASON_OUTLIER);
                    } else {
                        annotate(record, "normal", REASON_NORMAL);
                    }
                }
            }
            Err(reason) => {
                // A degraded group never aborts the batch.
                warn!(folder = %folder, reason, "outlier scoring degraded");
                annotate_all(&mut group, reason);
            }
        }
        out.append(&mut group);
    }

    out
}

/// Index of the record with the highest rarity score.
///
/// Ties break to the lowest index: the strict `>` while scanning in order
/// keeps the first maximal element.
fn score_group(group: &[Record]) -> Result<usize, &'static str> {
    let token_sets: Vec<HashSet<String>> = group.iter().map(record_tokens).collect();

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for tokens in &token_sets {
        for token in tokens {
            *frequency.entry(token.as_str()).or_insert(0) += 1;
        }
    }
    if frequency.is_empty() {
        return Err(REASON_NO_TEXT);
    }

    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (index, tokens) in token_sets.iter().enumerate() {
        let score: f64 = tokens
            .iter()
            .map(|t| frequency.get(t.as_str()).map_or(0.0, |&f| 1.0 / f as f64))
            .sum();
        if score > best_score {
            best = index;
            best_score = score;
        }
    }
    Ok(best)
}

fn record_tokens(record: &Record) -> HashSet<String> {
    let text = format!(
        "{} {} {}",
        record.title(),
        record.description(),
        record.url_content()
    );
    token_set(&text)
}

fn annotate(record: &mut Record, status: &str, reason: &str) {
    record.annotate("outlier_status", status);
    record.annotate("outlier_reason", reason);
}

fn annotate_all(group: &mut [Record], reason: &str) {
    for record in group.iter_mut() {
        annotate(record, "normal", reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(folder: &str, title: &str, description: &str) -> Record {
        serde_json::from_value(json!({
            "folder_name": folder,
            "title": title,
            "description": description,
        }))
        .unwrap()
    }

    fn far_deadline() -> Instant {
        Instant::now() + DEFAULT_TIME_BUDGET
    }

    fn statuses(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.field("outlier_status")).collect()
    }

    #[test]
    fn small_groups_are_all_normal() {
        let records = vec![
            rec("Dev", "rust ownership", "borrow checker"),
            rec("Dev", "rust lifetimes", "borrow checker"),
        ];
        let out = detect_outliers(records, far_deadline());

        assert_eq!(statuses(&out), vec!["normal", "normal"]);
        for r in &out {
            assert_eq!(r.field("outlier_reason"), "not enough data to evaluate");
        }
    }

    #[test]
    fn exactly_one_outlier_per_eligible_group() {
        let records = vec![
            rec("Dev", "rust compiler internals", "lexer parser codegen"),
            rec("Dev", "rust macro guide", "lexer parser hygiene"),
            rec("Dev", "rust parser tricks", "lexer codegen hygiene"),
            rec("Dev", "sourdough starter", "flour hydration levain"),
        ];
        let out = detect_outliers(records, far_deadline());

        let outliers: Vec<&Record> = out
            .iter()
            .filter(|r| r.field("outlier_status") == "outlier")
            .collect();
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].title(), "sourdough starter");
        assert_eq!(
            outliers[0].field("outlier_reason"),
            "least similar to others (heuristic)"
        );

        let normal = out
            .iter()
            .filter(|r| r.field("outlier_status") == "normal")
            .count();
        assert_eq!(normal, 3);
    }

    #[test]
    fn detection_is_idempotent() {
        let records = vec![
            rec("Dev", "rust compiler internals", "lexer parser codegen"),
            rec("Dev", "rust macro guide", "lexer parser hygiene"),
            rec("Dev", "sourdough starter", "flour hydration levain"),
            rec("Food", "pizza dough", "yeast flour water"),
            rec("Food", "neapolitan pizza", "yeast flour oven"),
            rec("Food", "quantum computing", "qubits entanglement"),
        ];
        let first = detect_outliers(records.clone(), far_deadline());
        let second = detect_outliers(records, far_deadline());
        assert_eq!(statuses(&first), statuses(&second));
    }

    #[test]
    fn ties_break_to_the_first_record() {
        // Three identical records: all scores equal, index 0 wins.
        let records = vec![
            rec("Same", "identical text", "identical body"),
            rec("Same", "identical text", "identical body"),
            rec("Same", "identical text", "identical body"),
        ];
        let out = detect_outliers(records, far_deadline());
        assert_eq!(statuses(&out), vec!["outlier", "normal", "normal"]);
    }

    #[test]
    fn output_is_grouped_by_folder_first_seen_order() {
        let records = vec![
            rec("A", "first", ""),
            rec("B", "second", ""),
            rec("A", "third", ""),
        ];
        let out = detect_outliers(records, far_deadline());

        let folders: Vec<&str> = out.iter().map(Record::folder_name).collect();
        assert_eq!(folders, vec!["A", "A", "B"]);
        let titles: Vec<&str> = out.iter().map(Record::title).collect();
        assert_eq!(titles, vec!["first", "third", "second"]);
    }

    #[test]
    fn missing_folder_lands_in_unknown_bucket() {
        let records = vec![
            serde_json::from_value(json!({ "title": "no folder here" })).unwrap(),
            rec("", "empty folder name", ""),
        ];
        let out = detect_outliers(records, far_deadline());
        // Both fall in the same "Unknown" group of two → small group.
        assert_eq!(out.len(), 2);
        for r in &out {
            assert_eq!(r.field("outlier_reason"), "not enough data to evaluate");
        }
    }

    #[test]
    fn expired_deadline_fails_open() {
        let records = vec![
            rec("Dev", "rust compiler internals", "lexer parser codegen"),
            rec("Dev", "rust macro guide", "lexer parser hygiene"),
            rec("Dev", "sourdough starter", "flour hydration levain"),
        ];
        let past = Instant::now() - Duration::from_millis(1);
        let out = detect_outliers(records, past);

        assert_eq!(statuses(&out), vec!["normal", "normal", "normal"]);
        for r in &out {
            assert_eq!(r.field("outlier_reason"), "time limit reached");
        }
    }

    #[test]
    fn group_without_text_degrades_to_normal() {
        let records = vec![rec("Empty", "", ""), rec("Empty", "", ""), rec("Empty", "", "")];
        let out = detect_outliers(records, far_deadline());

        assert_eq!(statuses(&out), vec!["normal", "normal", "normal"]);
        for r in &out {
            assert_eq!(r.field("outlier_reason"), "no usable text to compare");
        }
    }

    #[test]
    fn unknown_fields_pass_through() {
        let records = vec![
            serde_json::from_value(json!({
                "folder_name": "Dev",
                "title": "rust book",
                "starred": true,
            }))
            .unwrap(),
            rec("Dev", "rust blog", ""),
        ];
        let out = detect_outliers(records, far_deadline());
        assert_eq!(out[0].get("starred"), Some(&json!(true)));
    }
}
