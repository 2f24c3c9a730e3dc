//! Priority scoring from keyword weights, folder, and recency.

use chrono::{NaiveDate, Utc};
use marklens_core::Record;

/// Keyword → weight, matched on word boundaries.
const KEYWORD_WEIGHTS: &[(&str, i32)] = &[
    ("docs", 30),
    ("documentation", 30),
    ("guide", 30),
    ("reference", 25),
    ("urgent", 40),
    ("important", 30),
    ("deadline", 25),
    ("joke", -10),
    ("meme", -10),
    ("funny", -10),
    ("entertainment", -10),
    ("inspiration", -5),
    ("quote", -5),
];

const PRIORITY_FOLDERS: &[&str] = &["work", "research", "projects", "admin"];
const ARCHIVE_FOLDERS: &[&str] = &["archived", "old", "misc"];

/// Cap each keyword's influence to avoid runaway scores.
const MAX_HITS_PER_KEYWORD: usize = 3;

const MIN_SCORE: i32 = -20;
const MAX_SCORE: i32 = 100;

/// Label a record High / Medium / Low priority.
///
/// Fields: `priority_score` (label) and `priority_score_reason`.
pub fn score_priority(record: &mut Record) {
    let text = format!("{} {}", record.title(), record.description()).to_lowercase();
    let mut score = 0i32;
    let mut reasons: Vec<String> = Vec::new();

    for (keyword, weight) in KEYWORD_WEIGHTS {
        let hits = word_hits(&text, keyword);
        if hits > 0 {
            score += weight * hits.min(MAX_HITS_PER_KEYWORD) as i32;
            reasons.push(format!("{hits}x '{keyword}' ({weight:+} each)"));
        }
    }

    let folder = record.folder_name().to_lowercase();
    if PRIORITY_FOLDERS.contains(&folder.as_str()) {
        score += 12;
        reasons.push(format!("Productivity folder: '{folder}'"));
    } else if ARCHIVE_FOLDERS.contains(&folder.as_str()) {
        score -= 30;
        reasons.push(format!("Archived folder: '{folder}'"));
    }

    if let Ok(added) = NaiveDate::parse_from_str(record.date_added(), "%Y-%m-%d") {
        let age = (Utc::now().date_naive() - added).num_days();
        if age <= 365 {
            score += 28;
            reasons.push("Recent (< 1 year)".to_string());
        } else if age > 1825 {
            score -= 15;
            reasons.push("Very old (> 5 years)".to_string());
        } else {
            reasons.push("Moderately old".to_string());
        }
    }

    let score = score.clamp(MIN_SCORE, MAX_SCORE);
    record.annotate("priority_score", label_for(score));
    record.annotate(
        "priority_score_reason",
        if reasons.is_empty() {
            "No strong signals".to_string()
        } else {
            reasons.join("; ")
        },
    );
}

fn label_for(score: i32) -> &'static str {
    if score >= 50 {
        "High"
    } else if score >= 10 {
        "Medium"
    } else {
        "Low"
    }
}

/// Occurrences of `word` in `text` bounded by non-alphanumeric characters.
///
/// Both inputs are expected lowercased; keywords are ASCII.
fn word_hits(text: &str, word: &str) -> usize {
    let mut count = 0;
    let mut from = 0;
    while let Some(pos) = text[from..].find(word) {
        let begin = from + pos;
        let end = begin + word.len();
        let left_ok = !text[..begin]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric);
        let right_ok = !text[end..].chars().next().is_some_and(char::is_alphanumeric);
        if left_ok && right_ok {
            count += 1;
        }
        from = begin + word.len();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn word_hits_respects_boundaries() {
        // "docs" inside "products" must not count.
        assert_eq!(word_hits("products and docs", "docs"), 1);
        assert_eq!(word_hits("products", "docs"), 0);
        assert_eq!(word_hits("docs, docs; docs", "docs"), 3);
        assert_eq!(word_hits("endocsine", "docs"), 0);
    }

    #[test]
    fn keyword_weights_accumulate() {
        let mut r = rec(json!({ "title": "urgent docs", "description": "project deadline" }));
        score_priority(&mut r);
        // 40 + 30 + 25 = 95 → High.
        assert_eq!(r.field("priority_score"), "High");
        let reason = r.field("priority_score_reason");
        assert!(reason.contains("1x 'urgent' (+40 each)"));
        assert!(reason.contains("1x 'docs' (+30 each)"));
        assert!(reason.contains("1x 'deadline' (+25 each)"));
    }

    #[test]
    fn keyword_influence_is_capped() {
        let mut r = rec(json!({
            "title": "docs docs docs docs docs",
            "description": "",
        }));
        score_priority(&mut r);
        // Five hits, three counted: 90 → High, but the reason reports all five.
        assert_eq!(r.field("priority_score"), "High");
        assert!(r.field("priority_score_reason").contains("5x 'docs'"));
    }

    #[test]
    fn archive_folder_drags_the_score_down() {
        let mut r = rec(json!({
            "title": "old meeting notes",
            "folder_name": "archived",
        }));
        score_priority(&mut r);
        assert_eq!(r.field("priority_score"), "Low");
        assert!(r.field("priority_score_reason").contains("Archived folder: 'archived'"));
    }

    #[test]
    fn productivity_folder_and_recency_lift_the_score() {
        let date = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let mut r = rec(json!({
            "title": "sprint notes",
            "folder_name": "Work",
            "date_added": date,
        }));
        score_priority(&mut r);
        // 12 + 28 = 40 → Medium.
        assert_eq!(r.field("priority_score"), "Medium");
        let reason = r.field("priority_score_reason");
        assert!(reason.contains("Productivity folder: 'work'"));
        assert!(reason.contains("Recent (< 1 year)"));
    }

    #[test]
    fn negative_keywords_push_low() {
        let mut r = rec(json!({ "title": "funny meme", "description": "joke" }));
        score_priority(&mut r);
        assert_eq!(r.field("priority_score"), "Low");
    }

    #[test]
    fn no_signals_at_all() {
        let mut r = rec(json!({ "title": "various things" }));
        score_priority(&mut r);
        assert_eq!(r.field("priority_score"), "Low");
        assert_eq!(r.field("priority_score_reason"), "No strong signals");
    }
}
