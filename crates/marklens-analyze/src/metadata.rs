//! Generic-metadata detection.
//!
//! Flags titles and descriptions that read as browser or site boilerplate
//! rather than something the user wrote or chose deliberately.

use marklens_core::Record;

/// Titles that read as browser or site boilerplate.
const GENERIC_TITLES: &[&str] = &[
    "new tab",
    "untitled",
    "example page",
    "homepage",
    "home",
    "index",
    "default",
];

/// Placeholder descriptions.
const GENERIC_DESCRIPTIONS: &[&str] = &["n/a", "none", "no description", "...", "lorem ipsum"];

/// Words that mark a short title as intentional rather than vague.
const CONTENT_WORDS: &[&str] = &["blog", "news", "guide", "tips"];

/// Flag a record whose metadata looks generic or placeholder.
///
/// Fields: `broken_metadata` ("Yes"/"No") and `reason`.
pub fn audit_metadata(record: &mut Record) {
    let title = record.title().trim().to_string();
    let description = record.description().trim().to_string();
    let title_lower = title.to_lowercase();
    let desc_lower = description.to_lowercase();

    let mut reasons: Vec<&str> = Vec::new();

    if contains_any(&title_lower, GENERIC_TITLES) {
        reasons.push("Generic or placeholder title");
    }
    if desc_lower.is_empty() || contains_any(&desc_lower, GENERIC_DESCRIPTIONS) {
        reasons.push("Generic or missing description");
    }
    if !title.is_empty() && title_lower == desc_lower {
        reasons.push("Description identical to title");
    }
    let short = title.split_whitespace().count() <= 2;
    if short && !contains_any(&title_lower, CONTENT_WORDS) {
        reasons.push("Title too short or vague");
    }

    if reasons.is_empty() {
        record.annotate("broken_metadata", "No");
        record.annotate("reason", "Looks OK");
    } else {
        record.annotate("broken_metadata", "Yes");
        record.annotate("reason", reasons.join("; "));
    }
}

fn contains_any(text: &str, table: &[&str]) -> bool {
    table.iter().any(|needle| text.contains(needle))
}
