//! Folder-level annotators: load heat and smarter folder names.

use std::collections::HashMap;

use marklens_core::Record;

use crate::tokens::words;

/// Bucket for records without a folder.
const UNKNOWN_FOLDER: &str = "Unknown";

/// Suggested names that would be no better than what the user already has.
const JUNK_SUGGESTIONS: &[&str] = &["default", "misc", "folder1", "unsorted", "bookmarks"];

/// Annotate each record with how loaded its folder is.
///
/// Fields: `folder_load_score` and `folder_load_score_reason`.
pub fn score_folder_heat(records: &mut [Record]) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records.iter() {
        *counts.entry(folder_key(record)).or_insert(0) += 1;
    }

    for record in records.iter_mut() {
        let folder = folder_key(record);
        let count = counts[&folder];
        record.annotate("folder_load_score", heat_level(count));
        record.annotate(
            "folder_load_score_reason",
            format!("Folder '{folder}' has {count} bookmark(s)"),
        );
    }
}

fn heat_level(count: usize) -> &'static str {
    match count {
        0..=4 => "Low",
        5..=15 => "Medium",
        16..=30 => "High",
        _ => "Very High",
    }
}

/// Suggest a better folder name from the two most frequent content words.
///
/// Words come from each record's title and description; ties break to the
/// word seen first. Fields: `smarter_folder_name` (empty when no
/// suggestion) and `reason`.
pub fn suggest_folder_names(records: &mut [Record]) {
    // folder → (word, count), keeping first-seen word order for tie-breaks
    let mut folder_words: HashMap<String, Vec<(String, usize)>> = HashMap::new();
    for record in records.iter() {
        let text = format!("{} {}", record.title(), record.description());
        let entry = folder_words.entry(folder_key(record)).or_default();
        for word in words(&text) {
            match entry.iter_mut().find(|(seen, _)| *seen == word) {
                Some(slot) => slot.1 += 1,
                None => entry.push((word, 1)),
            }
        }
    }

    let mut suggestions: HashMap<String, String> = HashMap::new();
    for (folder, mut word_counts) in folder_words {
        if word_counts.is_empty() {
            continue;
        }
        // Stable sort: first-seen order survives equal counts.
        word_counts.sort_by(|a, b| b.1.cmp(&a.1));
        let name = word_counts
            .iter()
            .take(2)
            .map(|(word, _)| capitalize(word))
            .collect::<Vec<_>>()
            .join(" ");
        if !JUNK_SUGGESTIONS.contains(&name.to_lowercase().as_str()) {
            suggestions.insert(folder, name);
        }
    }

    for record in records.iter_mut() {
        let folder = folder_key(record);
        match suggestions.get(&folder) {
            Some(name) => {
                record.annotate("smarter_folder_name", name.as_str());
                record.annotate("reason", "Based on bookmark content");
            }
            None => {
                record.annotate("smarter_folder_name", "");
                record.annotate("reason", "No suggestion");
            }
        }
    }
}

fn folder_key(record: &Record) -> String {
    match record.folder_name() {
        "" => UNKNOWN_FOLDER.to_string(),
        name => name.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
