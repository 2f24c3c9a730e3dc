//! Text normalisation for similarity scoring.
//!
//! Tokens are lowercased words of three or more alphanumeric characters,
//! stopword-filtered, crudely stemmed ("ing"/"ed"/"s" suffixes), and mapped
//! through a static synonym table so near-synonyms score as the same term.

use std::collections::HashSet;

/// Words carrying no topical signal, dropped before scoring.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "your", "you", "are", "was", "has",
    "have", "how", "what", "when", "where", "why", "not", "all", "any", "can", "get", "its",
    "our", "out", "about", "into", "more", "most", "other", "some", "such", "than", "then",
    "there", "these", "they", "will", "were", "which", "while", "also", "best", "new", "top",
    "www", "http", "https", "com",
];

/// Domain terms folded into canonical topic buckets.
///
/// Keys are matched after stemming, so they are stored in stemmed form
/// ("bak" is what the stemmer leaves of "baking").
const SYNONYMS: &[(&str, &str)] = &[
    ("bitcoin", "crypto"),
    ("ethereum", "crypto"),
    ("blockchain", "crypto"),
    ("stock", "finance"),
    ("etf", "finance"),
    ("invest", "finance"),
    ("investment", "finance"),
    ("recipe", "cooking"),
    ("bak", "cooking"),
    ("bread", "cooking"),
    ("sourdough", "cooking"),
    ("workout", "fitness"),
    ("yoga", "fitness"),
    ("exercise", "fitness"),
    ("movie", "entertainment"),
    ("film", "entertainment"),
    ("netflix", "entertainment"),
    ("anime", "entertainment"),
    ("python", "programming"),
    ("javascript", "programming"),
    ("rust", "programming"),
    ("code", "programming"),
    ("cod", "programming"),
    ("flight", "travel"),
    ("hotel", "travel"),
    ("visa", "travel"),
    ("dog", "pets"),
    ("cat", "pets"),
    ("puppy", "pets"),
    ("tutorial", "guide"),
    ("manual", "guide"),
    ("howto", "guide"),
];

/// Lowercased words of three or more alphanumeric characters.
pub fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= 3)
        .map(str::to_string)
        .collect()
}

/// The normalised token set used for similarity scoring.
pub fn token_set(text: &str) -> HashSet<String> {
    let mut tokens = HashSet::new();
    for word in words(text) {
        if STOPWORDS.contains(&word.as_str()) {
            continue;
        }
        tokens.insert(canonicalize(stem(&word)).to_string());
    }
    tokens
}

/// Strip an "ing"/"ed"/"s" suffix when at least three characters remain.
fn stem(word: &str) -> &str {
    if let Some(s) = word.strip_suffix("ing")
        && s.len() >= 3
    {
        return s;
    }
    if let Some(s) = word.strip_suffix("ed")
        && s.len() >= 3
    {
        return s;
    }
    if let Some(s) = word.strip_suffix('s')
        && !s.ends_with('s')
        && s.len() >= 3
    {
        return s;
    }
    word
}

fn canonicalize(word: &str) -> &str {
    SYNONYMS
        .iter()
        .find(|(term, _)| *term == word)
        .map(|(_, bucket)| *bucket)
        .unwrap_or(word)
}
