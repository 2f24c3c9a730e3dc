//! One-line summaries from title and description.

use marklens_core::Record;

/// Descriptions up to this many words are short enough to use verbatim.
const MAX_DESCRIPTION_WORDS: usize = 20;

/// Words taken from each of title and description when both are long.
const HEAD_WORDS: usize = 5;

/// Produce a one-line summary for a record.
///
/// Fields: `one_line_summary` and `one_line_summary_reason`.
pub fn summarize(record: &mut Record) {
    let title = record.title().to_string();
    let description = record.description().to_string();
    let short_description = !description.is_empty()
        && description.split_whitespace().count() <= MAX_DESCRIPTION_WORDS;

    let (summary, reason) = if short_description {
        (collapse(&description), "Used description")
    } else if !title.is_empty() && !description.is_empty() {
        let head: Vec<&str> = title
            .split_whitespace()
            .take(HEAD_WORDS)
            .chain(description.split_whitespace().take(HEAD_WORDS))
            .collect();
        (head.join(" "), "Used title and description")
    } else if !title.is_empty() {
        (collapse(&title), "Used title")
    } else if !description.is_empty() {
        (collapse(&description), "Used description")
    } else {
        (String::new(), "No title or description available")
    };

    record.annotate("one_line_summary", summary);
    record.annotate("one_line_summary_reason", reason);
}

/// Collapse runs of whitespace into single spaces.
fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(title: &str, description: &str) -> Record {
        serde_json::from_value(json!({ "title": title, "description": description })).unwrap()
    }

    #[test]
    fn short_description_is_used_verbatim() {
        let mut r = rec("Anything", "Concise   notes about\tborrow checking");
        summarize(&mut r);
        assert_eq!(r.field("one_line_summary"), "Concise notes about borrow checking");
        assert_eq!(r.field("one_line_summary_reason"), "Used description");
    }

    #[test]
    fn long_description_combines_heads() {
        let long = "one two three four five six seven eight nine ten \
                    eleven twelve thirteen fourteen fifteen sixteen seventeen \
                    eighteen nineteen twenty twentyone";
        let mut r = rec("Alpha beta gamma delta epsilon zeta", long);
        summarize(&mut r);
        assert_eq!(
            r.field("one_line_summary"),
            "Alpha beta gamma delta epsilon one two three four five"
        );
        assert_eq!(r.field("one_line_summary_reason"), "Used title and description");
    }

    #[test]
    fn title_alone_is_used() {
        let mut r = rec("Just a title", "");
        summarize(&mut r);
        assert_eq!(r.field("one_line_summary"), "Just a title");
        assert_eq!(r.field("one_line_summary_reason"), "Used title");
    }

    #[test]
    fn long_description_without_title_is_still_used() {
        let long = "one two three four five six seven eight nine ten \
                    eleven twelve thirteen fourteen fifteen sixteen seventeen \
                    eighteen nineteen twenty twentyone";
        let mut r = rec("", long);
        summarize(&mut r);
        assert!(r.field("one_line_summary").starts_with("one two three"));
        assert_eq!(r.field("one_line_summary_reason"), "Used description");
    }

    #[test]
    fn nothing_available() {
        let mut r = rec("", "");
        summarize(&mut r);
        assert_eq!(r.field("one_line_summary"), "");
        assert_eq!(
            r.field("one_line_summary_reason"),
            "No title or description available"
        );
    }
}
