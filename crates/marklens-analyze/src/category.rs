//! Topical category suggestion from a static keyword table.

use marklens_core::Record;

/// Category → keywords. Order matters: ties go to the earlier category.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Finance",
        &[
            "investment", "investments", "stocks", "stock", "etf", "crypto", "bitcoin", "nft",
            "budgeting", "tax", "retirement", "saving", "interest", "credit", "loan", "mortgage",
            "debt", "bank", "wallet", "salary", "freelance",
        ],
    ),
    (
        "Career",
        &["job", "internship", "resume", "interview", "linkedin", "negotiation", "promotion"],
    ),
    (
        "Food",
        &[
            "baking", "recipe", "sourdough", "bread", "vegan", "vegetarian", "keto", "glutenfree",
            "paleo", "snack", "dessert",
        ],
    ),
    (
        "Health",
        &[
            "fitness", "workout", "yoga", "meditation", "wellness", "diet", "mental", "anxiety",
            "sleep", "supplement",
        ],
    ),
    (
        "Travel",
        &["travel", "flight", "hotel", "visa", "passport", "itinerary", "roadtrip", "camping"],
    ),
    (
        "Entertainment",
        &["movie", "tv", "streaming", "netflix", "disney", "anime", "comic", "book"],
    ),
    (
        "Home",
        &["decor", "furniture", "appliance", "renovation", "storage", "kitchen", "bedroom", "bathroom"],
    ),
    (
        "Lifestyle",
        &["gardening", "plant", "outdoor", "balcony", "diy", "craft", "organization"],
    ),
    (
        "Relationships",
        &["dating", "marriage", "parenting", "friendship", "communication"],
    ),
    ("Pets", &["dog", "cat", "fish", "petcare", "grooming", "training"]),
    (
        "SelfHelp",
        &["productivity", "motivation", "goal", "habit", "journaling", "time"],
    ),
    (
        "Education",
        &["language", "course", "tutorial", "certificate", "university", "degree", "exam"],
    ),
    (
        "Tech",
        &["excel", "python", "javascript", "html", "css", "app", "software", "coding", "development"],
    ),
    (
        "Cyber",
        &["security", "antivirus", "vpn", "phishing", "password", "firewall"],
    ),
    (
        "Drinks",
        &["cocktail", "mocktail", "smoothie", "tea", "coffee", "juice"],
    ),
];

/// Suggest a topical folder from keyword hits over title + description.
///
/// Fields: `ai_folder_suggestion` and `reason` (comma-joined matched
/// keywords, or "No keyword match").
pub fn suggest_category(record: &mut Record) {
    let text = format!("{} {}", record.title(), record.description()).to_lowercase();

    let mut best: Option<(&str, Vec<&str>)> = None;
    for (category, keywords) in CATEGORY_KEYWORDS {
        let matched: Vec<&str> = keywords
            .iter()
            .copied()
            .filter(|kw| text.contains(*kw))
            .collect();
        if !matched.is_empty() && best.as_ref().is_none_or(|(_, m)| matched.len() > m.len()) {
            best = Some((*category, matched));
        }
    }

    match best {
        Some((category, matched)) => {
            record.annotate("ai_folder_suggestion", category);
            record.annotate("reason", matched.join(", "));
        }
        None => {
            record.annotate("ai_folder_suggestion", "Uncategorized");
            record.annotate("reason", "No keyword match");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(title: &str, description: &str) -> Record {
        serde_json::from_value(json!({ "title": title, "description": description })).unwrap()
    }

    #[test]
    fn highest_hit_count_wins() {
        let mut r = rec("Sourdough bread baking", "A recipe with one movie reference");
        suggest_category(&mut r);
        assert_eq!(r.field("ai_folder_suggestion"), "Food");
        let reason = r.field("reason");
        assert!(reason.contains("baking"));
        assert!(reason.contains("recipe"));
        assert!(reason.contains("sourdough"));
    }

    #[test]
    fn tie_goes_to_the_earlier_category() {
        // One Finance hit, one Career hit: Finance is listed first.
        let mut r = rec("stock interview", "");
        suggest_category(&mut r);
        assert_eq!(r.field("ai_folder_suggestion"), "Finance");
    }

    #[test]
    fn no_hits_is_uncategorized() {
        let mut r = rec("zzzz", "qqqq");
        suggest_category(&mut r);
        assert_eq!(r.field("ai_folder_suggestion"), "Uncategorized");
        assert_eq!(r.field("reason"), "No keyword match");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let mut r = rec("BITCOIN Wallet Setup", "");
        suggest_category(&mut r);
        assert_eq!(r.field("ai_folder_suggestion"), "Finance");
    }
}
