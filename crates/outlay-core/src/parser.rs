//! Natural-language expense parser
//!
//! Turns free text like "spent 250 on groceries yesterday" into a candidate
//! amount/category/date triple. Pure function, no stored state; the UI layer
//! runs it before constructing an expense. The three extractions are
//! independent: a missing amount does not block category or date.

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use crate::models::{Category, ParsedExpense};

/// Keyword fallback table, checked only when no known category name occurs
/// literally in the text. First label with a keyword hit wins.
const CATEGORY_KEYWORDS: [(&str, &[&str]); 8] = [
    (
        "food",
        &["food", "restaurant", "lunch", "dinner", "breakfast", "meal"],
    ),
    (
        "groceries",
        &["groceries", "grocery", "supermarket", "vegetables", "fruits"],
    ),
    (
        "transport",
        &[
            "transport", "cab", "taxi", "uber", "ola", "petrol", "fuel", "bus", "metro",
        ],
    ),
    (
        "entertainment",
        &["entertainment", "movie", "cinema", "concert", "game"],
    ),
    (
        "shopping",
        &["shopping", "clothes", "shoes", "amazon", "flipkart"],
    ),
    (
        "bills",
        &["bills", "electricity", "water", "internet", "mobile", "phone"],
    ),
    (
        "health",
        &["health", "medicine", "doctor", "hospital", "pharmacy"],
    ),
    ("others", &["others", "other", "miscellaneous"]),
];

/// Parse free text into a candidate expense
pub fn parse_expense(text: &str, categories: &[Category]) -> ParsedExpense {
    let input = text.to_lowercase();

    ParsedExpense {
        amount: extract_amount(&input),
        category_name: extract_category(&input, categories),
        date: Some(extract_date(&input)),
    }
}

fn extract_amount(input: &str) -> Option<f64> {
    // Ordered: an optional marker token before the number, then a bare
    // number with an optional trailing marker. First successful match wins.
    let patterns = [
        Regex::new(r"(?:spent|rs|rupees|inr)?\s*(\d+(?:\.\d+)?)").expect("valid regex"),
        Regex::new(r"(\d+(?:\.\d+)?)\s*(?:rupees|rs|inr)?").expect("valid regex"),
    ];

    for pattern in &patterns {
        if let Some(caps) = pattern.captures(input) {
            if let Ok(amount) = caps[1].parse::<f64>() {
                return Some(amount);
            }
        }
    }
    None
}

fn extract_date(input: &str) -> DateTime<Utc> {
    // Only "yesterday" is recognized; anything else, including text with no
    // date reference at all, resolves to the moment of parsing.
    if input.contains("yesterday") {
        Utc::now() - Duration::days(1)
    } else {
        Utc::now()
    }
}

fn extract_category(input: &str, categories: &[Category]) -> Option<String> {
    // Pass 1: literal occurrence of a known category name, supplied order,
    // returned verbatim.
    for category in categories {
        if input.contains(&category.name.to_lowercase()) {
            return Some(category.name.clone());
        }
    }

    // Pass 2: keyword fallback.
    for (label, keywords) in CATEGORY_KEYWORDS {
        for keyword in keywords {
            if input.contains(keyword) {
                return Some(label.to_string());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            icon: String::new(),
            color: String::new(),
        }
    }

    #[test]
    fn parses_amount_category_and_yesterday() {
        let categories = vec![category(1, "Food"), category(2, "Groceries")];
        let parsed = parse_expense("spent 250 on groceries yesterday", &categories);

        assert_eq!(parsed.amount, Some(250.0));
        // Exact-name match takes priority and returns the name verbatim.
        assert_eq!(parsed.category_name.as_deref(), Some("Groceries"));

        let date = parsed.date.expect("date always resolves");
        let yesterday = Utc::now() - Duration::days(1);
        assert!((date - yesterday).num_seconds().abs() < 5);
    }

    #[test]
    fn falls_back_to_keyword_table() {
        // No category named "Transport" supplied, so "uber" hits the
        // keyword table and yields the lowercase label.
        let categories = vec![category(1, "Food")];
        let parsed = parse_expense("rs 99 uber", &categories);

        assert_eq!(parsed.amount, Some(99.0));
        assert_eq!(parsed.category_name.as_deref(), Some("transport"));

        let date = parsed.date.expect("date always resolves");
        assert!((Utc::now() - date).num_seconds().abs() < 5);
    }

    #[test]
    fn fractional_amount_and_marker_token() {
        let parsed = parse_expense("rupees 49.50 pharmacy", &[]);
        assert_eq!(parsed.amount, Some(49.5));
        assert_eq!(parsed.category_name.as_deref(), Some("health"));
    }

    #[test]
    fn absent_extractions_do_not_block_each_other() {
        let parsed = parse_expense("bought something somewhere", &[]);
        assert_eq!(parsed.amount, None);
        assert_eq!(parsed.category_name, None);
        // Text with no date reference still resolves to now.
        assert!(parsed.date.is_some());
    }

    #[test]
    fn category_match_is_case_insensitive() {
        let categories = vec![category(1, "Bills")];
        let parsed = parse_expense("Paid 1200 for BILLS", &categories);
        assert_eq!(parsed.amount, Some(1200.0));
        assert_eq!(parsed.category_name.as_deref(), Some("Bills"));
    }
}
