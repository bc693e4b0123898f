//! Deterministic keyword rules mapping merchant names to a Category.
//!
//! Rules are checked in order and the first keyword hit wins. Anything
//! that matches no rule is `Other`.

use spendsight_core::{Category, TransactionRecord};

/// One keyword set and the category it assigns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub keywords: &'static [&'static str],
    pub category: Category,
}

impl CategoryRule {
    /// `merchant` must already be lowercased
    fn matches(&self, merchant: &str) -> bool {
        self.keywords.iter().any(|kw| merchant.contains(kw))
    }
}

/// Priority-ordered rule table
pub const RULES: [CategoryRule; 4] = [
    CategoryRule {
        keywords: &["walmart", "supermarket", "grocery"],
        category: Category::Groceries,
    },
    CategoryRule {
        keywords: &["electric", "water", "utility", "gas"],
        category: Category::Utilities,
    },
    CategoryRule {
        keywords: &["cinema", "movie", "netflix", "concert"],
        category: Category::Entertainment,
    },
    CategoryRule {
        keywords: &["uber", "taxi", "lyft"],
        category: Category::RideShare,
    },
];

/// Categorize a merchant string.
pub fn categorize(merchant: &str) -> Category {
    let merchant = merchant.trim().to_lowercase();
    if merchant.is_empty() {
        return Category::Other;
    }

    RULES
        .iter()
        .find(|rule| rule.matches(&merchant))
        .map(|rule| rule.category)
        .unwrap_or(Category::Other)
}

/// Assign a category to every record. Existing categories are recomputed
/// from the merchant, so running this twice gives the same result.
pub fn categorize_all(records: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
    records
        .into_iter()
        .map(|r| {
            let category = categorize(&r.merchant);
            r.with_category(category)
        })
        .collect()
}
