//! Finance record types for the spending pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single ledger row, in source order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    /// Date of the transaction, when the source has a `Date` column
    pub date: Option<NaiveDate>,
    /// Free-text counterparty, the only categorization signal
    pub merchant: String,
    /// Amount spent
    pub amount: f64,
    /// `None` until the categorizer runs
    pub category: Option<Category>,
}

/// Spending categories, declared in rule priority order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Utilities")]
    Utilities,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Ride Share")]
    RideShare,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Groceries,
        Category::Utilities,
        Category::Entertainment,
        Category::RideShare,
        Category::Other,
    ];

    /// Human-readable label used in summaries and the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::RideShare => "Ride Share",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TransactionRecord {
    /// Create an uncategorized record
    pub fn new(date: Option<NaiveDate>, merchant: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            merchant: merchant.into(),
            amount,
            category: None,
        }
    }

    /// Copy of this record with the category set
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn is_categorized(&self) -> bool {
        self.category.is_some()
    }
}

/// Aggregate statistics for one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpendingSummary {
    pub total_spending: f64,
    pub average_spending: f64,
    /// Only categories with at least one transaction
    pub spending_by_category: BTreeMap<Category, f64>,
    pub transaction_count: usize,
}

impl SpendingSummary {
    /// Sum of the per-category totals; equals `total_spending` up to rounding
    pub fn category_sum(&self) -> f64 {
        self.spending_by_category.values().sum()
    }
}

/// What the pipeline hands to presentation: categorized rows plus the insight text
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub records: Vec<TransactionRecord>,
    pub insights: String,
}
