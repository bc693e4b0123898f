//! Spending aggregation over categorized records

use spendsight_core::{Category, Error, Result, SpendingSummary, TransactionRecord};
use std::collections::BTreeMap;
use tracing::debug;

use crate::category_rules::categorize;

/// Sum of all amounts; 0.0 for an empty slice
pub fn total_spending(records: &[TransactionRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Per-category sums. Categories with no transactions are absent.
/// Records that were never categorized are categorized on the fly.
pub fn spending_by_category(records: &[TransactionRecord]) -> BTreeMap<Category, f64> {
    let mut by_cat: BTreeMap<Category, f64> = BTreeMap::new();
    for r in records {
        let category = r.category.unwrap_or_else(|| categorize(&r.merchant));
        *by_cat.entry(category).or_insert(0.0) += r.amount;
    }
    by_cat
}

/// Build the full summary. An empty slice is an error rather than a NaN average.
pub fn summarize(records: &[TransactionRecord]) -> Result<SpendingSummary> {
    if records.is_empty() {
        return Err(Error::EmptyInput);
    }

    let total = total_spending(records);
    let count = records.len();
    let summary = SpendingSummary {
        total_spending: total,
        average_spending: total / count as f64,
        spending_by_category: spending_by_category(records),
        transaction_count: count,
    };

    debug!(
        total = summary.total_spending,
        categories = summary.spending_by_category.len(),
        "summarized spending"
    );
    Ok(summary)
}
