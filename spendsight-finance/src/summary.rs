//! Text rendering of a SpendingSummary.
//!
//! This block is the body of the insight prompt, so its wording is fixed.
//! Changing it changes what the model sees.

use spendsight_core::SpendingSummary;
use std::fmt::Write;

pub fn format_summary(summary: &SpendingSummary) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "Total spending: {:.2}", summary.total_spending);
    let _ = writeln!(out, "Average spending: {:.2}", summary.average_spending);
    out.push_str("Spending by category:\n");
    for (category, amount) in &summary.spending_by_category {
        let _ = writeln!(out, " - {}: {:.2}", category, amount);
    }
    out
}
