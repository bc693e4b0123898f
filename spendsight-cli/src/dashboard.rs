//! Plain-text dashboard: transaction table, insight bullets, and a
//! horizontal bar chart of spending by category.

use spendsight_core::{Analysis, Category, TransactionRecord};
use spendsight_finance::{insight_bullets, spending_by_category};
use std::io::{self, Write};

const BAR_WIDTH: usize = 40;

/// Chart rows in category order, computed from the categorized records
pub fn chart_rows(records: &[TransactionRecord]) -> Vec<(Category, f64)> {
    spending_by_category(records).into_iter().collect()
}

/// Bar length in cells, scaled so the largest category fills `width`
fn bar_len(amount: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || amount <= 0.0 {
        return 0;
    }
    ((amount / max) * width as f64).round() as usize
}

pub fn write_table(out: &mut impl Write, records: &[TransactionRecord]) -> io::Result<()> {
    let merchant_w = records
        .iter()
        .map(|r| r.merchant.chars().count())
        .max()
        .unwrap_or(0)
        .max("Merchant".len());

    writeln!(
        out,
        "{:<10}  {:<merchant_w$}  {:>10}  {}",
        "Date", "Merchant", "Amount", "Category"
    )?;
    writeln!(out, "{}", "-".repeat(10 + 2 + merchant_w + 2 + 10 + 2 + 13))?;
    for r in records {
        let date = r.date.map(|d| d.to_string()).unwrap_or_default();
        let category = r.category.map(|c| c.label()).unwrap_or("-");
        writeln!(
            out,
            "{:<10}  {:<merchant_w$}  {:>10.2}  {}",
            date, r.merchant, r.amount, category
        )?;
    }
    Ok(())
}

pub fn write_bullets(out: &mut impl Write, insights: &str) -> io::Result<()> {
    for line in insight_bullets(insights) {
        writeln!(out, "- {line}")?;
    }
    Ok(())
}

pub fn write_chart(out: &mut impl Write, rows: &[(Category, f64)]) -> io::Result<()> {
    let max = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let label_w = rows
        .iter()
        .map(|(c, _)| c.label().len())
        .max()
        .unwrap_or(0);

    for (category, amount) in rows {
        writeln!(
            out,
            "{:<label_w$} | {:<bar_w$} {:.2}",
            category.label(),
            "#".repeat(bar_len(*amount, max, BAR_WIDTH)),
            amount,
            bar_w = BAR_WIDTH,
        )?;
    }
    Ok(())
}

/// Full dashboard for an analysis run
pub fn render(out: &mut impl Write, analysis: &Analysis) -> io::Result<()> {
    writeln!(out, "## Transaction Data\n")?;
    write_table(out, &analysis.records)?;

    writeln!(out, "\n## Insights\n")?;
    write_bullets(out, &analysis.insights)?;

    writeln!(out, "\n## Spending by Category\n")?;
    write_chart(out, &chart_rows(&analysis.records))?;
    Ok(())
}
