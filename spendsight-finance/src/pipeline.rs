//! End-to-end run: load -> categorize -> summarize -> format -> insights.
//!
//! Any stage failing aborts the run; there are no partial results.

use spendsight_core::{Analysis, Error, Result, SpendingSummary, TransactionRecord};
use spendsight_ingest::load_transactions;
use std::path::Path;
use tracing::info;

use crate::aggregate::summarize;
use crate::category_rules::categorize_all;
use crate::insights::InsightSource;
use crate::summary::format_summary;

/// Everything computed before the insight request
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub records: Vec<TransactionRecord>,
    pub summary: SpendingSummary,
    /// Exact text sent as the prompt body
    pub prompt_body: String,
}

/// Categorize, summarize and format already-loaded records
pub fn prepare_records(records: Vec<TransactionRecord>) -> Result<Prepared> {
    let records = categorize_all(records);
    let summary = summarize(&records)?;
    let prompt_body = format_summary(&summary);
    Ok(Prepared {
        records,
        summary,
        prompt_body,
    })
}

/// Load a statement file and prepare it
pub fn prepare(path: impl AsRef<Path>) -> Result<Prepared> {
    let records = load_transactions(path)?;
    prepare_records(records)
}

/// Request insights for prepared data and hand back the presentation pair
pub async fn analyze_prepared(prepared: Prepared, source: &dyn InsightSource) -> Result<Analysis> {
    let insights = source.insights(&prepared.prompt_body).await?;
    if insights.trim().is_empty() {
        return Err(Error::ExternalService(
            "insight service returned no text".to_string(),
        ));
    }

    info!(
        transactions = prepared.records.len(),
        total = prepared.summary.total_spending,
        "analysis complete"
    );
    Ok(Analysis {
        records: prepared.records,
        insights,
    })
}

/// Full pipeline for one statement file
pub async fn analyze(path: impl AsRef<Path>, source: &dyn InsightSource) -> Result<Analysis> {
    let prepared = prepare(path)?;
    analyze_prepared(prepared, source).await
}
