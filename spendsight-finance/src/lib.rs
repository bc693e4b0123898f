//! spendsight-finance: category rules, aggregation, summary formatting and the insight client

pub mod aggregate;
pub mod category_rules;
pub mod insights;
pub mod pipeline;
pub mod summary;

pub use aggregate::{spending_by_category, summarize, total_spending};
pub use category_rules::{CategoryRule, RULES, categorize, categorize_all};
pub use insights::{
    InsightClient, InsightConfig, InsightSource, Provider, build_prompt, insight_bullets,
};
pub use pipeline::{Prepared, analyze, analyze_prepared, prepare, prepare_records};
pub use summary::format_summary;
