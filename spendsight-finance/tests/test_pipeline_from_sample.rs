use async_trait::async_trait;
use spendsight_core::{Category, Result};
use spendsight_finance::{InsightSource, analyze, insight_bullets, prepare};
use std::path::PathBuf;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("sample_transactions.csv")
}

struct StaticInsights;

#[async_trait]
impl InsightSource for StaticInsights {
    async fn insights(&self, summary: &str) -> Result<String> {
        assert!(summary.starts_with("Total spending: 551.00\n"));
        Ok("Utilities are your largest expense.\n\nConsider cheaper entertainment.".to_string())
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// Real-data regression: every category from the fixture is populated with the expected sums.
#[test]
fn test_sample_category_totals() {
    let prepared = prepare(sample_path()).unwrap();
    let by_cat = &prepared.summary.spending_by_category;

    assert_eq!(prepared.records.len(), 12);
    assert!(approx(prepared.summary.total_spending, 551.00));
    assert!(approx(by_cat[&Category::Groceries], 115.42));
    assert!(approx(by_cat[&Category::Utilities], 212.50));
    assert!(approx(by_cat[&Category::Entertainment], 132.49));
    assert!(approx(by_cat[&Category::RideShare], 41.15));
    assert!(approx(by_cat[&Category::Other], 49.44));
    assert!(approx(prepared.summary.category_sum(), prepared.summary.total_spending));
}

#[test]
fn test_sample_prompt_body() {
    let prepared = prepare(sample_path()).unwrap();
    let expected = "Total spending: 551.00\n\
                    Average spending: 45.92\n\
                    Spending by category:\n \
                    - Groceries: 115.42\n \
                    - Utilities: 212.50\n \
                    - Entertainment: 132.49\n \
                    - Ride Share: 41.15\n \
                    - Other: 49.44\n";
    assert_eq!(prepared.prompt_body, expected);
}

#[test]
fn test_sample_gas_station_is_utilities() {
    let prepared = prepare(sample_path()).unwrap();
    let shell = prepared
        .records
        .iter()
        .find(|r| r.merchant.contains("Shell"))
        .unwrap();
    assert_eq!(shell.category, Some(Category::Utilities));
}

#[tokio::test]
async fn test_analyze_sample() {
    let analysis = analyze(sample_path(), &StaticInsights).await.unwrap();
    assert_eq!(analysis.records.len(), 12);
    assert_eq!(insight_bullets(&analysis.insights).len(), 2);
}
