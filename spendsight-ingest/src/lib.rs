//! spendsight-ingest: statement loading (CSV) and input-kind detection.

pub mod parsers;
pub mod types;

pub use parsers::csv_ledger::load_from_reader;
pub use types::InputKind;

use spendsight_core::{Error, Result, TransactionRecord};
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Load a statement file into uncategorized records.
pub fn load_transactions(path: impl AsRef<Path>) -> Result<Vec<TransactionRecord>> {
    let path = path.as_ref();
    match InputKind::from_path(path)? {
        InputKind::Pdf => Err(Error::UnsupportedInput(
            "PDF statements are not yet supported".to_string(),
        )),
        InputKind::Csv => {
            let file = File::open(path)?;
            let records = load_from_reader(file)?;
            info!(path = %path.display(), count = records.len(), "loaded transactions");
            Ok(records)
        }
    }
}
