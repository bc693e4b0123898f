//! spendsight-core: shared types and errors for the SpendSight pipeline

pub mod error;
pub mod finance;

pub use error::{Error, Result};
pub use finance::{Analysis, Category, SpendingSummary, TransactionRecord};
