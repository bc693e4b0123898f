use serde::{Deserialize, Serialize};
use spendsight_core::{Error, Result};
use std::path::Path;

/// Statement formats the loader knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    Csv,
    /// Recognized but not parsed yet
    Pdf,
}

impl InputKind {
    /// Detect the input kind from the file extension.
    /// Files without an extension are treated as CSV.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            None | Some("csv") | Some("txt") => Ok(InputKind::Csv),
            Some("pdf") => Ok(InputKind::Pdf),
            Some(other) => Err(Error::UnsupportedInput(format!(
                "unrecognized file type .{other} for {} (expected CSV or PDF)",
                path.display()
            ))),
        }
    }
}
