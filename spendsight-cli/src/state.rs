use anyhow::{Context, Result};
use std::path::PathBuf;

/// `$SPENDSIGHT_HOME`, else `~/.spendsight`
pub fn spendsight_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SPENDSIGHT_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendsight"))
}
