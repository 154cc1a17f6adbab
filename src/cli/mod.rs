pub mod rank;
pub mod review;
pub mod schema;
pub mod score;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use strata::memory::MemoryBundle;

/// Read and decode a JSON memory bundle.
pub fn read_bundle(path: &Path) -> Result<MemoryBundle> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bundle: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse bundle JSON: {}", path.display()))
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
