use anyhow::Result;
use clap::ValueEnum;

use strata::memory::{MemoryBundle, RetentionState};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemaTarget {
    /// Input of `rank` and `score`
    Bundle,
    /// Input of `review --state`
    Retention,
}

/// Print the JSON schema of an input document.
pub fn schema(target: SchemaTarget) -> Result<()> {
    let schema = match target {
        SchemaTarget::Bundle => schemars::schema_for!(MemoryBundle),
        SchemaTarget::Retention => schemars::schema_for!(RetentionState),
    };
    super::print_json(&schema)
}
