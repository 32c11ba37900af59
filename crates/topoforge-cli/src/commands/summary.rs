//! Show entity counts and device names

use anyhow::Result;
use std::path::Path;
use topoforge_core::summarize;

use super::load_topology;

/// Run the summary command
pub async fn run(topology: &Path) -> Result<()> {
    let store = load_topology(topology)?;
    let summary = summarize(&store.snapshot());

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
