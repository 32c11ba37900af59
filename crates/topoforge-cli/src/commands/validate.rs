//! Validate a topology document

use anyhow::Result;
use std::path::Path;
use topoforge_core::validate;

use super::{Context, load_topology};

/// Run the validate command
pub async fn run(ctx: &Context, topology: &Path) -> Result<()> {
    let store = load_topology(topology)?;

    let diagnostics = validate(
        &store.snapshot(),
        &ctx.catalog,
        &ctx.config.project.validation,
    );

    if diagnostics.is_empty() {
        tracing::info!("✓ Topology is valid");
        return Ok(());
    }

    for diagnostic in &diagnostics {
        println!("{diagnostic}");
    }
    anyhow::bail!("{} validation error(s)", diagnostics.len());
}
