//! List catalog entries

use anyhow::Result;
use topoforge_core::{CatalogKind, ModelCatalog};

use super::Context;

/// Run the catalog command
pub async fn run(ctx: &Context, kind: CatalogKind, limit: i64, starts_with: &str) -> Result<()> {
    let listing = ctx.catalog.list(kind, limit, starts_with)?;

    for entry in &listing.entries {
        println!("{entry}");
    }

    tracing::info!(
        "Showing {} of {} known {}",
        listing.entries.len(),
        listing.total_known,
        kind
    );
    Ok(())
}
