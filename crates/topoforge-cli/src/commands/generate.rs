//! Generate the simulator script for a topology document

use anyhow::{Context as _, Result};
use std::path::Path;
use topoforge_codegen::{Compilation, CompileOptions, Compiler};

use super::{Context, load_topology};

/// Run the generate command
pub async fn run(
    ctx: &Context,
    topology: &Path,
    no_validate: bool,
    output: Option<&Path>,
) -> Result<()> {
    let store = load_topology(topology)?;

    let compiler = Compiler::new(CompileOptions {
        validate: ctx.config.project.generate.validate && !no_validate,
        rules: ctx.config.project.validation,
    });

    let script = match compiler.compile(&store.snapshot(), &ctx.catalog) {
        Compilation::Script(script) => script,
        Compilation::Invalid { errors } => {
            for error in &errors {
                println!("{error}");
            }
            anyhow::bail!(
                "{} validation error(s); fix them or pass --no-validate",
                errors.len()
            );
        }
    };

    match output {
        Some(path) => {
            script.save(path).context("Failed to write script")?;
            tracing::info!(
                "✓ Wrote {} statements to {} (hash: {}...)",
                script.statement_count(),
                path.display(),
                script.short_hash()
            );
        }
        None => println!("{}", script.text()),
    }

    Ok(())
}
