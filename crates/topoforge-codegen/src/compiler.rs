//! Validation-gated script compiler
//!
//! Runs the validator first when asked to, then the generator. Validation
//! failures come back as data in [`Compilation::Invalid`]; they are not
//! errors.

use sha2::{Digest, Sha256};
use std::path::Path;

use topoforge_core::{ModelCatalog, Topology, ValidationRules, validate};

use crate::error::{Error, Result};
use crate::generator::{EMPTY_TOPOLOGY, Generator};

/// Options for the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Refuse to generate while validation reports problems
    pub validate: bool,

    /// Optional rules applied when validating
    pub rules: ValidationRules,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            validate: true,
            rules: ValidationRules::default(),
        }
    }
}

/// Outcome of a compile
#[derive(Debug, Clone, PartialEq)]
pub enum Compilation {
    /// The generated script
    Script(Script),

    /// Validation failed; nothing was generated
    Invalid {
        /// Diagnostics, in validator order
        errors: Vec<String>,
    },
}

/// Script compiler
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
    generator: Generator,
}

impl Compiler {
    /// Create a new compiler with the given options
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            generator: Generator::new(),
        }
    }

    /// Compile a topology into a script
    pub fn compile<C>(&self, topology: &Topology, catalog: &C) -> Compilation
    where
        C: ModelCatalog + ?Sized,
    {
        if self.options.validate {
            let errors = validate(topology, catalog, &self.options.rules);
            if !errors.is_empty() {
                tracing::info!(count = errors.len(), "Validation failed, script not generated");
                return Compilation::Invalid { errors };
            }
        }

        let script = Script::new(self.generator.generate(topology));
        tracing::info!(
            statements = script.statement_count(),
            hash = %script.short_hash(),
            "Generated script"
        );
        Compilation::Script(script)
    }
}

/// A generated script ready to hand to the simulator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    lines: Vec<String>,
    hash: String,
}

impl Script {
    /// Wrap generated lines
    pub fn new(lines: Vec<String>) -> Self {
        let mut hasher = Sha256::new();
        for line in &lines {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        let hash = hex::encode(hasher.finalize());
        Self { lines, hash }
    }

    /// Lines in emission order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Script text, one statement per line
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of statements, not counting the empty-topology sentinel
    pub fn statement_count(&self) -> usize {
        if self.is_empty_topology() {
            0
        } else {
            self.lines.len()
        }
    }

    /// True when the script only holds the empty-topology sentinel
    pub fn is_empty_topology(&self) -> bool {
        self.lines.len() == 1 && self.lines[0] == EMPTY_TOPOLOGY
    }

    /// SHA-256 of the script text (hex)
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// First 8 hex digits of [`Script::hash`]
    pub fn short_hash(&self) -> &str {
        &self.hash[..8]
    }

    /// Save the script to a file, with a trailing newline
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut text = self.text();
        text.push('\n');
        std::fs::write(path, text).map_err(|source| Error::Write {
            path: path.display().to_string(),
            source,
        })
    }
}
