//! topoforge Code Generation
//!
//! This crate turns a topology snapshot into the statement script the
//! network simulator replays.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌──────────┐     ┌──────────┐     ┌──────────┐
//! │ Snapshot │────▶│ Validate │────▶│ Generate │────▶ script
//! │          │     │(optional)│     │          │
//! └──────────┘     └──────────┘     └──────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use topoforge_codegen::{Compilation, CompileOptions, Compiler};
//!
//! let compiler = Compiler::new(CompileOptions::default());
//! match compiler.compile(&store.snapshot(), &catalog) {
//!     Compilation::Script(script) => println!("{}", script.text()),
//!     Compilation::Invalid { errors } => eprintln!("{errors:?}"),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod compiler;
pub mod error;
pub mod generator;
pub mod literal;
pub mod statements;

pub use compiler::{Compilation, CompileOptions, Compiler, Script};
pub use error::{Error, Result};
pub use generator::{EMPTY_TOPOLOGY, Generator};
pub use literal::Literal;
