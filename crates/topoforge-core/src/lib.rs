//! topoforge Core Library
//!
//! This crate provides the core functionality for topoforge:
//! - Topology data model and the append-only topology store
//! - Catalog of valid device models, module models, and link types
//! - Cross-reference and catalog validation
//! - Project configuration and topology documents
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Topology   │────▶│  Validator  │◀────│   Catalog   │
//! │    Store    │     │             │     │   (YAML)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//!   snapshot ──▶ topoforge-codegen
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use topoforge_core::{Catalog, Device, TopologyStore, ValidationRules, validate};
//!
//! let catalog = Catalog::builtin()?;
//! let mut store = TopologyStore::new();
//! store.append_device(Device::new("R1", "2811", 100, 100))?;
//!
//! let diagnostics = validate(&store.snapshot(), &catalog, &ValidationRules::default());
//! assert!(diagnostics.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod store;
pub mod summary;
pub mod validator;

pub use catalog::{Catalog, CatalogKind, CatalogListing, ModelCatalog};
pub use config::{Config, ProjectConfig, ValidationRules};
pub use document::TopologyDocument;
pub use error::{Error, Result, ShapeError};
pub use model::{Coordinate, Device, IosConfig, Link, Module, PcIpConfig};
pub use store::{SharedStore, Snapshot, Topology, TopologyStore};
pub use summary::{Counts, Summary, summarize};
pub use validator::validate;
