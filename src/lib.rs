//! Sprint health dashboard core
//!
//! Authored sprint snapshots, the project catalog and the report exporter.
//! The Leptos front end (`src/main.rs`) and the `sprint-report` tool are thin
//! hosts over this crate.

pub mod data;
pub mod error;
pub mod export;
pub mod models;

pub use data::SnapshotCatalog;
pub use error::ExportError;
pub use export::{ExportArtifact, ExportFormat};
pub use models::{Project, SprintSnapshot};
