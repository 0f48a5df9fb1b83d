//! # busbar-sf-export
//!
//! Export every piece of metadata from a Salesforce org.
//!
//! The export builds a `package.xml` that names every metadata type (folder
//! contents and standard objects spelled out, everything else wildcarded)
//! and hands it to the Salesforce CLI for retrieval.
//!
//! ## Crates
//!
//! - **busbar-sf-cli** - Backend capability and the `sfdx` implementation
//! - **busbar-sf-metadata** - Folder index, standard objects, type catalog, manifest builder
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use busbar_sf_export::{export, ExportOptions};
//! use busbar_sf_cli::{SfdxBackend, SfdxConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SfdxBackend::new(SfdxConfig::new("admin@example.com"))?;
//!     let report = export(&backend, &ExportOptions::new("export")).await?;
//!     println!("Metadata written to {}", report.archive.display());
//!     Ok(())
//! }
//! ```

pub mod export;

pub use busbar_sf_cli as cli;
pub use busbar_sf_metadata as metadata;

pub use export::{
    build_manifest, ensure_directory, export, retrieve_metadata, ExportOptions, ExportReport,
};
