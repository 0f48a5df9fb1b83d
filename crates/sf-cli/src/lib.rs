//! # busbar-sf-cli
//!
//! Salesforce CLI backend for metadata export.
//!
//! This crate provides the backend half of an export:
//! - [`MetadataBackend`] - the query/command capability the manifest builder consumes
//! - [`SfdxBackend`] - an implementation that shells out to `sfdx` and decodes its `--json` output
//! - Record types for folders, folder items and metadata types
//! - XML escaping for values written into `package.xml`
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_sf_cli::{FolderRow, MetadataBackend, SfdxBackend, SfdxConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), busbar_sf_cli::Error> {
//!     let backend = SfdxBackend::new(SfdxConfig::new("admin@example.com"))?;
//!
//!     let folders: Vec<FolderRow> = backend
//!         .query("Select Id, Name, DeveloperName, Type, NamespacePrefix from Folder")
//!         .await?;
//!
//!     for folder in folders {
//!         println!("{} ({})", folder.developer_name, folder.folder_type);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod backend;
mod config;
mod error;
pub mod security;
mod types;

pub use backend::{MetadataBackend, SfdxBackend, RETRIEVE_ARCHIVE};
pub use config::{SfdxConfig, SfdxConfigBuilder, DEFAULT_PROGRAM};
pub use error::{Error, ErrorKind, Result};
pub use types::{
    CliEnvelope, DescribeMetadataResult, FolderItemRow, FolderRow, MetadataTypeRow, QueryResult,
};
