//! # busbar-sf-metadata
//!
//! Package manifest construction for full-org metadata export.
//!
//! ## Features
//!
//! - **Folder Index** - Reports, dashboards, email templates and documents grouped by folder
//! - **Standard Objects** - Standard sObjects to name explicitly, minus tag and history objects
//! - **Catalog** - Static curated type list, or the types the org reports as supported
//! - **Manifest** - Streaming `package.xml` writer with per-type expansion rules
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_sf_cli::{SfdxBackend, SfdxConfig};
//! use busbar_sf_metadata::{
//!     load_standard_objects, CatalogStrategy, FolderCategory, FolderIndex, ManifestBuilder,
//!     MetadataCatalog, DEFAULT_API_VERSION,
//! };
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), busbar_sf_metadata::Error> {
//!     let backend = SfdxBackend::new(SfdxConfig::new("admin@example.com"))?;
//!
//!     let folders = FolderIndex::load(&backend, &FolderCategory::ALL).await?;
//!     let standard_objects = load_standard_objects(&backend).await?;
//!     let catalog = MetadataCatalog::resolve(CatalogStrategy::Static, &backend).await?;
//!
//!     let summary = ManifestBuilder::new(&folders, &standard_objects).write_to_path(
//!         &catalog,
//!         Path::new("package.xml"),
//!         DEFAULT_API_VERSION,
//!     )?;
//!
//!     println!("{} types, {} members", summary.types, summary.members);
//!     Ok(())
//! }
//! ```

mod catalog;
mod error;
mod folder;
mod manifest;
mod standard_objects;
#[cfg(test)]
mod testing;
mod types;

pub use catalog::{CatalogStrategy, MetadataCatalog, STATIC_METADATA_TYPES};
pub use error::{Error, ErrorKind, Result};
pub use folder::{FolderCategory, FolderIndex, FolderRecord, MemberRecord, FOLDER_QUERY};
pub use manifest::{
    EmptyFolderPolicy, ExpansionRule, ManifestBuilder, ManifestSummary, ManifestWriter,
    PackageTypeMembers, WriterState,
};
pub use standard_objects::{
    is_auxiliary, load_standard_objects, parse_standard_objects, resolve_standard_objects,
    AUXILIARY_SUFFIXES,
};
pub use types::{
    CUSTOM_OBJECT_TYPE, DEFAULT_API_VERSION, MANIFEST_FILE_NAME, METADATA_NAMESPACE, WILDCARD,
};
