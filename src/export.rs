//! Full-org metadata export.
//!
//! An export gathers every backend input in sequence (folders and their
//! items, standard objects, the type catalog), writes `package.xml` into the
//! output directory, then asks the backend to retrieve the listed metadata.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use busbar_sf_cli::MetadataBackend;
use busbar_sf_metadata::{
    load_standard_objects, CatalogStrategy, EmptyFolderPolicy, FolderCategory, FolderIndex,
    ManifestBuilder, ManifestSummary, MetadataCatalog, DEFAULT_API_VERSION, MANIFEST_FILE_NAME,
};
use tracing::{info, instrument};

/// Settings for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory receiving `package.xml` and the retrieved archive.
    pub directory: PathBuf,
    /// Value of the manifest `<version>` element.
    pub api_version: String,
    pub catalog: CatalogStrategy,
    pub empty_folders: EmptyFolderPolicy,
    /// Folder categories to index; folder-scoped types outside this set get a wildcard.
    pub folder_categories: Vec<FolderCategory>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            api_version: DEFAULT_API_VERSION.to_string(),
            catalog: CatalogStrategy::default(),
            empty_folders: EmptyFolderPolicy::default(),
            folder_categories: FolderCategory::ALL.to_vec(),
        }
    }
}

impl ExportOptions {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Default::default()
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_catalog(mut self, catalog: CatalogStrategy) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_empty_folders(mut self, policy: EmptyFolderPolicy) -> Self {
        self.empty_folders = policy;
        self
    }

    pub fn with_folder_categories(mut self, categories: &[FolderCategory]) -> Self {
        self.folder_categories = categories.to_vec();
        self
    }

    /// Location of the generated manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.directory.join(MANIFEST_FILE_NAME)
    }
}

/// Outcome of [`export`].
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub manifest_path: PathBuf,
    pub summary: ManifestSummary,
    pub archive: PathBuf,
}

/// Create the output directory if it does not exist.
pub fn ensure_directory(directory: &Path) -> Result<()> {
    std::fs::create_dir_all(directory)
        .with_context(|| format!("failed to create output directory {}", directory.display()))
}

/// Query the backend and write `package.xml` into the output directory.
#[instrument(skip_all, fields(directory = %options.directory.display()))]
pub async fn build_manifest<B: MetadataBackend>(
    backend: &B,
    options: &ExportOptions,
) -> Result<ManifestSummary> {
    ensure_directory(&options.directory)?;

    let folders = FolderIndex::load(backend, &options.folder_categories)
        .await
        .context("failed to load folder metadata")?;
    let standard_objects = load_standard_objects(backend)
        .await
        .context("failed to list standard objects")?;
    let catalog = MetadataCatalog::resolve(options.catalog, backend)
        .await
        .context("failed to resolve metadata catalog")?;
    info!(strategy = %options.catalog, types = catalog.len(), "resolved metadata catalog");

    let path = options.manifest_path();
    let summary = ManifestBuilder::new(&folders, &standard_objects)
        .with_empty_folder_policy(options.empty_folders)
        .write_to_path(&catalog, &path, &options.api_version)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(
        types = summary.types,
        members = summary.members,
        omitted = summary.omitted.len(),
        path = %path.display(),
        "wrote package manifest"
    );
    Ok(summary)
}

/// Ask the backend to retrieve everything listed in the manifest.
pub async fn retrieve_metadata<B: MetadataBackend>(
    backend: &B,
    options: &ExportOptions,
) -> Result<PathBuf> {
    let archive = backend
        .retrieve(&options.manifest_path(), &options.directory)
        .await
        .context("metadata retrieve failed")?;
    info!(archive = %archive.display(), "retrieved metadata");
    Ok(archive)
}

/// Build the manifest, then retrieve. Any failure aborts before retrieval.
pub async fn export<B: MetadataBackend>(backend: &B, options: &ExportOptions) -> Result<ExportReport> {
    let summary = build_manifest(backend, options).await?;
    let archive = retrieve_metadata(backend, options).await?;
    Ok(ExportReport {
        manifest_path: options.manifest_path(),
        summary,
        archive,
    })
}
