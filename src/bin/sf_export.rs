//! Export all metadata from a Salesforce org.
//!
//! ```sh
//! sf-export export -u admin@example.com -d ./export
//! ```
//!
//! Writes `<dir>/package.xml` describing every metadata type, then retrieves
//! it with the Salesforce CLI into `<dir>/unpackaged.zip`.

use std::path::PathBuf;

use anyhow::Result;
use busbar_sf_cli::{SfdxBackend, SfdxConfig, DEFAULT_PROGRAM};
use busbar_sf_export::{build_manifest, retrieve_metadata, ExportOptions};
use busbar_sf_metadata::{CatalogStrategy, EmptyFolderPolicy, DEFAULT_API_VERSION};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sf-export", version, about = "Export all metadata from a Salesforce org")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build package.xml for the whole org and retrieve it
    Export(ExportArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Username or alias of the authenticated org
    #[arg(short = 'u', long = "target-org", visible_alias = "sfdx-user", env = "SF_TARGET_ORG")]
    target_org: Option<String>,

    /// Output directory, created if missing
    #[arg(short, long, default_value = ".")]
    directory: PathBuf,

    /// Metadata API version written into the manifest
    #[arg(long, env = "SF_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// Metadata type catalog: static or dynamic
    #[arg(long, default_value = "static")]
    catalog: CatalogStrategy,

    /// Folder-scoped types with no folders: keep, wildcard or omit
    #[arg(long, default_value = "keep")]
    empty_folders: EmptyFolderPolicy,

    /// Salesforce CLI executable
    #[arg(long, env = "SF_BIN", default_value = DEFAULT_PROGRAM)]
    sf_bin: String,

    /// Minutes to wait for the retrieve to complete
    #[arg(long)]
    wait: Option<u32>,

    /// Write package.xml without retrieving
    #[arg(long)]
    manifest_only: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Export(args) => export(args).await,
    }
}

async fn export(args: ExportArgs) -> Result<()> {
    let mut config = SfdxConfig::builder()
        .with_program(args.sf_bin)
        .with_target_org(args.target_org.unwrap_or_default());
    if let Some(wait) = args.wait {
        config = config.with_retrieve_wait(wait);
    }
    let backend = SfdxBackend::new(config.build()?)?;

    let options = ExportOptions::new(args.directory)
        .with_api_version(args.api_version)
        .with_catalog(args.catalog)
        .with_empty_folders(args.empty_folders);

    println!("Exporting metadata");
    build_manifest(&backend, &options).await?;

    if args.manifest_only {
        println!("Manifest written to {}", options.manifest_path().display());
        return Ok(());
    }

    println!("Extracting metadata");
    let archive = retrieve_metadata(&backend, &options).await?;
    println!("Metadata written to {}", archive.display());
    Ok(())
}
