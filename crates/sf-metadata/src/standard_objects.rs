//! Standard object names that must be listed explicitly under `CustomObject`.

use busbar_sf_cli::MetadataBackend;
use tracing::{debug, info};

use crate::error::Result;

/// Suffixes of auxiliary objects that cannot be retrieved on their own.
pub const AUXILIARY_SUFFIXES: [&str; 3] = ["__Tag", "__Tags", "__History"];

/// Whether `name` denotes a tag or history object.
pub fn is_auxiliary(name: &str) -> bool {
    AUXILIARY_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}

/// Keep the retrievable names, preserving input order.
pub fn resolve_standard_objects<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(Into::into)
        .filter(|name| {
            let keep = !is_auxiliary(name);
            if !keep {
                debug!(object = %name, "skipping auxiliary standard object");
            }
            keep
        })
        .collect()
}

/// Parse newline-delimited CLI output, skipping blank lines.
pub fn parse_standard_objects(raw: &str) -> Vec<String> {
    resolve_standard_objects(raw.lines().map(str::trim).filter(|line| !line.is_empty()))
}

/// Fetch and filter the org's standard objects.
pub async fn load_standard_objects<B: MetadataBackend>(backend: &B) -> Result<Vec<String>> {
    let raw = backend.list_standard_objects().await?;
    let objects = parse_standard_objects(&raw);
    info!(count = objects.len(), "resolved standard objects");
    Ok(objects)
}
