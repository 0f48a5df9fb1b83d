//! Records returned by the Salesforce CLI.

use serde::{Deserialize, Serialize};

/// JSON envelope wrapping every `--json` CLI response.
#[derive(Debug, Clone, Deserialize)]
pub struct CliEnvelope<T> {
    /// Zero on success.
    pub status: i32,
    /// Command payload, absent on failure.
    pub result: Option<T>,
    /// Error name on failure.
    pub name: Option<String>,
    /// Error message on failure.
    pub message: Option<String>,
}

/// SOQL query result payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize", default)]
    pub total_size: u64,

    /// Whether all records are returned.
    #[serde(default = "default_done")]
    pub done: bool,

    /// The records.
    pub records: Vec<T>,
}

fn default_done() -> bool {
    true
}

/// A row from the `Folder` sObject.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FolderRow {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "DeveloperName")]
    pub developer_name: String,
    /// Folder category as reported by the org (`Report`, `Dashboard`, `Email`, `Document`, ...).
    #[serde(rename = "Type")]
    pub folder_type: String,
    #[serde(rename = "NamespacePrefix", default)]
    pub namespace_prefix: Option<String>,
}

/// A report, dashboard, email template or document row.
///
/// Reports expose their folder through `OwnerId`, every other item through
/// `FolderId`; both land in [`folder_id`](Self::folder_id).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FolderItemRow {
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
    #[serde(rename = "DeveloperName")]
    pub developer_name: String,
    #[serde(rename = "FolderId", alias = "OwnerId", default)]
    pub folder_id: Option<String>,
}

/// A metadata type entry from `describemetadata`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataTypeRow {
    pub xml_name: String,
    #[serde(default)]
    pub directory_name: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub in_folder: bool,
    #[serde(default)]
    pub meta_file: bool,
    #[serde(default)]
    pub child_xml_names: Vec<String>,
}

/// Payload of `describemetadata`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeMetadataResult {
    #[serde(default)]
    pub metadata_objects: Vec<MetadataTypeRow>,
    #[serde(default)]
    pub organization_namespace: Option<String>,
}
