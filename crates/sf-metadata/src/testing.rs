//! In-memory backend for unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use busbar_sf_cli::{DescribeMetadataResult, MetadataBackend, MetadataTypeRow, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    pub queries: HashMap<String, Vec<Value>>,
    pub standard_objects: String,
    pub metadata_types: Vec<String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_query(mut self, soql: &str, records: Value) -> Self {
        let records = match records {
            Value::Array(records) => records,
            other => vec![other],
        };
        self.queries.insert(soql.to_string(), records);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl MetadataBackend for FakeBackend {
    async fn query<T>(&self, soql: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        self.record(soql);
        self.queries
            .get(soql)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(Into::into))
            .collect()
    }

    async fn list_standard_objects(&self) -> Result<String> {
        self.record("sobject:list");
        Ok(self.standard_objects.clone())
    }

    async fn describe_metadata(&self) -> Result<DescribeMetadataResult> {
        self.record("describemetadata");
        Ok(DescribeMetadataResult {
            metadata_objects: self
                .metadata_types
                .iter()
                .map(|name| MetadataTypeRow {
                    xml_name: name.clone(),
                    directory_name: None,
                    suffix: None,
                    in_folder: false,
                    meta_file: false,
                    child_xml_names: Vec::new(),
                })
                .collect(),
            organization_namespace: None,
        })
    }

    async fn retrieve(&self, _manifest: &Path, target_dir: &Path) -> Result<PathBuf> {
        self.record("retrieve");
        Ok(target_dir.join(busbar_sf_cli::RETRIEVE_ARCHIVE))
    }
}
