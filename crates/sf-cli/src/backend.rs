//! Backend capability used by the manifest builder.
//!
//! [`MetadataBackend`] is the only seam between the manifest core and the
//! org. [`SfdxBackend`] implements it by shelling out to the Salesforce CLI;
//! tests substitute an in-memory implementation.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Output;

use serde::de::DeserializeOwned;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::config::SfdxConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::types::{CliEnvelope, DescribeMetadataResult, QueryResult};

/// Name of the archive the retrieve command writes into the target directory.
pub const RETRIEVE_ARCHIVE: &str = "unpackaged.zip";

/// Query and command capability of a metadata backend.
///
/// Every call is a blocking round-trip from the caller's point of view and
/// any failure is fatal to the export.
pub trait MetadataBackend: Send + Sync {
    /// Run a SOQL query and decode each record.
    fn query<T>(&self, soql: &str) -> impl Future<Output = Result<Vec<T>>> + Send
    where
        T: DeserializeOwned + Send;

    /// List standard sObject names, newline-delimited.
    fn list_standard_objects(&self) -> impl Future<Output = Result<String>> + Send;

    /// Describe the metadata types supported by the org.
    fn describe_metadata(&self) -> impl Future<Output = Result<DescribeMetadataResult>> + Send;

    /// Retrieve the metadata named in `manifest` into `target_dir`.
    ///
    /// Returns the path of the archive written by the backend.
    fn retrieve(
        &self,
        manifest: &Path,
        target_dir: &Path,
    ) -> impl Future<Output = Result<PathBuf>> + Send;
}

/// [`MetadataBackend`] backed by the `sfdx` executable.
#[derive(Debug, Clone)]
pub struct SfdxBackend {
    config: SfdxConfig,
}

impl SfdxBackend {
    /// Create a backend from a validated config.
    pub fn new(config: SfdxConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Spawn `<program> <command> <args..> -u <target_org>` and collect its output.
    async fn output(&self, command: &str, args: &[&str]) -> Result<Output> {
        debug!(program = %self.config.program, command, "running CLI command");

        Command::new(&self.config.program)
            .arg(command)
            .args(args)
            .arg("-u")
            .arg(&self.config.target_org)
            .output()
            .await
            .map_err(|e| {
                let message = e.to_string();
                Error::with_source(
                    ErrorKind::Spawn {
                        program: self.config.program.clone(),
                        message,
                    },
                    e,
                )
            })
    }

    /// Run a command whose plain-text stdout is the payload.
    async fn run_text(&self, command: &str, args: &[&str]) -> Result<String> {
        let output = self.output(command, args).await?;

        if !output.status.success() {
            return Err(Error::new(ErrorKind::CommandFailed {
                command: command.to_string(),
                status: output.status.code().unwrap_or(-1),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a command with `--json` and unwrap its result envelope.
    async fn run_json<T: DeserializeOwned>(&self, command: &str, args: &[&str]) -> Result<T> {
        let mut json_args = args.to_vec();
        json_args.push("--json");
        let output = self.output(command, &json_args).await?;

        if !output.status.success() {
            let message = serde_json::from_slice::<CliEnvelope<serde_json::Value>>(&output.stdout)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| String::from_utf8_lossy(&output.stderr).trim().to_string());
            return Err(Error::new(ErrorKind::CommandFailed {
                command: command.to_string(),
                status: output.status.code().unwrap_or(-1),
                message,
            }));
        }

        let envelope: CliEnvelope<T> = serde_json::from_slice(&output.stdout)?;
        unwrap_envelope(command, envelope)
    }
}

/// Extract the result from a CLI envelope, mapping a failure status to an error.
pub(crate) fn unwrap_envelope<T>(command: &str, envelope: CliEnvelope<T>) -> Result<T> {
    if envelope.status != 0 {
        let message = envelope
            .message
            .or(envelope.name)
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(Error::new(ErrorKind::CommandFailed {
            command: command.to_string(),
            status: envelope.status,
            message,
        }));
    }

    envelope.result.ok_or_else(|| {
        Error::new(ErrorKind::InvalidResponse(format!(
            "Missing 'result' in {} output",
            command
        )))
    })
}

impl MetadataBackend for SfdxBackend {
    #[instrument(skip(self))]
    async fn query<T>(&self, soql: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let result: QueryResult<T> = self
            .run_json("force:data:soql:query", &["-q", soql])
            .await?;
        if !result.done {
            return Err(Error::new(ErrorKind::InvalidResponse(format!(
                "Query returned {} of {} records; results were truncated",
                result.records.len(),
                result.total_size
            ))));
        }
        debug!(records = result.records.len(), "query complete");
        Ok(result.records)
    }

    #[instrument(skip(self))]
    async fn list_standard_objects(&self) -> Result<String> {
        self.run_text("force:schema:sobject:list", &["-c", "standard"])
            .await
    }

    #[instrument(skip(self))]
    async fn describe_metadata(&self) -> Result<DescribeMetadataResult> {
        self.run_json("force:mdapi:describemetadata", &[]).await
    }

    #[instrument(skip(self))]
    async fn retrieve(&self, manifest: &Path, target_dir: &Path) -> Result<PathBuf> {
        let target = target_dir.to_string_lossy().into_owned();
        let package = manifest.to_string_lossy().into_owned();
        let wait = self.config.retrieve_wait.map(|w| w.to_string());

        let mut args = vec!["-r", target.as_str(), "-k", package.as_str()];
        if let Some(wait) = wait.as_deref() {
            args.extend(["-w", wait]);
        }

        self.run_text("force:mdapi:retrieve", &args).await?;
        Ok(target_dir.join(RETRIEVE_ARCHIVE))
    }
}
