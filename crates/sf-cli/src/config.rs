//! Backend configuration.

use crate::error::{Error, ErrorKind, Result};

/// Default Salesforce CLI executable.
pub const DEFAULT_PROGRAM: &str = "sfdx";

/// Configuration for [`SfdxBackend`](crate::SfdxBackend).
#[derive(Debug, Clone)]
pub struct SfdxConfig {
    /// CLI executable name or path.
    pub program: String,
    /// Username or alias of the authenticated org.
    pub target_org: String,
    /// Minutes the retrieve command waits for completion.
    pub retrieve_wait: Option<u32>,
}

impl SfdxConfig {
    /// Create a config for the given org with default settings.
    pub fn new(target_org: impl Into<String>) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            target_org: target_org.into(),
            retrieve_wait: None,
        }
    }

    /// Create a new config builder.
    pub fn builder() -> SfdxConfigBuilder {
        SfdxConfigBuilder::default()
    }

    /// Check that a target org has been supplied.
    pub fn validate(&self) -> Result<()> {
        if self.target_org.trim().is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "missing target org (-u / --target-org)".to_string(),
            )));
        }
        if self.program.trim().is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "CLI program must not be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Builder for SfdxConfig.
#[derive(Debug, Default)]
pub struct SfdxConfigBuilder {
    program: Option<String>,
    target_org: Option<String>,
    retrieve_wait: Option<u32>,
}

impl SfdxConfigBuilder {
    /// Set the CLI executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Set the target org username or alias.
    pub fn with_target_org(mut self, target_org: impl Into<String>) -> Self {
        self.target_org = Some(target_org.into());
        self
    }

    /// Set the retrieve wait in minutes.
    pub fn with_retrieve_wait(mut self, minutes: u32) -> Self {
        self.retrieve_wait = Some(minutes);
        self
    }

    /// Build and validate the config.
    pub fn build(self) -> Result<SfdxConfig> {
        let config = SfdxConfig {
            program: self.program.unwrap_or_else(|| DEFAULT_PROGRAM.to_string()),
            target_org: self.target_org.unwrap_or_default(),
            retrieve_wait: self.retrieve_wait,
        };
        config.validate()?;
        Ok(config)
    }
}
