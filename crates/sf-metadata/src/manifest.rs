//! Package manifest (`package.xml`) construction.
//!
//! [`ManifestWriter`] streams the document to any [`Write`] sink and enforces
//! the `NotStarted -> InProgress -> Finalized` lifecycle. [`ManifestBuilder`]
//! decides the members of each type from the folder index and the standard
//! object list, then drives the writer in catalog order.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use busbar_sf_cli::security::xml;
use tracing::{debug, warn};

use crate::catalog::MetadataCatalog;
use crate::error::{Error, ErrorKind, Result};
use crate::folder::{FolderCategory, FolderIndex};
use crate::types::{CUSTOM_OBJECT_TYPE, METADATA_NAMESPACE, WILDCARD};

/// How members of a metadata type are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionRule {
    /// Every folder of the category, then `<folder>/<item>` for its items.
    FolderScoped(FolderCategory),
    /// Every standard object by name, then the wildcard.
    CustomObject,
    /// The wildcard alone.
    Wildcard,
}

/// Type names with a rule other than [`ExpansionRule::Wildcard`].
const EXPANSION_RULES: &[(&str, ExpansionRule)] = &[
    ("Report", ExpansionRule::FolderScoped(FolderCategory::Report)),
    ("Dashboard", ExpansionRule::FolderScoped(FolderCategory::Dashboard)),
    ("EmailTemplate", ExpansionRule::FolderScoped(FolderCategory::Email)),
    ("Document", ExpansionRule::FolderScoped(FolderCategory::Document)),
    (CUSTOM_OBJECT_TYPE, ExpansionRule::CustomObject),
];

impl ExpansionRule {
    /// Rule for a metadata type name.
    pub fn for_type(type_name: &str) -> Self {
        EXPANSION_RULES
            .iter()
            .find(|(name, _)| *name == type_name)
            .map(|(_, rule)| *rule)
            .unwrap_or(ExpansionRule::Wildcard)
    }
}

/// What to emit for a folder-scoped type when the org has no such folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyFolderPolicy {
    /// Emit the type with no members.
    #[default]
    Keep,
    /// Emit the type with the wildcard member.
    Wildcard,
    /// Leave the type out of the manifest.
    Omit,
}

impl fmt::Display for EmptyFolderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyFolderPolicy::Keep => write!(f, "keep"),
            EmptyFolderPolicy::Wildcard => write!(f, "wildcard"),
            EmptyFolderPolicy::Omit => write!(f, "omit"),
        }
    }
}

impl FromStr for EmptyFolderPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "keep" => Ok(EmptyFolderPolicy::Keep),
            "wildcard" => Ok(EmptyFolderPolicy::Wildcard),
            "omit" => Ok(EmptyFolderPolicy::Omit),
            _ => Err(format!("Unknown empty folder policy: {}", s)),
        }
    }
}

/// Type members in a package manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTypeMembers {
    pub name: String,
    pub members: Vec<String>,
}

/// Lifecycle of a [`ManifestWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    NotStarted,
    InProgress,
    Finalized,
}

/// Streaming `package.xml` writer.
///
/// All values are XML-escaped when written.
#[derive(Debug)]
pub struct ManifestWriter<W: Write> {
    out: W,
    api_version: String,
    state: WriterState,
    types_written: usize,
}

impl<W: Write> ManifestWriter<W> {
    pub fn new(out: W, api_version: impl Into<String>) -> Self {
        Self {
            out,
            api_version: api_version.into(),
            state: WriterState::NotStarted,
            types_written: 0,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Write the XML declaration and open `<Package>`.
    pub fn start(&mut self) -> Result<()> {
        self.expect_state(WriterState::NotStarted, "start")?;
        write!(
            self.out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Package xmlns=\"{}\">\n",
            METADATA_NAMESPACE
        )?;
        self.state = WriterState::InProgress;
        Ok(())
    }

    /// Write one `<types>` block: every member, then the type name.
    ///
    /// Returns the number of members written.
    pub fn write_type<I, S>(&mut self, name: &str, members: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.expect_state(WriterState::InProgress, "write a type")?;

        writeln!(self.out, "  <types>")?;
        let mut count = 0;
        for member in members {
            writeln!(self.out, "    <members>{}</members>", xml::escape(member.as_ref()))?;
            count += 1;
        }
        writeln!(self.out, "    <name>{}</name>", xml::escape(name))?;
        writeln!(self.out, "  </types>")?;

        self.types_written += 1;
        Ok(count)
    }

    /// Write `<version>`, close `<Package>` and flush.
    pub fn finish(&mut self) -> Result<()> {
        self.expect_state(WriterState::InProgress, "finish")?;
        write!(
            self.out,
            "  <version>{}</version>\n</Package>\n",
            xml::escape(&self.api_version)
        )?;
        self.out.flush()?;
        self.state = WriterState::Finalized;
        Ok(())
    }

    /// Number of `<types>` blocks written so far.
    pub fn types_written(&self) -> usize {
        self.types_written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn expect_state(&self, expected: WriterState, action: &str) -> Result<()> {
        if self.state != expected {
            return Err(Error::new(ErrorKind::InvalidState(format!(
                "cannot {} while {:?}",
                action, self.state
            ))));
        }
        Ok(())
    }
}

/// Counts reported after a manifest is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestSummary {
    /// `<types>` blocks written.
    pub types: usize,
    /// `<members>` elements written.
    pub members: usize,
    /// Folder-scoped types left out under [`EmptyFolderPolicy::Omit`].
    pub omitted: Vec<String>,
}

/// Applies per-type expansion rules to produce manifest entries.
#[derive(Debug, Clone)]
pub struct ManifestBuilder<'a> {
    folders: &'a FolderIndex,
    standard_objects: &'a [String],
    empty_folders: EmptyFolderPolicy,
}

impl<'a> ManifestBuilder<'a> {
    pub fn new(folders: &'a FolderIndex, standard_objects: &'a [String]) -> Self {
        Self {
            folders,
            standard_objects,
            empty_folders: EmptyFolderPolicy::default(),
        }
    }

    pub fn with_empty_folder_policy(mut self, policy: EmptyFolderPolicy) -> Self {
        self.empty_folders = policy;
        self
    }

    /// Rule for `type_name`, given which categories the folder index covers.
    ///
    /// A folder-scoped type whose category is not indexed is treated as a
    /// plain wildcard type.
    pub fn rule_for(&self, type_name: &str) -> ExpansionRule {
        match ExpansionRule::for_type(type_name) {
            ExpansionRule::FolderScoped(category) if !self.folders.recognizes(category) => {
                ExpansionRule::Wildcard
            }
            rule => rule,
        }
    }

    /// Manifest entry for one type, or `None` when the type is omitted.
    pub fn entry(&self, type_name: &str) -> Option<PackageTypeMembers> {
        let members = match self.rule_for(type_name) {
            ExpansionRule::FolderScoped(category) => {
                let folders = self.folders.folders(category);
                if folders.is_empty() {
                    match self.empty_folders {
                        EmptyFolderPolicy::Keep => {
                            warn!(type_name, "no folders found, writing type without members");
                            Vec::new()
                        }
                        EmptyFolderPolicy::Wildcard => vec![WILDCARD.to_string()],
                        EmptyFolderPolicy::Omit => {
                            debug!(type_name, "no folders found, omitting type");
                            return None;
                        }
                    }
                } else {
                    folders.iter().flat_map(|f| f.member_names()).collect()
                }
            }
            ExpansionRule::CustomObject => self
                .standard_objects
                .iter()
                .cloned()
                .chain(std::iter::once(WILDCARD.to_string()))
                .collect(),
            ExpansionRule::Wildcard => vec![WILDCARD.to_string()],
        };

        Some(PackageTypeMembers {
            name: type_name.to_string(),
            members,
        })
    }

    /// Write one `<types>` block per catalog entry into a started writer.
    pub fn write<W: Write>(
        &self,
        catalog: &MetadataCatalog,
        writer: &mut ManifestWriter<W>,
    ) -> Result<ManifestSummary> {
        let mut summary = ManifestSummary::default();
        for type_name in catalog.iter() {
            match self.entry(type_name) {
                Some(entry) => {
                    summary.members += writer.write_type(&entry.name, &entry.members)?;
                    summary.types += 1;
                }
                None => summary.omitted.push(type_name.to_string()),
            }
        }
        Ok(summary)
    }

    /// Write a complete manifest to `out`.
    pub fn build<W: Write>(
        &self,
        catalog: &MetadataCatalog,
        out: W,
        api_version: &str,
    ) -> Result<ManifestSummary> {
        let mut writer = ManifestWriter::new(out, api_version);
        writer.start()?;
        let summary = self.write(catalog, &mut writer)?;
        writer.finish()?;
        Ok(summary)
    }

    /// Write a complete manifest to the file at `path`, replacing it.
    pub fn write_to_path(
        &self,
        catalog: &MetadataCatalog,
        path: &Path,
        api_version: &str,
    ) -> Result<ManifestSummary> {
        let file = File::create(path)?;
        self.build(catalog, BufWriter::new(file), api_version)
    }
}
