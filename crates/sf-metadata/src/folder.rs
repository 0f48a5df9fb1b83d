//! Folder index for folder-scoped metadata.
//!
//! Reports, dashboards, email templates and documents live inside folders and
//! must be named in the manifest as `<folder>` plus `<folder>/<item>`. The
//! index groups folders by [`FolderCategory`] and attaches items to their
//! folder by id.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use busbar_sf_cli::{FolderItemRow, FolderRow, MetadataBackend};
use tracing::{debug, info};

use crate::error::Result;

/// Query for every named folder in the org.
pub const FOLDER_QUERY: &str =
    "Select Id, Name, DeveloperName, Type, NamespacePrefix from Folder where DeveloperName!=null";

/// Category of a folder, as reported by the `Folder.Type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderCategory {
    Report,
    Dashboard,
    Email,
    Document,
}

impl FolderCategory {
    /// Every category the index knows about.
    pub const ALL: [FolderCategory; 4] = [
        FolderCategory::Report,
        FolderCategory::Dashboard,
        FolderCategory::Email,
        FolderCategory::Document,
    ];

    /// Value of `Folder.Type` for this category.
    pub fn folder_type(&self) -> &'static str {
        match self {
            FolderCategory::Report => "Report",
            FolderCategory::Dashboard => "Dashboard",
            FolderCategory::Email => "Email",
            FolderCategory::Document => "Document",
        }
    }

    /// Metadata type whose members live in folders of this category.
    pub fn metadata_type(&self) -> &'static str {
        match self {
            FolderCategory::Report => "Report",
            FolderCategory::Dashboard => "Dashboard",
            FolderCategory::Email => "EmailTemplate",
            FolderCategory::Document => "Document",
        }
    }

    /// SOQL query listing the items stored in folders of this category.
    ///
    /// Reports reference their folder through `OwnerId`.
    pub fn item_query(&self) -> &'static str {
        match self {
            FolderCategory::Report => "Select Id, DeveloperName, OwnerId from Report",
            FolderCategory::Dashboard => "Select Id, DeveloperName, FolderId from Dashboard",
            FolderCategory::Email => "Select Id, DeveloperName, FolderId from EmailTemplate",
            FolderCategory::Document => "Select Id, DeveloperName, FolderId from Document",
        }
    }
}

impl fmt::Display for FolderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_type())
    }
}

impl FromStr for FolderCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Report" => Ok(FolderCategory::Report),
            "Dashboard" => Ok(FolderCategory::Dashboard),
            "Email" => Ok(FolderCategory::Email),
            "Document" => Ok(FolderCategory::Document),
            _ => Err(format!("Unknown folder type: {}", s)),
        }
    }
}

/// An item stored in a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub developer_name: String,
    /// Id of the owning folder.
    pub folder_id: String,
}

/// A folder and the items discovered inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRecord {
    pub id: String,
    pub developer_name: String,
    pub category: FolderCategory,
    /// Items in discovery order.
    pub members: Vec<MemberRecord>,
}

impl FolderRecord {
    /// Manifest member names: the folder itself, then `<folder>/<item>` per item.
    pub fn member_names(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.developer_name.clone()).chain(
            self.members
                .iter()
                .map(move |m| format!("{}/{}", self.developer_name, m.developer_name)),
        )
    }
}

#[derive(Debug, Clone, Default)]
struct CategoryFolders {
    folders: Vec<FolderRecord>,
    by_id: HashMap<String, usize>,
}

/// Folders grouped by category, keyed by folder id, in insertion order.
#[derive(Debug, Clone)]
pub struct FolderIndex {
    categories: HashMap<FolderCategory, CategoryFolders>,
}

impl Default for FolderIndex {
    fn default() -> Self {
        Self::new(&FolderCategory::ALL)
    }
}

impl FolderIndex {
    /// Create an empty index that accepts folders of the given categories.
    pub fn new(categories: &[FolderCategory]) -> Self {
        Self {
            categories: categories
                .iter()
                .map(|c| (*c, CategoryFolders::default()))
                .collect(),
        }
    }

    /// Build an index from raw folder rows.
    pub fn from_folders(
        rows: impl IntoIterator<Item = FolderRow>,
        categories: &[FolderCategory],
    ) -> Self {
        let mut index = Self::new(categories);
        index.add_folders(rows);
        index
    }

    /// Whether folders of this category are indexed.
    pub fn recognizes(&self, category: FolderCategory) -> bool {
        self.categories.contains_key(&category)
    }

    /// Add folder rows, ignoring unrecognized types and repeated ids.
    ///
    /// Returns the number of folders added.
    pub fn add_folders(&mut self, rows: impl IntoIterator<Item = FolderRow>) -> usize {
        let mut added = 0;
        for row in rows {
            let Ok(category) = row.folder_type.parse::<FolderCategory>() else {
                continue;
            };
            let Some(bucket) = self.categories.get_mut(&category) else {
                continue;
            };
            if bucket.by_id.contains_key(&row.id) {
                continue;
            }

            bucket.by_id.insert(row.id.clone(), bucket.folders.len());
            bucket.folders.push(FolderRecord {
                id: row.id,
                developer_name: row.developer_name,
                category,
                members: Vec::new(),
            });
            added += 1;
        }
        added
    }

    /// Attach item rows to their folders within `category`.
    ///
    /// Items whose folder is not indexed (personal folders, unsupported
    /// folders, or no folder at all) are dropped. Returns the number attached.
    pub fn add_items(
        &mut self,
        category: FolderCategory,
        rows: impl IntoIterator<Item = FolderItemRow>,
    ) -> usize {
        let Some(bucket) = self.categories.get_mut(&category) else {
            return 0;
        };

        let mut attached = 0;
        for row in rows {
            let slot = row
                .folder_id
                .as_ref()
                .and_then(|id| bucket.by_id.get(id).copied());
            let (Some(slot), Some(folder_id)) = (slot, row.folder_id) else {
                debug!(%category, item = %row.developer_name, "dropping item without indexed folder");
                continue;
            };

            bucket.folders[slot].members.push(MemberRecord {
                developer_name: row.developer_name,
                folder_id,
            });
            attached += 1;
        }
        attached
    }

    /// Folders of a category in insertion order. Empty if none or unrecognized.
    pub fn folders(&self, category: FolderCategory) -> &[FolderRecord] {
        self.categories
            .get(&category)
            .map(|b| b.folders.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a folder by category and id.
    pub fn folder(&self, category: FolderCategory, id: &str) -> Option<&FolderRecord> {
        let bucket = self.categories.get(&category)?;
        bucket.by_id.get(id).map(|&slot| &bucket.folders[slot])
    }

    /// Query folders and their items from the backend.
    ///
    /// Queries run one after another: the folder listing first, then one item
    /// listing per recognized category.
    pub async fn load<B: MetadataBackend>(
        backend: &B,
        categories: &[FolderCategory],
    ) -> Result<Self> {
        let rows: Vec<FolderRow> = backend.query(FOLDER_QUERY).await?;
        let mut index = Self::new(categories);
        let folders = index.add_folders(rows);
        info!(folders, "indexed folders");

        for category in FolderCategory::ALL {
            if !index.recognizes(category) {
                continue;
            }
            let items: Vec<FolderItemRow> = backend.query(category.item_query()).await?;
            let attached = index.add_items(category, items);
            debug!(%category, attached, "attached folder items");
        }

        Ok(index)
    }
}
