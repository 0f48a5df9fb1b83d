//! Metadata type catalog: which `<types>` blocks the manifest contains.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use busbar_sf_cli::MetadataBackend;
use tracing::info;

use crate::error::Result;

/// Curated list of metadata types retrieved by the static catalog, in manifest order.
pub const STATIC_METADATA_TYPES: &[&str] = &[
    "AccountSettings",
    "ActivitiesSettings",
    "AddressSettings",
    "AnalyticSnapshot",
    "ApexClass",
    "ApexComponent",
    "ApexPage",
    "ApexTrigger",
    "ApprovalProcess",
    "AssignmentRules",
    "AuraDefinitionBundle",
    "AuthProvider",
    "AutoResponseRules",
    "BusinessHoursSettings",
    "BusinessProcess",
    "CallCenter",
    "CaseSettings",
    "ChatterAnswersSettings",
    "CompanySettings",
    "Community",
    "CompactLayout",
    "ConnectedApp",
    "ContractSettings",
    "CustomApplication",
    "CustomApplicationComponent",
    "CustomField",
    "CustomLabels",
    "CustomMetadata",
    "CustomObject",
    "CustomObjectTranslation",
    "CustomPageWebLink",
    "CustomPermission",
    "CustomSite",
    "CustomTab",
    "DataCategoryGroup",
    "Dashboard",
    "Document",
    "DuplicateRule",
    "EmailTemplate",
    "EntitlementProcess",
    "EntitlementSettings",
    "EntitlementTemplate",
    "ExternalDataSource",
    "FieldSet",
    "Flow",
    "FlowDefinition",
    "Folder",
    "ForecastingSettings",
    "Group",
    "HomePageComponent",
    "HomePageLayout",
    "IdeasSettings",
    "KnowledgeSettings",
    "Layout",
    "Letterhead",
    "ListView",
    "LiveAgentSettings",
    "LiveChatAgentConfig",
    "LiveChatButton",
    "LiveChatDeployment",
    "MatchingRules",
    "MilestoneType",
    "MobileSettings",
    "NamedFilter",
    "Network",
    "OpportunitySettings",
    "PermissionSet",
    "Portal",
    "PostTemplate",
    "ProductSettings",
    "Profile",
    "ProfileSessionSetting",
    "Queue",
    "QuickAction",
    "QuoteSettings",
    "RecordType",
    "RemoteSiteSetting",
    "ReportType",
    "Report",
    "Role",
    "SamlSsoConfig",
    "Scontrol",
    "SecuritySettings",
    "SharingReason",
    "SharingCriteriaRule",
    "SharingOwnerRule",
    "SharingTerritoryRule",
    "Skill",
    "StaticResource",
    "Territory",
    "Translations",
    "ValidationRule",
    "Workflow",
];

/// How the catalog is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogStrategy {
    /// Use [`STATIC_METADATA_TYPES`].
    #[default]
    Static,
    /// Ask the org which types it supports.
    Dynamic,
}

impl fmt::Display for CatalogStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogStrategy::Static => write!(f, "static"),
            CatalogStrategy::Dynamic => write!(f, "dynamic"),
        }
    }
}

impl FromStr for CatalogStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "static" => Ok(CatalogStrategy::Static),
            "dynamic" => Ok(CatalogStrategy::Dynamic),
            _ => Err(format!("Unknown catalog strategy: {}", s)),
        }
    }
}

/// Ordered metadata type names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataCatalog {
    types: Vec<String>,
}

impl MetadataCatalog {
    /// Catalog from explicit names. Repeated names keep their first position.
    pub fn from_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let types = types
            .into_iter()
            .map(Into::into)
            .filter(|t| seen.insert(t.clone()))
            .collect();
        Self { types }
    }

    /// The curated static catalog.
    pub fn static_catalog() -> Self {
        Self::from_types(STATIC_METADATA_TYPES.iter().copied())
    }

    /// Discover the org's metadata types, in the order the backend returns them.
    pub async fn discover<B: MetadataBackend>(backend: &B) -> Result<Self> {
        let described = backend.describe_metadata().await?;
        let catalog = Self::from_types(
            described
                .metadata_objects
                .into_iter()
                .map(|obj| obj.xml_name),
        );
        info!(types = catalog.len(), "discovered metadata types");
        Ok(catalog)
    }

    /// Obtain the catalog using `strategy`.
    pub async fn resolve<B: MetadataBackend>(strategy: CatalogStrategy, backend: &B) -> Result<Self> {
        match strategy {
            CatalogStrategy::Static => Ok(Self::static_catalog()),
            CatalogStrategy::Dynamic => Self::discover(backend).await,
        }
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
