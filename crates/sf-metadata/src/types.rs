//! Common constants for package manifests.

/// Default Metadata API version written into `<version>`.
pub const DEFAULT_API_VERSION: &str = "43.0";

/// Namespace of the `<Package>` root element.
pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

/// Member value meaning "every member of this type".
pub const WILDCARD: &str = "*";

/// Metadata type that also lists standard objects by name.
pub const CUSTOM_OBJECT_TYPE: &str = "CustomObject";

/// File name of the generated manifest.
pub const MANIFEST_FILE_NAME: &str = "package.xml";
