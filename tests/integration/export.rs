//! Export pipeline tests against an in-memory backend.

use super::common::RecordingBackend;
use busbar_sf_export::{build_manifest, export, ExportOptions};
use busbar_sf_metadata::{
    CatalogStrategy, EmptyFolderPolicy, FolderCategory, STATIC_METADATA_TYPES,
};
use serde_json::json;

/// Split a manifest into `(type name, members)` pairs in document order.
fn type_blocks(xml: &str) -> Vec<(String, Vec<String>)> {
    let mut blocks = Vec::new();
    let mut members = Vec::new();
    for line in xml.lines().map(str::trim) {
        if let Some(member) = line
            .strip_prefix("<members>")
            .and_then(|l| l.strip_suffix("</members>"))
        {
            members.push(member.to_string());
        } else if let Some(name) = line
            .strip_prefix("<name>")
            .and_then(|l| l.strip_suffix("</name>"))
        {
            blocks.push((name.to_string(), std::mem::take(&mut members)));
        }
    }
    blocks
}

fn scenario_backend() -> RecordingBackend {
    RecordingBackend::new()
        .with_metadata_types(&["ApexClass", "CustomObject", "Report"])
        .with_standard_objects("Account\nContact__Tag\n")
        .with_records(
            "Folder",
            json!([
                {"Id": "F1", "Name": "My Reports", "DeveloperName": "MyReports", "Type": "Report", "NamespacePrefix": null}
            ]),
        )
        .with_records(
            "Report",
            json!([{"Id": "00O1", "DeveloperName": "Q1", "OwnerId": "F1"}]),
        )
}

#[tokio::test]
async fn test_export_scenario_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let backend = scenario_backend();
    let options = ExportOptions::new(dir.path()).with_catalog(CatalogStrategy::Dynamic);

    let report = export(&backend, &options).await.expect("export should succeed");

    let xml = std::fs::read_to_string(&report.manifest_path).unwrap();
    let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<Package xmlns=\"http://soap.sforce.com/2006/04/metadata\">
  <types>
    <members>*</members>
    <name>ApexClass</name>
  </types>
  <types>
    <members>Account</members>
    <members>*</members>
    <name>CustomObject</name>
  </types>
  <types>
    <members>MyReports</members>
    <members>MyReports/Q1</members>
    <name>Report</name>
  </types>
  <version>43.0</version>
</Package>
";
    assert_eq!(xml, expected);
    assert_eq!(report.summary.types, 3);
    assert_eq!(report.summary.members, 5);
    assert_eq!(report.archive, dir.path().join("unpackaged.zip"));
    assert!(report.archive.is_file());
}

#[tokio::test]
async fn test_backend_calls_run_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let backend = scenario_backend();
    let options = ExportOptions::new(dir.path()).with_catalog(CatalogStrategy::Dynamic);

    export(&backend, &options).await.unwrap();

    assert_eq!(
        backend.calls(),
        vec![
            "query:Folder",
            "query:Report",
            "query:Dashboard",
            "query:EmailTemplate",
            "query:Document",
            "sobject:list",
            "describemetadata",
            "retrieve",
        ]
    );
}

#[tokio::test]
async fn test_wildcard_types_with_empty_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let types = ["ApexClass", "ApexPage", "Flow", "Layout"];
    let backend = RecordingBackend::new().with_metadata_types(&types);
    let options = ExportOptions::new(dir.path()).with_catalog(CatalogStrategy::Dynamic);

    build_manifest(&backend, &options).await.unwrap();

    let xml = std::fs::read_to_string(options.manifest_path()).unwrap();
    let blocks = type_blocks(&xml);
    assert_eq!(blocks.len(), types.len());
    for ((name, members), expected) in blocks.iter().zip(types) {
        assert_eq!(name, expected);
        assert_eq!(members, &vec!["*".to_string()]);
    }
    assert_eq!(xml.matches("<members>*</members>").count(), types.len());
}

#[tokio::test]
async fn test_static_catalog_order_and_empty_folders() {
    let dir = tempfile::tempdir().unwrap();
    let backend = RecordingBackend::new();
    let options = ExportOptions::new(dir.path());

    let summary = build_manifest(&backend, &options).await.unwrap();
    assert_eq!(summary.types, STATIC_METADATA_TYPES.len());
    assert!(!backend.calls().contains(&"describemetadata".to_string()));

    let xml = std::fs::read_to_string(options.manifest_path()).unwrap();
    let blocks = type_blocks(&xml);
    let names: Vec<&str> = blocks.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, STATIC_METADATA_TYPES);

    for (name, members) in &blocks {
        match name.as_str() {
            // No folders in the org: folder-scoped types are written without members.
            "Report" | "Dashboard" | "EmailTemplate" | "Document" => assert!(members.is_empty()),
            _ => assert_eq!(members, &vec!["*".to_string()], "{name}"),
        }
    }
}

#[tokio::test]
async fn test_empty_folder_policies() {
    let backend = RecordingBackend::new().with_metadata_types(&["Dashboard", "ApexClass"]);

    let dir = tempfile::tempdir().unwrap();
    let options = ExportOptions::new(dir.path())
        .with_catalog(CatalogStrategy::Dynamic)
        .with_empty_folders(EmptyFolderPolicy::Wildcard);
    build_manifest(&backend, &options).await.unwrap();
    let blocks = type_blocks(&std::fs::read_to_string(options.manifest_path()).unwrap());
    assert_eq!(blocks[0], ("Dashboard".to_string(), vec!["*".to_string()]));

    let dir = tempfile::tempdir().unwrap();
    let options = ExportOptions::new(dir.path())
        .with_catalog(CatalogStrategy::Dynamic)
        .with_empty_folders(EmptyFolderPolicy::Omit);
    let summary = build_manifest(&backend, &options).await.unwrap();
    assert_eq!(summary.omitted, vec!["Dashboard"]);
    let blocks = type_blocks(&std::fs::read_to_string(options.manifest_path()).unwrap());
    assert_eq!(blocks, vec![("ApexClass".to_string(), vec!["*".to_string()])]);
}

#[tokio::test]
async fn test_unmatched_items_never_written() {
    let dir = tempfile::tempdir().unwrap();
    let backend = RecordingBackend::new()
        .with_metadata_types(&["Dashboard", "EmailTemplate"])
        .with_records(
            "Folder",
            json!([
                {"Id": "D1", "Name": "Exec", "DeveloperName": "Exec", "Type": "Dashboard"},
                {"Id": "E1", "Name": "Letters", "DeveloperName": "Letters", "Type": "Email"},
                {"Id": "X1", "Name": "Other", "DeveloperName": "Other", "Type": "Insights"}
            ]),
        )
        .with_records(
            "Dashboard",
            json!([
                {"Id": "01Z1", "DeveloperName": "Pipeline", "FolderId": "D1"},
                {"Id": "01Z2", "DeveloperName": "Personal", "FolderId": "005000000000001"},
                {"Id": "01Z3", "DeveloperName": "InOther", "FolderId": "X1"}
            ]),
        )
        .with_records(
            "EmailTemplate",
            json!([
                {"Id": "00X1", "DeveloperName": "Welcome", "FolderId": "E1"},
                {"Id": "00X2", "DeveloperName": "Unfiled", "FolderId": null},
                {"Id": "00X3", "DeveloperName": "Goodbye", "FolderId": "E1"}
            ]),
        );
    let options = ExportOptions::new(dir.path()).with_catalog(CatalogStrategy::Dynamic);

    build_manifest(&backend, &options).await.unwrap();

    let xml = std::fs::read_to_string(options.manifest_path()).unwrap();
    assert!(!xml.contains("Personal"));
    assert!(!xml.contains("InOther"));
    assert!(!xml.contains("Unfiled"));
    assert!(!xml.contains("Other"));
    assert_eq!(
        type_blocks(&xml),
        vec![
            (
                "Dashboard".to_string(),
                vec!["Exec".to_string(), "Exec/Pipeline".to_string()]
            ),
            (
                "EmailTemplate".to_string(),
                vec![
                    "Letters".to_string(),
                    "Letters/Welcome".to_string(),
                    "Letters/Goodbye".to_string()
                ]
            ),
        ]
    );
}

#[tokio::test]
async fn test_document_items_attach_to_their_folder() {
    let dir = tempfile::tempdir().unwrap();
    let backend = RecordingBackend::new()
        .with_metadata_types(&["Document"])
        .with_records(
            "Folder",
            json!([{"Id": "G1", "Name": "Logos", "DeveloperName": "Logos", "Type": "Document"}]),
        )
        .with_records(
            "Document",
            json!([
                {"Id": "0151", "DeveloperName": "CompanyLogo", "FolderId": "G1"},
                {"Id": "0152", "DeveloperName": "PersonalFile", "FolderId": "005000000000001"}
            ]),
        );
    let options = ExportOptions::new(dir.path()).with_catalog(CatalogStrategy::Dynamic);

    build_manifest(&backend, &options).await.unwrap();

    let blocks = type_blocks(&std::fs::read_to_string(options.manifest_path()).unwrap());
    assert_eq!(
        blocks,
        vec![(
            "Document".to_string(),
            vec!["Logos".to_string(), "Logos/CompanyLogo".to_string()]
        )]
    );
    assert!(backend.calls().contains(&"query:Document".to_string()));
}

#[tokio::test]
async fn test_unindexed_document_type_uses_wildcard() {
    let dir = tempfile::tempdir().unwrap();
    let backend = RecordingBackend::new()
        .with_metadata_types(&["Document"])
        .with_records(
            "Folder",
            json!([{"Id": "G1", "Name": "Logos", "DeveloperName": "Logos", "Type": "Document"}]),
        );
    let options = ExportOptions::new(dir.path())
        .with_catalog(CatalogStrategy::Dynamic)
        .with_folder_categories(&[
            FolderCategory::Report,
            FolderCategory::Dashboard,
            FolderCategory::Email,
        ]);

    build_manifest(&backend, &options).await.unwrap();

    let blocks = type_blocks(&std::fs::read_to_string(options.manifest_path()).unwrap());
    assert_eq!(blocks, vec![("Document".to_string(), vec!["*".to_string()])]);
    assert!(!backend.calls().contains(&"query:Document".to_string()));
}

#[tokio::test]
async fn test_builds_are_byte_identical() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    for dir in [&first, &second] {
        let options = ExportOptions::new(dir.path());
        build_manifest(&scenario_backend(), &options).await.unwrap();
    }

    let a = std::fs::read(first.path().join("package.xml")).unwrap();
    let b = std::fs::read(second.path().join("package.xml")).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_backend_failure_aborts_before_retrieve() {
    let dir = tempfile::tempdir().unwrap();
    let backend = scenario_backend().failing_on("sobject:list");
    let options = ExportOptions::new(dir.path());

    let err = export(&backend, &options).await.unwrap_err();
    assert!(format!("{err:#}").contains("simulated failure"));
    assert!(!backend.calls().contains(&"retrieve".to_string()));
}

#[tokio::test]
async fn test_output_directory_created() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("nested").join("export");
    let options = ExportOptions::new(&dir).with_api_version("62.0");

    build_manifest(&RecordingBackend::new(), &options).await.unwrap();

    let xml = std::fs::read_to_string(dir.join("package.xml")).unwrap();
    assert!(xml.ends_with("  <version>62.0</version>\n</Package>\n"));
}
