use pretty_assertions::assert_eq;

use super::*;
use crate::{DiagnosticKind, ParseError, ProfileCatalog, ProfileRecord};

fn names(catalog: &ProfileCatalog) -> Vec<&str> {
    catalog.records().iter().map(|r| r.name.as_str()).collect()
}

fn count_kind(catalog: &ProfileCatalog, kind: DiagnosticKind) -> usize {
    catalog
        .diagnostics()
        .iter()
        .filter(|d| d.kind == kind)
        .count()
}

#[test]
fn test_parse_sample_document() {
    let catalog = ProfileCatalog::from_slice(SAMPLE_DOCUMENT.as_bytes()).unwrap();

    assert_eq!(names(&catalog), ["Ada", "Grace", "Linus", "Tim", "Brendan"]);
    assert!(catalog.diagnostics().is_empty());

    let ada = &catalog.records()[0];
    assert_eq!(ada.platform, "iOS");
    assert_eq!(ada.location_name, "New York");
    assert_eq!(ada.location_details, "Main office");
    assert_eq!(ada.extra_str("title"), Some("Lead"));
    assert!(!ada.placeholder);

    let linus = &catalog.records()[2];
    assert_eq!(linus.platform, "Android");
    assert_eq!(linus.location_name, "New York");

    let tim = &catalog.records()[3];
    assert_eq!(tim.platform, "Web");
    assert_eq!(tim.location_name, "Boston");
    assert_eq!(tim.location_details, "");
    assert!(tim.extra.is_empty());
}

#[test]
fn test_invalid_json_is_an_error() {
    let result = ProfileCatalog::from_slice(b"{ \"response\": [");
    assert!(matches!(result, Err(ParseError::InvalidJson(_))));
}

#[test]
fn test_missing_document_is_an_error() {
    let resources = TestResources::default();
    let result = ProfileCatalog::load(&resources);
    match result {
        Err(ParseError::DocumentUnreadable(filename)) => {
            assert_eq!(filename, "ios_model_challenge.json");
        }
        other => panic!("expected unreadable document, got {other:?}"),
    }
}

#[test]
fn test_missing_locations_is_empty() {
    for document in [r#"{}"#, r#"{"response": {}}"#, r#"{"response": {"locations": 3}}"#] {
        let catalog = ProfileCatalog::from_slice(document.as_bytes()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(count_kind(&catalog, DiagnosticKind::FieldMissing), 1);
    }
}

#[test]
fn test_service_missing_platform_is_skipped() {
    let document = r#"{
        "response": {
            "locations": [
                {
                    "name": "New York",
                    "services": [
                        { "programmers": [ { "name": "Nobody" } ] },
                        { "platform": "iOS", "programmers": [ { "name": "Ada" } ] }
                    ]
                },
                {
                    "name": "Boston",
                    "services": [
                        { "platform": "Web", "programmers": [ { "name": "Tim" } ] }
                    ]
                }
            ]
        }
    }"#;
    let catalog = ProfileCatalog::from_slice(document.as_bytes()).unwrap();

    assert_eq!(names(&catalog), ["Ada", "Tim"]);
    assert_eq!(catalog.diagnostics().len(), 1);
    let diagnostic = &catalog.diagnostics()[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::FieldMissing);
    assert!(diagnostic.msg.contains("platform"), "{diagnostic}");
}

#[test]
fn test_malformed_branches_are_skipped() {
    let document = r#"{
        "response": {
            "locations": [
                { "services": [] },
                "not a location",
                {
                    "name": "Chicago",
                    "services": [
                        { "platform": "iOS" },
                        { "platform": "Android", "programmers": [
                            { "title": "Anonymous" },
                            42,
                            { "name": "Margaret" }
                        ] }
                    ]
                }
            ]
        }
    }"#;
    let catalog = ProfileCatalog::from_slice(document.as_bytes()).unwrap();

    assert_eq!(names(&catalog), ["Margaret"]);
    // Two bad locations, one bad service, two bad programmers.
    assert_eq!(count_kind(&catalog, DiagnosticKind::FieldMissing), 5);
}

#[test]
fn test_records_serialize_without_defaults() {
    let record = ProfileRecord {
        name: "Ada".to_owned(),
        platform: "iOS".to_owned(),
        location_name: "New York".to_owned(),
        location_details: String::new(),
        extra: serde_json::Map::new(),
        placeholder: false,
    };
    assert_eq!(
        serde_json::to_string(&record).unwrap(),
        r#"{"name":"Ada","platform":"iOS","location_name":"New York","location_details":""}"#,
    );

    let placeholder = serde_json::to_value(ProfileRecord::placeholder()).unwrap();
    assert_eq!(placeholder["placeholder"], serde_json::Value::Bool(true));
}
