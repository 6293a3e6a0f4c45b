//! Integration test: schema text to rules document, end to end.
//!
//! Uses the fixtures under `tests/fixtures/` to check the whole
//! schema → descriptors → collections → composer pipeline.

use tenant_rules_core::{
    compile_schema, extract_descriptors, load_rules_from_toml, AccessPattern, AuthoringError,
    Config, SchemaError, GENERATED_RULES_HEADER,
};
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).expect("fixture should exist")
}

fn compile_fixture() -> String {
    let toml_content = fixture("tenant-rules.toml");
    let config = Config::parse(&toml_content).expect("fixture config should parse");
    let extra = load_rules_from_toml(&toml_content).expect("fixture rules should load");
    compile_schema(&fixture("schema.graphql"), &extra, &config).expect("fixture should compile")
}

// ── Happy path ──

#[test]
fn one_match_block_per_annotated_type_in_order() {
    let descriptors = extract_descriptors(&fixture("schema.graphql")).unwrap();
    let summary: Vec<_> = descriptors
        .iter()
        .map(|d| (d.name.as_str(), d.access_pattern()))
        .collect();
    assert_eq!(
        summary,
        [
            ("userProfiles", AccessPattern::DocPerUser),
            ("billingSettings", AccessPattern::DocPerTenant),
            ("invoices", AccessPattern::IndexedByTenant),
            ("announcements", AccessPattern::IndexedByTenant),
        ]
    );

    let rules = compile_fixture();
    let generated = &rules[rules.find(GENERATED_RULES_HEADER).unwrap()..];
    let positions: Vec<_> = [
        "match /userProfiles/{userId} {",
        "match /billingSettings/{tenantId} {",
        "match /invoices/{docId} {",
        "match /announcements/{docId} {",
    ]
    .iter()
    .map(|block| {
        assert_eq!(generated.matches(block).count(), 1, "{block}");
        generated.find(block).unwrap()
    })
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn extra_rules_precede_generated_rules() {
    let rules = compile_fixture();
    let registry = rules.find("match /tenants/{tenantId} {").unwrap();
    assert!(registry < rules.find(GENERATED_RULES_HEADER).unwrap());
    assert!(rules.contains("// Tenant registry, managed by platform admins"));
    assert!(!rules[registry..rules.find(GENERATED_RULES_HEADER).unwrap()].contains("allow delete"));
}

#[test]
fn flags_shape_indexed_collections() {
    let rules = compile_fixture();
    let invoices = block(&rules, "match /invoices/{docId} {");
    assert!(invoices.contains("allow update: if hasPermission('invoice.update', resource.data.tenantId);"));
    assert!(!invoices.contains("allow delete"));

    let announcements = block(&rules, "match /announcements/{docId} {");
    assert!(announcements.contains("allow read: if true;"));
    assert!(!announcements.contains("announcement.read"));
}

#[test]
fn helper_is_declared_per_block() {
    let rules = compile_fixture();
    // doc-per-tenant + two indexed collections; never at the top level
    assert_eq!(rules.matches("function hasPermission(").count(), 3);
    assert!(!block(&rules, "match /userProfiles/{userId} {").contains("function"));
}

#[test]
fn output_is_byte_identical_across_runs() {
    assert_eq!(compile_fixture(), compile_fixture());
}

// ── Error cases ──

#[test]
fn doc_per_tenant_without_write_permission_is_rejected() {
    let schema = fixture("schema.graphql").replace(
        "    writePermission: \"billing.manage\"\n",
        "",
    );
    let err = compile_schema(&schema, &[], &Config::default()).unwrap_err();

    match err {
        SchemaError::Authoring {
            source:
                AuthoringError::MissingPermission {
                    ref type_name,
                    access_pattern,
                    permission,
                },
            ..
        } => {
            assert_eq!(type_name, "BillingSettings");
            assert_eq!(access_pattern, AccessPattern::DocPerTenant);
            assert_eq!(permission, "writePermission");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn quote_in_permission_produces_no_document() {
    let schema = r#"
type Settings @collection(
  name: "settings"
  type: DOC_PER_TENANT
  readPermission: "x', tenantId) || true || hasPermission('y"
  writePermission: "settings.write"
) { id: ID }
"#;
    let err = compile_schema(schema, &[], &Config::default()).unwrap_err();
    assert!(matches!(
        err.as_authoring(),
        Some(AuthoringError::InvalidPermission {
            permission: "readPermission",
            ..
        })
    ));
}

#[test]
fn wildcard_in_name_produces_no_document() {
    let schema = r#"type Profile @collection(name: "a/{x=**}", type: DOC_PER_USER) { id: ID }"#;
    let err = compile_schema(schema, &[], &Config::default()).unwrap_err();
    assert!(matches!(
        err.as_authoring(),
        Some(AuthoringError::InvalidName { type_name, .. }) if type_name == "Profile"
    ));
}

fn block<'a>(rules: &'a str, header: &str) -> &'a str {
    let start = rules.find(header).unwrap();
    let end = rules[start..].find("\n    }").unwrap();
    &rules[start..start + end]
}
