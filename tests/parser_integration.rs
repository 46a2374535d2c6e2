//! Integration tests for structural extraction.
//!
//! These tests validate the records produced for the Java fixtures in
//! `testdata/model`.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rolecheck::{AnalysisContext, FileReport, TypeDeclaration, TypeKind};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn analyze_fixture(name: &str) -> FileReport {
    let ctx = AnalysisContext::new(testdata_path().join("model"));
    ctx.analyze_file(name)
}

fn top_level<'a>(report: &'a FileReport, name: &str) -> &'a TypeDeclaration {
    report
        .types()
        .iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("expected top-level type {}", name))
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn test_top_level_types_in_source_order() {
    let report = analyze_fixture("Customer.java");
    assert!(!report.is_failed(), "{:?}", report.error());

    let names: Vec<_> = report.types().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Customer", "CustomerNotes"]);
    assert_eq!(report.types()[0].kind, TypeKind::Class);
}

#[test]
fn test_declaration_annotations_and_modifiers() {
    let report = analyze_fixture("Customer.java");
    let customer = top_level(&report, "Customer");

    assert_eq!(customer.annotations, vec!["entity", "table"]);
    assert_eq!(customer.modifiers, vec!["public"]);

    let notes = top_level(&report, "CustomerNotes");
    assert!(notes.annotations.is_empty());
    assert!(notes.modifiers.is_empty());
}

// =============================================================================
// Fields and methods
// =============================================================================

#[test]
fn test_fields_in_order_with_expansion() {
    let report = analyze_fixture("Customer.java");
    let customer = top_level(&report, "Customer");

    let names: Vec<_> = customer.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "firstName", "lastName", "aliases", "audit"]);

    let first = customer.find_field("firstName").unwrap();
    let last = customer.find_field("lastName").unwrap();
    assert_eq!(first.field_type, last.field_type);
    assert_eq!(first.annotations, last.annotations);
    assert_eq!(first.modifiers, last.modifiers);
    assert_eq!(first.annotations, vec!["column"]);
    assert_eq!(first.modifiers, vec!["private"]);

    let id = customer.find_field("id").unwrap();
    assert_eq!(id.annotations, vec!["id", "generatedvalue"]);
    assert_eq!(id.field_type.as_deref(), Some("Long"));
}

#[test]
fn test_two_level_generic_field_type() {
    let report = analyze_fixture("Customer.java");
    let customer = top_level(&report, "Customer");
    let aliases = customer.find_field("aliases").unwrap();
    assert_eq!(
        aliases.field_type.as_deref(),
        Some("Map<String,List<Identifier>>")
    );
}

#[test]
fn test_methods_exclude_constructors_and_anonymous_members() {
    let report = analyze_fixture("Customer.java");
    let customer = top_level(&report, "Customer");

    let names: Vec<_> = customer.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["getFirstName", "toString"]);
    assert_eq!(customer.methods[1].annotations, vec!["override"]);
    assert_eq!(customer.methods[1].modifiers, vec!["public"]);
}

// =============================================================================
// Nested types
// =============================================================================

#[test]
fn test_nested_types_two_levels_deep() {
    let report = analyze_fixture("Customer.java");
    let customer = top_level(&report, "Customer");

    let nested: Vec<_> = customer
        .nested_types
        .iter()
        .map(|t| (t.name.as_str(), t.kind))
        .collect();
    assert_eq!(nested, vec![("Address", TypeKind::Class), ("Tier", TypeKind::Enum)]);

    let address = customer.find_nested("Address").unwrap();
    assert_eq!(address.modifiers, vec!["public", "static"]);
    assert_eq!(address.nested_types.len(), 1);

    let geo = &address.nested_types[0];
    assert_eq!(geo.name, "Geo");
    assert_eq!(geo.modifiers, vec!["static", "final"]);
    assert!(geo.nested_types.is_empty());
    let geo_fields: Vec<_> = geo.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(geo_fields, vec!["lat", "lon"]);

    let tier = customer.find_nested("Tier").unwrap();
    let rated = tier.find_nested("Rated").unwrap();
    assert_eq!(rated.kind, TypeKind::Interface);
    assert!(rated.fields.is_empty());
    assert_eq!(rated.methods[0].name, "score");
}

#[test]
fn test_walk_visits_every_declaration() {
    let report = analyze_fixture("Customer.java");
    let names: Vec<_> = report
        .types()
        .iter()
        .flat_map(TypeDeclaration::walk)
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Customer", "Address", "Geo", "Tier", "Rated", "CustomerNotes"]
    );
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_parsing_is_idempotent() {
    let first = analyze_fixture("Customer.java");
    let second = analyze_fixture("Customer.java");
    assert_eq!(first, second);
}

#[test]
fn test_source_and_file_entry_points_agree() {
    let path = testdata_path().join("model").join("Plain.java");
    let source = std::fs::read(&path).unwrap();

    let ctx = AnalysisContext::new(testdata_path().join("model"));
    let from_source = ctx.analyze_source("Plain.java", &source);
    let from_file = ctx.analyze_file(&path);
    assert_eq!(from_source, from_file);
}
