//! The exported JSON Schema must agree with the engine on documents that
//! use no coercion or date floors.

use rstest::rstest;
use serde_json::{Value, json};
use wiz_core::SourceId;
use wiz_schema::export::to_json_schema;
use wiz_schema::{SchemaRegistry, validate_document};

fn exported_accepts(source: SourceId, doc: &Value) -> bool {
    let schema = to_json_schema(&SchemaRegistry::create_schema(source).unwrap());
    let validator = jsonschema::validator_for(&schema).expect("exported schema should compile");
    validator.is_valid(doc)
}

fn engine_accepts(source: SourceId, doc: &Value) -> bool {
    let schema = SchemaRegistry::create_schema(source).unwrap();
    validate_document(&schema, doc).is_empty()
}

#[rstest]
#[case::primary_valid(SourceId::Primary, json!({
    "projectName": "Spring sale", "dailyBudget": 10, "bidStrategy": "cpc",
    "keywords": "shoes", "categoryGroups": [{"name": "A", "cpc": 0.5}]
}), true)]
#[case::primary_empty_groups(SourceId::Primary, json!({
    "projectName": "Spring sale", "dailyBudget": 10, "bidStrategy": "cpc",
    "keywords": "shoes", "categoryGroups": []
}), false)]
#[case::primary_bad_enum(SourceId::Primary, json!({
    "projectName": "Spring sale", "dailyBudget": 10, "bidStrategy": "cpx",
    "keywords": "shoes", "categoryGroups": [{"name": "A", "cpc": 0.5}]
}), false)]
#[case::primary_unknown_key(SourceId::Primary, json!({
    "projectName": "Spring sale", "dailyBudget": 10, "bidStrategy": "cpc",
    "keywords": "shoes", "categoryGroups": [{"name": "A", "cpc": 0.5}], "extra": 1
}), false)]
#[case::secondary_valid(SourceId::Secondary, json!({
    "projectName": "Native", "targetUrl": "https://example.com", "bidAmount": 0.05,
    "dailyBudget": 10, "targeting": {"countries": ["US"]}
}), true)]
#[case::secondary_no_countries(SourceId::Secondary, json!({
    "projectName": "Native", "targetUrl": "https://example.com", "bidAmount": 0.05,
    "dailyBudget": 10, "targeting": {"countries": []}
}), false)]
#[case::tertiary_manual(SourceId::Tertiary, json!({
    "projectName": "Launch", "projectObjective": "visits", "startDate": "2025-01-01",
    "endDate": null, "budget": {"amount": 20, "type": "daily"},
    "bidding": {"strategy": "manual", "amount": 0.5}
}), true)]
#[case::tertiary_manual_missing_amount(SourceId::Tertiary, json!({
    "projectName": "Launch", "projectObjective": "visits", "startDate": "2025-01-01",
    "budget": {"amount": 20, "type": "daily"}, "bidding": {"strategy": "manual"}
}), false)]
#[case::tertiary_auto_blank_amount(SourceId::Tertiary, json!({
    "projectName": "Launch", "projectObjective": "visits", "startDate": "2025-01-01",
    "endDate": "", "budget": {"amount": 20, "type": "daily"},
    "bidding": {"strategy": "auto", "amount": ""}
}), true)]
#[case::tertiary_low_budget(SourceId::Tertiary, json!({
    "projectName": "Launch", "projectObjective": "visits", "startDate": "2025-01-01",
    "budget": {"amount": 5, "type": "daily"}, "bidding": {"strategy": "auto"}
}), false)]
fn export_agrees_with_engine(#[case] source: SourceId, #[case] doc: Value, #[case] expected: bool) {
    assert_eq!(engine_accepts(source, &doc), expected, "engine");
    assert_eq!(exported_accepts(source, &doc), expected, "export");
}
