//! Per-source schema behavior: valid documents pass, each broken field
//! reports its own message at its own path.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use wiz_core::{PathStyle, SourceId};
use wiz_schema::{SchemaRegistry, format_validation_errors, validate_document};

fn valid_document(source: SourceId) -> Value {
    match source {
        SourceId::Primary => json!({
            "projectName": "Test Primary Project",
            "dailyBudget": 10,
            "bidStrategy": "cpc",
            "keywords": "test, keywords",
            "categoryGroups": [{"name": "Test Category Group", "cpc": 0.5}]
        }),
        SourceId::Secondary => json!({
            "projectName": "Test Secondary Project",
            "targetUrl": "https://example.com",
            "bidAmount": 0.05,
            "dailyBudget": 10,
            "targeting": {"countries": ["US", "CA"], "devices": ["desktop", "mobile"]}
        }),
        SourceId::Tertiary => json!({
            "projectName": "Test Tertiary Project",
            "projectObjective": "visits",
            "startDate": "2025-01-01",
            "endDate": "2025-02-01",
            "budget": {"amount": 20, "type": "daily"},
            "bidding": {"strategy": "manual", "amount": 0.5}
        }),
    }
}

/// Set `pointer` (JSON pointer) to `value`, or remove it when `value` is `None`.
fn edit(source: SourceId, pointer: &str, value: Option<Value>) -> Value {
    let mut doc = valid_document(source);
    let (parent, key) = pointer.rsplit_once('/').unwrap();
    let target = doc.pointer_mut(parent).unwrap();
    match (target, value) {
        (Value::Object(map), Some(v)) => {
            map.insert(key.to_string(), v);
        }
        (Value::Object(map), None) => {
            map.remove(key);
        }
        (other, _) => panic!("cannot edit {pointer} in {other}"),
    }
    doc
}

fn errors_for(source: SourceId, doc: &Value) -> Vec<(String, String)> {
    let schema = SchemaRegistry::create_schema(source).unwrap();
    format_validation_errors(&validate_document(&schema, doc), PathStyle::Bracket)
        .into_iter()
        .collect()
}

#[rstest]
#[case::primary(SourceId::Primary)]
#[case::secondary(SourceId::Secondary)]
#[case::tertiary(SourceId::Tertiary)]
fn valid_documents_pass(#[case] source: SourceId) {
    assert_eq!(errors_for(source, &valid_document(source)), vec![]);
}

#[rstest]
#[case::primary(SourceId::Primary)]
#[case::secondary(SourceId::Secondary)]
#[case::tertiary(SourceId::Tertiary)]
fn every_source_requires_project_name(#[case] source: SourceId) {
    let doc = edit(source, "/projectName", Some(json!("ab")));
    assert_eq!(
        errors_for(source, &doc),
        vec![("projectName".into(), "Project name must be at least 3 characters".into())]
    );
}

#[rstest]
#[case::daily_budget_type("/dailyBudget", Some(json!("abc")), "dailyBudget", "Daily budget must be a number")]
#[case::daily_budget_min("/dailyBudget", Some(json!(3)), "dailyBudget", "Daily budget must be at least $5")]
#[case::daily_budget_missing("/dailyBudget", None, "dailyBudget", "Daily budget is required")]
#[case::bid_strategy_enum("/bidStrategy", Some(json!("invalid")), "bidStrategy", "Please select a valid bid strategy")]
#[case::bid_strategy_missing("/bidStrategy", None, "bidStrategy", "Bid strategy is required")]
#[case::keywords_empty("/keywords", Some(json!("")), "keywords", "Keywords are required")]
#[case::keywords_missing("/keywords", None, "keywords", "\"keywords\" is required")]
#[case::groups_empty("/categoryGroups", Some(json!([])), "categoryGroups", "At least one category group is required")]
#[case::groups_missing("/categoryGroups", None, "categoryGroups", "Category groups are required")]
#[case::group_name_empty("/categoryGroups/0/name", Some(json!("")), "categoryGroups[0].name", "Category group name is required")]
#[case::group_name_missing("/categoryGroups/0/name", None, "categoryGroups[0].name", "\"categoryGroups[0].name\" is required")]
#[case::group_cpc_min("/categoryGroups/0/cpc", Some(json!(0)), "categoryGroups[0].cpc", "Max CPC must be at least $0.01")]
#[case::group_cpc_missing("/categoryGroups/0/cpc", None, "categoryGroups[0].cpc", "Max CPC is required")]
fn primary_field_violations(
    #[case] pointer: &str,
    #[case] value: Option<Value>,
    #[case] path: &str,
    #[case] message: &str,
) {
    let doc = edit(SourceId::Primary, pointer, value);
    assert_eq!(
        errors_for(SourceId::Primary, &doc),
        vec![(path.to_string(), message.to_string())]
    );
}

#[rstest]
#[case::url_invalid("/targetUrl", Some(json!("invalid-url")), "targetUrl", "Target URL must be a valid URL")]
#[case::url_empty("/targetUrl", Some(json!("")), "targetUrl", "Target URL is required")]
#[case::url_missing("/targetUrl", None, "targetUrl", "Target URL is required")]
#[case::bid_type("/bidAmount", Some(json!("abc")), "bidAmount", "Bid amount must be a number")]
#[case::bid_min("/bidAmount", Some(json!(0)), "bidAmount", "Bid amount must be at least $0.01")]
#[case::bid_missing("/bidAmount", None, "bidAmount", "Bid amount is required")]
#[case::countries_empty("/targeting/countries", Some(json!([])), "targeting.countries", "At least one country must be selected")]
#[case::countries_missing("/targeting/countries", None, "targeting.countries", "Countries are required")]
#[case::devices_empty("/targeting/devices", Some(json!([])), "targeting.devices", "At least one device must be selected")]
#[case::targeting_missing("/targeting", None, "targeting", "\"targeting\" is required")]
fn secondary_field_violations(
    #[case] pointer: &str,
    #[case] value: Option<Value>,
    #[case] path: &str,
    #[case] message: &str,
) {
    let doc = edit(SourceId::Secondary, pointer, value);
    assert_eq!(
        errors_for(SourceId::Secondary, &doc),
        vec![(path.to_string(), message.to_string())]
    );
}

#[test]
fn secondary_devices_are_optional() {
    let doc = edit(SourceId::Secondary, "/targeting/devices", None);
    assert_eq!(errors_for(SourceId::Secondary, &doc), vec![]);
}

#[rstest]
#[case::objective_enum("/projectObjective", Some(json!("invalid")), "projectObjective", "Please select a valid project objective")]
#[case::objective_missing("/projectObjective", None, "projectObjective", "Project objective is required")]
#[case::start_format("/startDate", Some(json!("not-a-date")), "startDate", "\"startDate\" must be in ISO 8601 date format")]
#[case::start_missing("/startDate", None, "startDate", "Start date is required")]
#[case::end_before_start("/endDate", Some(json!("2024-12-01")), "endDate", "End date must be after start date")]
#[case::budget_min("/budget/amount", Some(json!(5)), "budget.amount", "Budget amount must be at least $10")]
#[case::budget_type("/budget/amount", Some(json!("abc")), "budget.amount", "Budget amount must be a number")]
#[case::budget_kind("/budget/type", Some(json!("weekly")), "budget.type", "Please select a valid budget type")]
#[case::budget_missing("/budget", None, "budget", "\"budget\" is required")]
#[case::strategy_enum("/bidding/strategy", Some(json!("invalid")), "bidding.strategy", "Please select a valid bid strategy")]
#[case::manual_amount_missing("/bidding/amount", None, "bidding.amount", "Bid amount is required for manual bidding")]
#[case::manual_amount_min("/bidding/amount", Some(json!(0)), "bidding.amount", "Bid amount must be at least $0.01")]
#[case::bidding_missing("/bidding", None, "bidding", "\"bidding\" is required")]
fn tertiary_field_violations(
    #[case] pointer: &str,
    #[case] value: Option<Value>,
    #[case] path: &str,
    #[case] message: &str,
) {
    let doc = edit(SourceId::Tertiary, pointer, value);
    assert_eq!(
        errors_for(SourceId::Tertiary, &doc),
        vec![(path.to_string(), message.to_string())]
    );
}

#[rstest]
#[case::empty(json!(""))]
#[case::null(Value::Null)]
fn tertiary_end_date_may_be_blank(#[case] end: Value) {
    let doc = edit(SourceId::Tertiary, "/endDate", Some(end));
    assert_eq!(errors_for(SourceId::Tertiary, &doc), vec![]);
}

#[rstest]
#[case::missing(None)]
#[case::empty(Some(json!("")))]
#[case::null(Some(Value::Null))]
fn tertiary_auto_bidding_needs_no_amount(#[case] amount: Option<Value>) {
    let mut doc = edit(SourceId::Tertiary, "/bidding/strategy", Some(json!("auto")));
    match amount {
        Some(v) => doc["bidding"]["amount"] = v,
        None => {
            doc["bidding"].as_object_mut().unwrap().remove("amount");
        }
    }
    assert_eq!(errors_for(SourceId::Tertiary, &doc), vec![]);
}

#[test]
fn multiple_category_groups_are_validated_by_index() {
    let mut doc = valid_document(SourceId::Primary);
    doc["categoryGroups"] = json!([
        {"name": "First", "cpc": 0.5},
        {"name": "", "cpc": 0.5},
        {"name": "Third", "cpc": "cheap"}
    ]);
    assert_eq!(
        errors_for(SourceId::Primary, &doc),
        vec![
            ("categoryGroups[1].name".into(), "Category group name is required".into()),
            ("categoryGroups[2].cpc".into(), "Max CPC must be a number".into()),
        ]
    );
}
