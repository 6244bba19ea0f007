//! JSON Schema (Draft 2020-12) rendering of rule trees, for editors and
//! other external tooling.
//!
//! The rendering is as strict as JSON Schema allows. Two behaviors have no
//! JSON Schema counterpart and are left out: numeric-string coercion (the
//! export accepts JSON numbers only) and sibling date floors (`min_ref`).

use serde_json::{Map, Value, json};

use crate::rule::{ObjectRule, Predicate, RuleKind, Schema, UnknownKeys, WhenRule};

pub const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// Render `schema` as a standalone JSON Schema document.
#[must_use]
pub fn to_json_schema(schema: &Schema) -> Value {
    let mut root = node(schema);
    if let Value::Object(map) = &mut root {
        map.insert("$schema".into(), Value::from(DRAFT_2020_12));
    }
    root
}

/// Render `schema` with a title, as `wiz schema SOURCE` prints it.
#[must_use]
pub fn to_titled_json_schema(schema: &Schema, title: &str) -> Value {
    let mut root = to_json_schema(schema);
    if let Value::Object(map) = &mut root {
        map.insert("title".into(), Value::from(title));
    }
    root
}

fn node(schema: &Schema) -> Value {
    let mut out = kind_node(schema.kind());

    if let (Some(valid), Value::Object(map)) = (schema.valid_values(), &mut out) {
        map.insert("enum".into(), Value::Array(valid.to_vec()));
    }

    if schema.allowed().is_empty() {
        out
    } else {
        json!({ "anyOf": [{ "enum": schema.allowed() }, out] })
    }
}

fn kind_node(kind: &RuleKind) -> Value {
    match kind {
        RuleKind::Any => json!({}),
        RuleKind::Boolean => json!({ "type": "boolean" }),
        RuleKind::String(rule) => {
            let mut map = Map::new();
            map.insert("type".into(), Value::from("string"));
            map.insert("minLength".into(), Value::from(rule.min_len.unwrap_or(1).max(1)));
            if let Some(max) = rule.max_len {
                map.insert("maxLength".into(), Value::from(max));
            }
            if rule.uri {
                map.insert("format".into(), Value::from("uri"));
            }
            if let Some(regex) = &rule.pattern {
                map.insert("pattern".into(), Value::from(regex.as_str()));
            }
            Value::Object(map)
        }
        RuleKind::Number(rule) => {
            let mut map = Map::new();
            let ty = if rule.integer { "integer" } else { "number" };
            map.insert("type".into(), Value::from(ty));
            if let Some(min) = rule.min {
                map.insert("minimum".into(), number_value(min));
            }
            if let Some(max) = rule.max {
                map.insert("maximum".into(), number_value(max));
            }
            Value::Object(map)
        }
        RuleKind::Date(rule) => {
            if rule.iso {
                json!({ "type": "string", "pattern": r"^\d{4}-\d{2}-\d{2}" })
            } else {
                json!({ "type": ["string", "integer"] })
            }
        }
        RuleKind::Array(rule) => {
            let mut map = Map::new();
            map.insert("type".into(), Value::from("array"));
            map.insert("items".into(), node(&rule.element));
            if let Some(min) = rule.min_items {
                map.insert("minItems".into(), Value::from(min));
            }
            if let Some(max) = rule.max_items {
                map.insert("maxItems".into(), Value::from(max));
            }
            Value::Object(map)
        }
        RuleKind::Object(rule) => object_node(rule),
        // Outside an object there is no sibling to discriminate on.
        RuleKind::When(rule) => node(&rule.otherwise),
    }
}

fn object_node(rule: &ObjectRule) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    let mut conditionals = Vec::new();

    for (name, child) in &rule.fields {
        if let RuleKind::When(when) = child.kind() {
            properties.insert(name.clone(), json!({}));
            conditionals.push(conditional_node(name, when));
            continue;
        }
        properties.insert(name.clone(), node(child));
        if child.is_required() {
            required.push(Value::from(name.as_str()));
        }
    }

    let mut map = Map::new();
    map.insert("type".into(), Value::from("object"));
    map.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        map.insert("required".into(), Value::Array(required));
    }
    if rule.unknown == UnknownKeys::Reject {
        map.insert("additionalProperties".into(), Value::Bool(false));
    }
    if !conditionals.is_empty() {
        map.insert("allOf".into(), Value::Array(conditionals));
    }
    Value::Object(map)
}

/// Whole bounds render as integers so `min(5.0)` exports as `5`.
#[allow(clippy::cast_possible_truncation)]
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

fn conditional_node(field: &str, rule: &WhenRule) -> Value {
    let test = match &rule.is {
        Predicate::Equals(value) => json!({ "const": value }),
        Predicate::OneOf(values) => json!({ "enum": values }),
        Predicate::Present => json!({ "not": { "type": "null" } }),
    };
    json!({
        "if": {
            "properties": { (rule.discriminant.as_str()): test },
            "required": [rule.discriminant],
        },
        "then": branch_node(field, &rule.then),
        "else": branch_node(field, &rule.otherwise),
    })
}

fn branch_node(field: &str, branch: &Schema) -> Value {
    let mut map = Map::new();
    map.insert("properties".into(), json!({ (field): node(branch) }));
    if branch.is_required() {
        map.insert("required".into(), json!([field]));
    }
    Value::Object(map)
}
