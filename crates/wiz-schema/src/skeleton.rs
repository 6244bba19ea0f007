//! Blank documents for freshly opened forms.

use serde_json::{Map, Value};

use crate::rule::{RuleKind, Schema};

/// Build the blank document a form starts from.
///
/// Strings start as `""`, booleans as `false`, arrays as `[]`, objects
/// recursively; numbers, dates, conditional and unconstrained fields start
/// as `null`.
#[must_use]
pub fn initial_document(schema: &Schema) -> Value {
    match schema.kind() {
        RuleKind::String(_) => Value::String(String::new()),
        RuleKind::Boolean => Value::Bool(false),
        RuleKind::Array(_) => Value::Array(Vec::new()),
        RuleKind::Object(rule) => Value::Object(
            rule.fields
                .iter()
                .map(|(name, child)| (name.clone(), initial_document(child)))
                .collect::<Map<_, _>>(),
        ),
        RuleKind::Number(_) | RuleKind::Date(_) | RuleKind::Any | RuleKind::When(_) => Value::Null,
    }
}
