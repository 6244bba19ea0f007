//! The validator engine.
//!
//! [`validate_document`] walks a document against a rule tree and collects
//! every violation; it never stops at the first one. [`validate_field`]
//! resolves the narrow sub-schema for one path and reports the first
//! violation of a single value.
//!
//! Bad input is data: type mismatches, missing fields and malformed values
//! all come back as [`ValidationError`]s. Nothing here returns `Err` or
//! panics on user input.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{trace, warn};
use wiz_core::FieldPath;

use crate::message::{MessageContext, ViolationKind, format_number};
use crate::report::FieldValidation;
use crate::resolve::{extract, resolve_value};
use crate::rule::{
    ArrayRule, DateRule, NumberRule, ObjectRule, Presence, RuleKind, Schema, StringRule,
    UnknownKeys,
};

/// Knobs that change how a document is judged without changing the schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Ignore undeclared object keys instead of reporting them.
    pub allow_unknown: bool,
}

/// One violation: where it happened, what failed, and the message to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    #[serde(serialize_with = "serialize_path")]
    pub path: FieldPath,
    pub kind: ViolationKind,
    pub message: String,
}

fn serialize_path<S: serde::Serializer>(path: &FieldPath, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(path)
}

/// Validate a whole document with default options.
#[must_use]
pub fn validate_document(schema: &Schema, document: &Value) -> Vec<ValidationError> {
    validate_document_with(schema, document, ValidationOptions::default())
}

/// Validate a whole document, collecting every violation in schema
/// declaration order (object fields as declared, array items by index).
#[must_use]
pub fn validate_document_with(
    schema: &Schema,
    document: &Value,
    options: ValidationOptions,
) -> Vec<ValidationError> {
    let mut walker = Walker::new(options);
    walker.walk(schema, Some(document), &FieldPath::root(), None);
    walker.errors
}

/// Validate one value found at `path` against `schema`.
///
/// `siblings` is the object that holds the value; conditional rules and
/// date references consult it. Without it, conditional rules take their
/// otherwise branch.
#[must_use]
pub fn validate_value(
    schema: &Schema,
    path: &FieldPath,
    value: Option<&Value>,
    siblings: Option<&Map<String, Value>>,
    options: ValidationOptions,
) -> Vec<ValidationError> {
    let mut walker = Walker::new(options);
    walker.walk(schema, value, path, siblings);
    walker.errors
}

/// Validate a single field of `schema` without any document context.
///
/// Paths the schema does not declare are treated as valid.
#[must_use]
pub fn validate_field(schema: &Schema, path: &str, value: Option<&Value>) -> FieldValidation {
    validate_field_in(schema, path, value, None, ValidationOptions::default())
}

/// Validate a single field, using `document` (when given) to find the
/// sibling fields that conditional rules and date references depend on.
#[must_use]
pub fn validate_field_in(
    schema: &Schema,
    path: &str,
    value: Option<&Value>,
    document: Option<&Value>,
    options: ValidationOptions,
) -> FieldValidation {
    let Ok(field_path) = FieldPath::parse(path) else {
        trace!(path, "unparseable field path treated as valid");
        return FieldValidation::valid();
    };
    let Some(field_schema) = extract(schema, &field_path) else {
        trace!(path, "no sub-schema for path; treated as valid");
        return FieldValidation::valid();
    };

    let siblings = document
        .zip(field_path.parent())
        .and_then(|(doc, parent)| resolve_value(doc, &parent))
        .and_then(Value::as_object);

    if siblings.is_none() && depends_on_siblings(field_schema) {
        warn!(
            path,
            "no sibling context for cross-field rule; conditional falls back to its otherwise branch"
        );
    }

    validate_value(field_schema, &field_path, value, siblings, options)
        .into_iter()
        .next()
        .map_or_else(FieldValidation::valid, |first| {
            FieldValidation::invalid(first.message)
        })
}

fn depends_on_siblings(schema: &Schema) -> bool {
    match &schema.kind {
        RuleKind::When(_) => true,
        RuleKind::Date(rule) => rule.min_ref.is_some(),
        _ => false,
    }
}

struct Walker {
    options: ValidationOptions,
    errors: Vec<ValidationError>,
}

impl Walker {
    const fn new(options: ValidationOptions) -> Self {
        Self {
            options,
            errors: Vec::new(),
        }
    }

    fn report(&mut self, schema: &Schema, path: &FieldPath, kind: ViolationKind, ctx: &MessageContext) {
        self.errors.push(ValidationError {
            path: path.clone(),
            kind,
            message: schema.messages.render(kind, ctx),
        });
    }

    fn walk(
        &mut self,
        schema: &Schema,
        value: Option<&Value>,
        path: &FieldPath,
        siblings: Option<&Map<String, Value>>,
    ) {
        if let RuleKind::When(rule) = &schema.kind {
            let discriminant = siblings.and_then(|map| map.get(&rule.discriminant));
            let branch = if rule.is.matches(discriminant) {
                &rule.then
            } else {
                &rule.otherwise
            };
            self.walk(branch, value, path, siblings);
            return;
        }

        let label = path.label();

        let Some(value) = value else {
            if schema.presence == Presence::Required {
                self.report(schema, path, ViolationKind::Required, &MessageContext::new(label));
            }
            return;
        };

        if schema.allow.contains(value) {
            return;
        }

        if let Some(valid) = &schema.valid {
            if !valid.contains(value) {
                let valids = valid.iter().map(display_value).collect::<Vec<_>>().join(", ");
                let ctx = MessageContext::new(label).with_valids(valids);
                self.report(schema, path, ViolationKind::AnyOnly, &ctx);
                return;
            }
        }

        let outcome = match &schema.kind {
            RuleKind::Any => Ok(()),
            RuleKind::Boolean => check_boolean(value, &label),
            RuleKind::String(rule) => check_string(rule, value, &label),
            RuleKind::Number(rule) => check_number(rule, value, &label),
            RuleKind::Date(rule) => check_date(rule, value, siblings, &label),
            RuleKind::Object(rule) => {
                self.walk_object(schema, rule, value, path);
                Ok(())
            }
            RuleKind::Array(rule) => {
                self.walk_array(schema, rule, value, path);
                Ok(())
            }
            RuleKind::When(_) => Ok(()),
        };

        if let Err((kind, ctx)) = outcome {
            self.report(schema, path, kind, &ctx);
        }
    }

    fn walk_object(&mut self, schema: &Schema, rule: &ObjectRule, value: &Value, path: &FieldPath) {
        let Some(map) = value.as_object() else {
            self.report(schema, path, ViolationKind::ObjectBase, &MessageContext::new(path.label()));
            return;
        };

        for (name, child) in &rule.fields {
            self.walk(child, map.get(name), &path.child_key(name), Some(map));
        }

        if rule.unknown == UnknownKeys::Ignore || self.options.allow_unknown {
            return;
        }
        let mut unknown: Vec<&String> = map
            .keys()
            .filter(|key| rule.field(key).is_none())
            .collect();
        unknown.sort();
        for key in unknown {
            let child_path = path.child_key(key);
            let ctx = MessageContext::new(child_path.label());
            self.report(schema, &child_path, ViolationKind::ObjectUnknown, &ctx);
        }
    }

    fn walk_array(&mut self, schema: &Schema, rule: &ArrayRule, value: &Value, path: &FieldPath) {
        let Some(items) = value.as_array() else {
            self.report(schema, path, ViolationKind::ArrayBase, &MessageContext::new(path.label()));
            return;
        };

        let label = path.label();
        if let Some(min) = rule.min_items.filter(|min| items.len() < *min) {
            let ctx = MessageContext::new(label).with_limit(min.to_string());
            self.report(schema, path, ViolationKind::ArrayMin, &ctx);
        } else if let Some(max) = rule.max_items.filter(|max| items.len() > *max) {
            let ctx = MessageContext::new(label).with_limit(max.to_string());
            self.report(schema, path, ViolationKind::ArrayMax, &ctx);
        }

        for (index, item) in items.iter().enumerate() {
            self.walk(&rule.element, Some(item), &path.child_index(index), None);
        }
    }
}

type Violation = (ViolationKind, MessageContext);

fn check_boolean(value: &Value, label: &str) -> Result<(), Violation> {
    match value {
        Value::Bool(_) => Ok(()),
        Value::String(s) if s == "true" || s == "false" => Ok(()),
        _ => Err((ViolationKind::BooleanBase, MessageContext::new(label))),
    }
}

fn check_string(rule: &StringRule, value: &Value, label: &str) -> Result<(), Violation> {
    let Value::String(s) = value else {
        return Err((ViolationKind::StringBase, MessageContext::new(label)));
    };
    if s.is_empty() {
        return Err((ViolationKind::StringEmpty, MessageContext::new(label)));
    }

    let length = s.chars().count();
    if let Some(min) = rule.min_len.filter(|min| length < *min) {
        return Err((
            ViolationKind::StringMin,
            MessageContext::new(label).with_limit(min.to_string()),
        ));
    }
    if let Some(max) = rule.max_len.filter(|max| length > *max) {
        return Err((
            ViolationKind::StringMax,
            MessageContext::new(label).with_limit(max.to_string()),
        ));
    }
    if rule.uri && !is_uri(s) {
        return Err((ViolationKind::StringUri, MessageContext::new(label)));
    }
    if let Some(regex) = rule.pattern.as_ref().filter(|regex| !regex.is_match(s)) {
        return Err((
            ViolationKind::StringPattern,
            MessageContext::new(label)
                .with_value(s.clone())
                .with_regex(regex.as_str()),
        ));
    }
    Ok(())
}

fn is_uri(s: &str) -> bool {
    url::Url::parse(s).is_ok_and(|url| !url.scheme().is_empty())
}

/// Numbers accept JSON numbers and numeric strings (form inputs).
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn check_number(rule: &NumberRule, value: &Value, label: &str) -> Result<(), Violation> {
    let Some(n) = coerce_number(value) else {
        return Err((ViolationKind::NumberBase, MessageContext::new(label)));
    };
    if rule.integer && n.fract() != 0.0 {
        return Err((ViolationKind::NumberInteger, MessageContext::new(label)));
    }
    if let Some(min) = rule.min.filter(|min| n < *min) {
        return Err((
            ViolationKind::NumberMin,
            MessageContext::new(label).with_limit(format_number(min)),
        ));
    }
    if let Some(max) = rule.max.filter(|max| n > *max) {
        return Err((
            ViolationKind::NumberMax,
            MessageContext::new(label).with_limit(format_number(max)),
        ));
    }
    Ok(())
}

/// Parse the ISO 8601 forms the form layer produces: a calendar date, a
/// local date-time, or an RFC 3339 timestamp. Numbers are epoch millis.
pub(crate) fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_iso(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(local) = NaiveDateTime::parse_from_str(s, format) {
            return Some(local.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn check_date(
    rule: &DateRule,
    value: &Value,
    siblings: Option<&Map<String, Value>>,
    label: &str,
) -> Result<(), Violation> {
    let Some(when) = parse_date(value) else {
        let kind = if rule.iso && value.is_string() {
            ViolationKind::DateFormat
        } else {
            ViolationKind::DateBase
        };
        return Err((kind, MessageContext::new(label)));
    };

    let reference = rule
        .min_ref
        .as_ref()
        .and_then(|name| siblings.and_then(|map| map.get(name)));
    if let Some(raw) = reference {
        if let Some(floor) = parse_date(raw).filter(|floor| when < *floor) {
            let limit = raw
                .as_str()
                .map_or_else(|| floor.to_rfc3339(), str::to_string);
            return Err((ViolationKind::DateMin, MessageContext::new(label).with_limit(limit)));
        }
    }
    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
