//! Entry points for building rule trees.
//!
//! ```
//! use wiz_schema::builder::{array, number, object, string};
//!
//! let groups = array(
//!     object()
//!         .field("name", string().required())
//!         .field("cpc", number().min(0.01).required()),
//! )
//! .min_items(1)
//! .required();
//! assert_eq!(groups.type_name(), "array");
//! ```

use crate::error::SchemaError;
use crate::rule::{
    ArrayRule, DateRule, NumberRule, ObjectRule, Predicate, RuleKind, Schema, StringRule, WhenRule,
};

#[must_use]
pub fn any() -> Schema {
    Schema::of(RuleKind::Any)
}

#[must_use]
pub fn string() -> Schema {
    Schema::of(RuleKind::String(StringRule::default()))
}

#[must_use]
pub fn number() -> Schema {
    Schema::of(RuleKind::Number(NumberRule::default()))
}

#[must_use]
pub fn date() -> Schema {
    Schema::of(RuleKind::Date(DateRule::default()))
}

#[must_use]
pub fn boolean() -> Schema {
    Schema::of(RuleKind::Boolean)
}

#[must_use]
pub fn object() -> Schema {
    Schema::of(RuleKind::Object(ObjectRule::default()))
}

#[must_use]
pub fn array(element: Schema) -> Schema {
    Schema::of(RuleKind::Array(ArrayRule {
        element: Box::new(element),
        min_items: None,
        max_items: None,
    }))
}

/// A rule selected by the sibling field `discriminant`: `then` applies when
/// `is` matches its current value, `otherwise` applies in every other case.
#[must_use]
pub fn when(discriminant: &str, is: Predicate, then: Schema, otherwise: Schema) -> Schema {
    Schema::of(RuleKind::When(WhenRule {
        discriminant: discriminant.to_string(),
        is,
        then: Box::new(then),
        otherwise: Box::new(otherwise),
    }))
}

/// Compose a new object rule from `base` plus additional fields.
///
/// Base fields keep their position; an additional field with the same name
/// as a base field replaces it in place. The base is not modified.
///
/// # Errors
///
/// Returns `SchemaError::Construction` if `base` is not an object rule.
pub fn compose<I>(base: &Schema, fields: I) -> Result<Schema, SchemaError>
where
    I: IntoIterator<Item = (&'static str, Schema)>,
{
    let Some(base_rule) = base.as_object() else {
        return Err(SchemaError::construction(
            "(root)",
            format!("cannot compose onto a {} rule", base.type_name()),
        ));
    };

    let mut composed = base.clone();
    let mut rule = base_rule.clone();
    for (name, schema) in fields {
        match rule.fields.iter_mut().find(|(existing, _)| existing == name) {
            Some(slot) => slot.1 = schema,
            None => rule.fields.push((name.to_string(), schema)),
        }
    }
    composed.kind = RuleKind::Object(rule);
    Ok(composed)
}

/// Check a freshly built schema and hand it back.
///
/// # Errors
///
/// Propagates the first construction defect found by [`Schema::check`].
pub fn finish(schema: Schema) -> Result<Schema, SchemaError> {
    schema.check()?;
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_names(schema: &Schema) -> Vec<&str> {
        schema
            .as_object()
            .unwrap()
            .fields
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    #[test]
    fn compose_appends_after_base_fields() {
        let base = object().field("projectName", string().required());
        let composed = compose(&base, [("dailyBudget", number().min(5.0))]).unwrap();
        assert_eq!(field_names(&composed), ["projectName", "dailyBudget"]);
    }

    #[test]
    fn compose_leaves_base_untouched() {
        let base = object().field("projectName", string().required());
        let _ = compose(&base, [("keywords", string())]).unwrap();
        assert_eq!(field_names(&base), ["projectName"]);
    }

    #[test]
    fn compose_overrides_in_place() {
        let base = object()
            .field("projectName", string())
            .field("notes", string());
        let composed = compose(&base, [("projectName", string().required())]).unwrap();
        assert_eq!(field_names(&composed), ["projectName", "notes"]);
        assert!(composed.as_object().unwrap().field("projectName").unwrap().is_required());
    }

    #[test]
    fn compose_rejects_non_object_base() {
        assert!(compose(&string(), [("x", string())]).is_err());
    }

    #[test]
    fn finish_reports_defects() {
        assert!(finish(object().field("n", string().min(1.0))).is_err());
        assert!(finish(object().field("n", string().min_len(1))).is_ok());
    }
}
