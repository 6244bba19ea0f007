//! Flattening violations into the `{ "path": "message" }` map the form
//! layer renders next to each input.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wiz_core::{FieldPath, PathSegment, PathStyle};

use crate::report::FieldValidation;
use crate::validate::ValidationError;

/// Flat map of field path to a single error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FlattenedErrors(BTreeMap<String, String>);

impl FlattenedErrors {
    /// Set the message for `path`, replacing any earlier one.
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.insert(path.into(), message.into());
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.0.remove(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fold a single-field result into the map: an invalid result sets the
    /// field's message, a valid one clears it.
    ///
    /// `path` is normalized to `style`, so `groups.0.name` and
    /// `groups[0].name` land on the same key.
    pub fn apply_field_result(&mut self, path: &str, style: PathStyle, result: &FieldValidation) {
        let key = FieldPath::parse(path).map_or_else(|_| path.to_string(), |p| p.error_key(style));
        match &result.error {
            Some(message) if !result.is_valid => self.insert(key, message.clone()),
            _ => {
                self.remove(&key);
            }
        }
    }
}

impl IntoIterator for FlattenedErrors {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, String)> for FlattenedErrors {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Key each violation by its rendered path. When two violations share a
/// path, the later one wins.
#[must_use]
pub fn format_validation_errors(errors: &[ValidationError], style: PathStyle) -> FlattenedErrors {
    errors
        .iter()
        .map(|error| (error.path.error_key(style), error.message.clone()))
        .collect()
}

/// Flatten an arbitrarily nested error tree (objects and arrays whose leaves
/// are message strings) into path keys under `prefix`.
///
/// Leaves that are not strings are skipped. A string at the top with an
/// empty prefix is keyed `general`. A prefix that is not a valid field path
/// is kept verbatim and the nested keys are appended to it.
#[must_use]
pub fn flatten_error_tree(tree: &Value, prefix: &str, style: PathStyle) -> FlattenedErrors {
    let mut leaves = Vec::new();
    match FieldPath::parse(prefix) {
        Ok(start) => {
            collect(tree, &start, &mut leaves);
            leaves
                .into_iter()
                .map(|(path, message)| (path.error_key(style), message))
                .collect()
        }
        Err(_) => {
            collect(tree, &FieldPath::root(), &mut leaves);
            leaves
                .into_iter()
                .map(|(path, message)| (literal_key(prefix, &path, style), message))
                .collect()
        }
    }
}

/// Append `relative` to a prefix that is not itself a parseable path.
fn literal_key(prefix: &str, relative: &FieldPath, style: PathStyle) -> String {
    let mut key = prefix.to_string();
    for segment in relative.segments() {
        match (segment, style) {
            (PathSegment::Key(name), _) => {
                key.push('.');
                key.push_str(name);
            }
            (PathSegment::Index(index), PathStyle::Bracket) => {
                key.push_str(&format!("[{index}]"));
            }
            (PathSegment::Index(index), PathStyle::Dotted) => {
                key.push_str(&format!(".{index}"));
            }
        }
    }
    key
}

fn collect(node: &Value, path: &FieldPath, out: &mut Vec<(FieldPath, String)>) {
    match node {
        Value::String(message) => out.push((path.clone(), message.clone())),
        Value::Object(map) => {
            for (key, child) in map {
                collect(child, &path.child_key(key), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                collect(child, &path.child_index(index), out);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
