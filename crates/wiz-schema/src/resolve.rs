//! Path resolution against rule trees and documents.

use serde_json::Value;
use tracing::trace;
use wiz_core::{FieldPath, PathSegment};

use crate::rule::{RuleKind, Schema};

/// Find the sub-schema governing `path`.
///
/// Key segments descend into object fields, index segments into the array
/// element rule. A conditional node on the way is searched through its
/// `then` branch first, then its `otherwise` branch. The root path and paths
/// the schema does not declare resolve to `None`.
#[must_use]
pub fn extract<'a>(schema: &'a Schema, path: &FieldPath) -> Option<&'a Schema> {
    if path.is_root() {
        return None;
    }
    let found = descend(schema, path.segments());
    if found.is_none() {
        trace!(%path, "path not declared by schema");
    }
    found
}

/// Parse `path` and extract its sub-schema. Malformed paths resolve to
/// `None`.
#[must_use]
pub fn extract_str<'a>(schema: &'a Schema, path: &str) -> Option<&'a Schema> {
    FieldPath::parse(path)
        .ok()
        .and_then(|parsed| extract(schema, &parsed))
}

fn descend<'a>(schema: &'a Schema, segments: &[PathSegment]) -> Option<&'a Schema> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(schema);
    };
    match (&schema.kind, head) {
        (RuleKind::When(rule), _) => {
            descend(&rule.then, segments).or_else(|| descend(&rule.otherwise, segments))
        }
        (RuleKind::Object(rule), PathSegment::Key(name)) => {
            rule.field(name).and_then(|child| descend(child, rest))
        }
        (RuleKind::Array(rule), PathSegment::Index(_)) => descend(&rule.element, rest),
        _ => None,
    }
}

/// Look up the value at `path` inside `document`. The root path yields the
/// document itself.
#[must_use]
pub fn resolve_value<'a>(document: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(document, |current, segment| match segment {
            PathSegment::Key(key) => current.get(key.as_str()),
            PathSegment::Index(index) => current.get(*index),
        })
}
