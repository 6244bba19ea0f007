//! Field paths.
//!
//! A path is an ordered list of segments (object keys and array indices)
//! identifying a value inside a document. Paths are rendered to the flat
//! strings the form layer keys its error displays by:
//!
//! ```text
//! bracket: categoryGroups[0].name   (canonical)
//! dotted:  categoryGroups.0.name
//! ```
//!
//! Parsing accepts both forms, plus chained indices (`matrix[0][1]`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Key used for errors that do not belong to a specific field.
pub const GENERAL_ERROR_KEY: &str = "general";

/// Label used in default messages when a value has no path.
const ROOT_LABEL: &str = "value";

/// One step into a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// How array indices are joined when a path is rendered to a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStyle {
    /// `groups[0].name`
    #[default]
    Bracket,
    /// `groups.0.name`
    Dotted,
}

impl PathStyle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bracket => "bracket",
            Self::Dotted => "dotted",
        }
    }
}

impl fmt::Display for PathStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bracket" => Ok(Self::Bracket),
            "dotted" => Ok(Self::Dotted),
            other => Err(CoreError::InvalidPath {
                path: other.to_string(),
                reason: "path style must be 'bracket' or 'dotted'".into(),
            }),
        }
    }
}

/// An ordered list of path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty (document root) path.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    #[must_use]
    pub const fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Parse `a.b[0].c`, `a.b.0.c` or `a.b[0][1]`.
    ///
    /// A purely numeric dot segment is an index. The empty string parses to
    /// the root path.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPath` for empty segments (`a..b`),
    /// unbalanced brackets, or non-numeric bracket contents.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        if input.is_empty() {
            return Ok(Self::root());
        }

        let invalid = |reason: &str| CoreError::InvalidPath {
            path: input.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        for part in input.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(open) => part.split_at(open),
                None => (part, ""),
            };

            if name.is_empty() && rest.is_empty() {
                return Err(invalid("empty segment"));
            }
            if name.contains(']') {
                return Err(invalid("unbalanced ']'"));
            }
            if !name.is_empty() {
                segments.push(parse_dot_segment(name));
            }

            while !rest.is_empty() {
                let Some(body) = rest.strip_prefix('[') else {
                    return Err(invalid("unexpected characters after ']'"));
                };
                let Some(close) = body.find(']') else {
                    return Err(invalid("unbalanced '['"));
                };
                let index = body[..close]
                    .parse::<usize>()
                    .map_err(|_| invalid("bracket index must be a non-negative integer"))?;
                segments.push(PathSegment::Index(index));
                rest = &body[close + 1..];
            }
        }

        Ok(Self { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The path without its last segment, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, head) = self.segments.split_last()?;
        Some(Self {
            segments: head.to_vec(),
        })
    }

    #[must_use]
    pub fn child_key(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Key(key.to_string()));
        next
    }

    #[must_use]
    pub fn child_index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Index(index));
        next
    }

    /// Render the path in the given style. The root renders as `""`.
    #[must_use]
    pub fn render(&self, style: PathStyle) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(index) => match style {
                    PathStyle::Bracket if !out.is_empty() => {
                        out.push('[');
                        out.push_str(&index.to_string());
                        out.push(']');
                    }
                    _ => {
                        if !out.is_empty() {
                            out.push('.');
                        }
                        out.push_str(&index.to_string());
                    }
                },
            }
        }
        out
    }

    /// The key this path occupies in a flattened error map; root-level
    /// errors share [`GENERAL_ERROR_KEY`].
    #[must_use]
    pub fn error_key(&self, style: PathStyle) -> String {
        if self.is_root() {
            GENERAL_ERROR_KEY.to_string()
        } else {
            self.render(style)
        }
    }

    /// Label substituted into default messages (`"targeting.countries" is required`).
    #[must_use]
    pub fn label(&self) -> String {
        if self.is_root() {
            ROOT_LABEL.to_string()
        } else {
            self.render(PathStyle::Bracket)
        }
    }
}

fn parse_dot_segment(name: &str) -> PathSegment {
    if name.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(index) = name.parse::<usize>() {
            return PathSegment::Index(index);
        }
    }
    PathSegment::Key(name.to_string())
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(PathStyle::Bracket))
    }
}

impl FromStr for FieldPath {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromIterator<PathSegment> for FieldPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
