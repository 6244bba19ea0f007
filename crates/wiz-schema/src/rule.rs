//! The rule tree.
//!
//! A [`Schema`] is an immutable description of the valid shape of a
//! document or field. It is built once through the chainable methods below
//! (see [`crate::builder`] for the entry points), checked with
//! [`Schema::check`], and then shared freely: validation only reads it.

use regex::Regex;
use serde_json::Value;

use crate::error::SchemaError;
use crate::message::{MessageTable, ViolationKind};

/// Whether a value must be present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Presence {
    #[default]
    Optional,
    Required,
}

/// What an object does with keys it does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKeys {
    #[default]
    Reject,
    Ignore,
}

#[derive(Debug, Clone, Default)]
pub struct StringRule {
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub uri: bool,
    pub pattern: Option<Regex>,
}

#[derive(Debug, Clone, Default)]
pub struct NumberRule {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub integer: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DateRule {
    pub iso: bool,
    /// Sibling field this date must not precede.
    pub min_ref: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectRule {
    /// Children in declaration order.
    pub fields: Vec<(String, Schema)>,
    pub unknown: UnknownKeys,
}

impl ObjectRule {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Schema> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, schema)| schema)
    }
}

#[derive(Debug, Clone)]
pub struct ArrayRule {
    pub element: Box<Schema>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

/// How a conditional rule tests its discriminant.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equals(Value),
    OneOf(Vec<Value>),
    /// The discriminant is present and not `null`.
    Present,
}

impl Predicate {
    #[must_use]
    pub fn matches(&self, discriminant: Option<&Value>) -> bool {
        match (self, discriminant) {
            (_, None) => false,
            (Self::Equals(expected), Some(actual)) => expected == actual,
            (Self::OneOf(options), Some(actual)) => options.contains(actual),
            (Self::Present, Some(actual)) => !actual.is_null(),
        }
    }
}

/// A rule chosen by the value of a sibling field.
#[derive(Debug, Clone)]
pub struct WhenRule {
    pub discriminant: String,
    pub is: Predicate,
    pub then: Box<Schema>,
    pub otherwise: Box<Schema>,
}

#[derive(Debug, Clone)]
pub enum RuleKind {
    Any,
    String(StringRule),
    Number(NumberRule),
    Date(DateRule),
    Boolean,
    Object(ObjectRule),
    Array(ArrayRule),
    When(WhenRule),
}

impl RuleKind {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Date(_) => "date",
            Self::Boolean => "boolean",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::When(_) => "alternatives",
        }
    }
}

/// An immutable, composable rule tree node.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) kind: RuleKind,
    pub(crate) presence: Presence,
    pub(crate) allow: Vec<Value>,
    pub(crate) valid: Option<Vec<Value>>,
    pub(crate) messages: MessageTable,
    /// Builder misuse recorded for [`Schema::check`] to report.
    pub(crate) defects: Vec<String>,
}

impl Schema {
    pub(crate) fn of(kind: RuleKind) -> Self {
        Self {
            kind,
            presence: Presence::Optional,
            allow: Vec::new(),
            valid: None,
            messages: MessageTable::default(),
            defects: Vec::new(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &RuleKind {
        &self.kind
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    #[must_use]
    pub const fn presence(&self) -> Presence {
        self.presence
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    #[must_use]
    pub fn allowed(&self) -> &[Value] {
        &self.allow
    }

    #[must_use]
    pub fn valid_values(&self) -> Option<&[Value]> {
        self.valid.as_deref()
    }

    #[must_use]
    pub const fn messages(&self) -> &MessageTable {
        &self.messages
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectRule> {
        match &self.kind {
            RuleKind::Object(rule) => Some(rule),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Presence and value sets
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn required(mut self) -> Self {
        self.presence = Presence::Required;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    /// Accept these exact values without further checks (e.g. `null`, `""`).
    #[must_use]
    pub fn allow<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allow.extend(values.into_iter().map(Into::into));
        self
    }

    /// Restrict the value to this set (enum membership).
    #[must_use]
    pub fn valid<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.valid
            .get_or_insert_with(Vec::new)
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Override the message for one violation kind.
    #[must_use]
    pub fn message(mut self, kind: ViolationKind, template: impl Into<String>) -> Self {
        self.messages.insert(kind, template);
        self
    }

    /// Override several messages at once.
    #[must_use]
    pub fn with_messages<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (ViolationKind, S)>,
        S: Into<String>,
    {
        for (kind, template) in overrides {
            self.messages.insert(kind, template);
        }
        self
    }

    // -----------------------------------------------------------------------
    // Kind-specific constraints
    // -----------------------------------------------------------------------

    fn misuse(mut self, method: &str) -> Self {
        let defect = format!(
            "`{method}` does not apply to {} rules",
            self.kind.type_name()
        );
        self.defects.push(defect);
        self
    }

    #[must_use]
    pub fn min_len(mut self, n: usize) -> Self {
        match &mut self.kind {
            RuleKind::String(rule) => rule.min_len = Some(n),
            _ => return self.misuse("min_len"),
        }
        self
    }

    #[must_use]
    pub fn max_len(mut self, n: usize) -> Self {
        match &mut self.kind {
            RuleKind::String(rule) => rule.max_len = Some(n),
            _ => return self.misuse("max_len"),
        }
        self
    }

    #[must_use]
    pub fn uri(mut self) -> Self {
        match &mut self.kind {
            RuleKind::String(rule) => rule.uri = true,
            _ => return self.misuse("uri"),
        }
        self
    }

    /// Require the string to match `pattern`. An invalid regex is a
    /// construction defect reported by [`Schema::check`].
    #[must_use]
    pub fn pattern(mut self, pattern: &str) -> Self {
        let compiled = Regex::new(pattern);
        match (&mut self.kind, compiled) {
            (RuleKind::String(rule), Ok(regex)) => rule.pattern = Some(regex),
            (RuleKind::String(_), Err(e)) => {
                self.defects.push(format!("invalid pattern `{pattern}`: {e}"));
            }
            _ => return self.misuse("pattern"),
        }
        self
    }

    #[must_use]
    pub fn min(mut self, n: f64) -> Self {
        match &mut self.kind {
            RuleKind::Number(rule) => rule.min = Some(n),
            _ => return self.misuse("min"),
        }
        self
    }

    #[must_use]
    pub fn max(mut self, n: f64) -> Self {
        match &mut self.kind {
            RuleKind::Number(rule) => rule.max = Some(n),
            _ => return self.misuse("max"),
        }
        self
    }

    #[must_use]
    pub fn integer(mut self) -> Self {
        match &mut self.kind {
            RuleKind::Number(rule) => rule.integer = true,
            _ => return self.misuse("integer"),
        }
        self
    }

    /// Require ISO 8601 strings (`2025-01-01`, `2025-01-01T10:00:00Z`).
    #[must_use]
    pub fn iso(mut self) -> Self {
        match &mut self.kind {
            RuleKind::Date(rule) => rule.iso = true,
            _ => return self.misuse("iso"),
        }
        self
    }

    /// The date must not precede the sibling date `field`.
    #[must_use]
    pub fn min_ref(mut self, field: &str) -> Self {
        match &mut self.kind {
            RuleKind::Date(rule) => rule.min_ref = Some(field.to_string()),
            _ => return self.misuse("min_ref"),
        }
        self
    }

    #[must_use]
    pub fn min_items(mut self, n: usize) -> Self {
        match &mut self.kind {
            RuleKind::Array(rule) => rule.min_items = Some(n),
            _ => return self.misuse("min_items"),
        }
        self
    }

    #[must_use]
    pub fn max_items(mut self, n: usize) -> Self {
        match &mut self.kind {
            RuleKind::Array(rule) => rule.max_items = Some(n),
            _ => return self.misuse("max_items"),
        }
        self
    }

    /// Declare an object child. Declaration order is validation order.
    #[must_use]
    pub fn field(mut self, name: &str, schema: Self) -> Self {
        match &mut self.kind {
            RuleKind::Object(rule) => rule.fields.push((name.to_string(), schema)),
            _ => return self.misuse("field"),
        }
        self
    }

    #[must_use]
    pub fn unknown(mut self, policy: UnknownKeys) -> Self {
        match &mut self.kind {
            RuleKind::Object(rule) => rule.unknown = policy,
            _ => return self.misuse("unknown"),
        }
        self
    }

    // -----------------------------------------------------------------------
    // Construction checks
    // -----------------------------------------------------------------------

    /// Verify the rule tree is well formed.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Construction` naming the first malformed node:
    /// builder misuse, inverted ranges, invalid patterns, duplicate object
    /// fields, or cross-field rules naming an undeclared sibling.
    pub fn check(&self) -> Result<(), SchemaError> {
        self.check_at("", None)
    }

    fn check_at(&self, path: &str, siblings: Option<&[(String, Self)]>) -> Result<(), SchemaError> {
        let here = if path.is_empty() { "(root)" } else { path };

        if let Some(defect) = self.defects.first() {
            return Err(SchemaError::construction(here, defect.clone()));
        }

        match &self.kind {
            RuleKind::Any | RuleKind::Boolean => Ok(()),
            RuleKind::String(rule) => match (rule.min_len, rule.max_len) {
                (Some(min), Some(max)) if min > max => Err(SchemaError::construction(
                    here,
                    format!("min length {min} exceeds max length {max}"),
                )),
                _ => Ok(()),
            },
            RuleKind::Number(rule) => {
                if rule.min.is_some_and(f64::is_nan) || rule.max.is_some_and(f64::is_nan) {
                    return Err(SchemaError::construction(here, "numeric bound is NaN"));
                }
                match (rule.min, rule.max) {
                    (Some(min), Some(max)) if min > max => Err(SchemaError::construction(
                        here,
                        format!("min {min} exceeds max {max}"),
                    )),
                    _ => Ok(()),
                }
            }
            RuleKind::Date(rule) => match &rule.min_ref {
                Some(reference) => require_sibling(here, siblings, reference, "date reference"),
                None => Ok(()),
            },
            RuleKind::Array(rule) => {
                if let (Some(min), Some(max)) = (rule.min_items, rule.max_items) {
                    if min > max {
                        return Err(SchemaError::construction(
                            here,
                            format!("min items {min} exceeds max items {max}"),
                        ));
                    }
                }
                rule.element.check_at(&format!("{path}[]"), None)
            }
            RuleKind::Object(rule) => {
                for (i, (name, child)) in rule.fields.iter().enumerate() {
                    if rule.fields[..i].iter().any(|(earlier, _)| earlier == name) {
                        return Err(SchemaError::construction(
                            here,
                            format!("field `{name}` is declared twice"),
                        ));
                    }
                    let child_path = if path.is_empty() {
                        name.clone()
                    } else {
                        format!("{path}.{name}")
                    };
                    child.check_at(&child_path, Some(&rule.fields))?;
                    if let RuleKind::When(when) = &child.kind {
                        if when.discriminant == *name {
                            return Err(SchemaError::construction(
                                child_path,
                                "conditional rule cannot discriminate on itself",
                            ));
                        }
                    }
                }
                Ok(())
            }
            RuleKind::When(rule) => {
                require_sibling(here, siblings, &rule.discriminant, "conditional discriminant")?;
                rule.then.check_at(path, siblings)?;
                rule.otherwise.check_at(path, siblings)
            }
        }
    }
}

fn require_sibling(
    here: &str,
    siblings: Option<&[(String, Schema)]>,
    name: &str,
    what: &str,
) -> Result<(), SchemaError> {
    let Some(siblings) = siblings else {
        return Err(SchemaError::construction(
            here,
            format!("{what} `{name}` used outside an object"),
        ));
    };
    if siblings.iter().any(|(field, _)| field == name) {
        Ok(())
    } else {
        Err(SchemaError::construction(
            here,
            format!("{what} `{name}` is not a sibling field"),
        ))
    }
}
