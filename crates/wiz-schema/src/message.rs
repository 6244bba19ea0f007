//! Violation kinds and message tables.
//!
//! Every rule may override the default message for any violation kind.
//! Templates (default or custom) may reference `{#label}`, `{#limit}`,
//! `{#value}`, `{#valids}` and `{#regex}`.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The constraint a value failed. Codes match the `type.rule` keys form
/// authors use in message tables.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum ViolationKind {
    #[serde(rename = "any.required")]
    Required,
    #[serde(rename = "any.only")]
    AnyOnly,
    #[serde(rename = "string.base")]
    StringBase,
    #[serde(rename = "string.empty")]
    StringEmpty,
    #[serde(rename = "string.min")]
    StringMin,
    #[serde(rename = "string.max")]
    StringMax,
    #[serde(rename = "string.uri")]
    StringUri,
    #[serde(rename = "string.pattern.base")]
    StringPattern,
    #[serde(rename = "number.base")]
    NumberBase,
    #[serde(rename = "number.min")]
    NumberMin,
    #[serde(rename = "number.max")]
    NumberMax,
    #[serde(rename = "number.integer")]
    NumberInteger,
    #[serde(rename = "date.base")]
    DateBase,
    #[serde(rename = "date.format")]
    DateFormat,
    #[serde(rename = "date.min")]
    DateMin,
    #[serde(rename = "boolean.base")]
    BooleanBase,
    #[serde(rename = "object.base")]
    ObjectBase,
    #[serde(rename = "object.unknown")]
    ObjectUnknown,
    #[serde(rename = "array.base")]
    ArrayBase,
    #[serde(rename = "array.min")]
    ArrayMin,
    #[serde(rename = "array.max")]
    ArrayMax,
}

impl ViolationKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Required => "any.required",
            Self::AnyOnly => "any.only",
            Self::StringBase => "string.base",
            Self::StringEmpty => "string.empty",
            Self::StringMin => "string.min",
            Self::StringMax => "string.max",
            Self::StringUri => "string.uri",
            Self::StringPattern => "string.pattern.base",
            Self::NumberBase => "number.base",
            Self::NumberMin => "number.min",
            Self::NumberMax => "number.max",
            Self::NumberInteger => "number.integer",
            Self::DateBase => "date.base",
            Self::DateFormat => "date.format",
            Self::DateMin => "date.min",
            Self::BooleanBase => "boolean.base",
            Self::ObjectBase => "object.base",
            Self::ObjectUnknown => "object.unknown",
            Self::ArrayBase => "array.base",
            Self::ArrayMin => "array.min",
            Self::ArrayMax => "array.max",
        }
    }

    /// Template used when a rule has no custom message for this kind.
    #[must_use]
    pub const fn default_template(self) -> &'static str {
        match self {
            Self::Required => "\"{#label}\" is required",
            Self::AnyOnly => "\"{#label}\" must be one of [{#valids}]",
            Self::StringBase => "\"{#label}\" must be a string",
            Self::StringEmpty => "\"{#label}\" is not allowed to be empty",
            Self::StringMin => "\"{#label}\" length must be at least {#limit} characters long",
            Self::StringMax => {
                "\"{#label}\" length must be less than or equal to {#limit} characters long"
            }
            Self::StringUri => "\"{#label}\" must be a valid uri",
            Self::StringPattern => {
                "\"{#label}\" with value \"{#value}\" fails to match the required pattern: {#regex}"
            }
            Self::NumberBase => "\"{#label}\" must be a number",
            Self::NumberMin => "\"{#label}\" must be greater than or equal to {#limit}",
            Self::NumberMax => "\"{#label}\" must be less than or equal to {#limit}",
            Self::NumberInteger => "\"{#label}\" must be an integer",
            Self::DateBase => "\"{#label}\" must be a valid date",
            Self::DateFormat => "\"{#label}\" must be in ISO 8601 date format",
            Self::DateMin => "\"{#label}\" must be greater than or equal to \"{#limit}\"",
            Self::BooleanBase => "\"{#label}\" must be a boolean",
            Self::ObjectBase => "\"{#label}\" must be of type object",
            Self::ObjectUnknown => "\"{#label}\" is not allowed",
            Self::ArrayBase => "\"{#label}\" must be an array",
            Self::ArrayMin => "\"{#label}\" must contain at least {#limit} items",
            Self::ArrayMax => "\"{#label}\" must contain less than or equal to {#limit} items",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Values substituted into a message template.
#[derive(Debug, Clone, Default)]
pub struct MessageContext {
    pub label: String,
    pub limit: Option<String>,
    pub value: Option<String>,
    pub valids: Option<String>,
    pub regex: Option<String>,
}

impl MessageContext {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_valids(mut self, valids: impl Into<String>) -> Self {
        self.valids = Some(valids.into());
        self
    }

    #[must_use]
    pub fn with_regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    /// Fill every `{#name}` placeholder in one pass, so substituted text is
    /// never scanned again. Unknown or unset placeholders stay as written.
    fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{#") {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            let Some(end) = tail.find('}') else {
                rest = tail;
                break;
            };
            match self.placeholder(&tail[2..end]) {
                Some(value) => out.push_str(value),
                None => out.push_str(&tail[..=end]),
            }
            rest = &tail[end + 1..];
        }
        out.push_str(rest);
        out
    }

    fn placeholder(&self, name: &str) -> Option<&str> {
        match name {
            "label" => Some(&self.label),
            "limit" => self.limit.as_deref(),
            "value" => self.value.as_deref(),
            "valids" => self.valids.as_deref(),
            "regex" => self.regex.as_deref(),
            _ => None,
        }
    }
}

/// Per-rule overrides of the default messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    overrides: BTreeMap<ViolationKind, String>,
}

impl MessageTable {
    pub fn insert(&mut self, kind: ViolationKind, template: impl Into<String>) {
        self.overrides.insert(kind, template.into());
    }

    #[must_use]
    pub fn get(&self, kind: ViolationKind) -> Option<&str> {
        self.overrides.get(&kind).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Render the message for `kind`, preferring the rule's override.
    #[must_use]
    pub fn render(&self, kind: ViolationKind, ctx: &MessageContext) -> String {
        let template = self.get(kind).unwrap_or_else(|| kind.default_template());
        ctx.render(template)
    }
}

/// Format a numeric limit the way form authors write it (`5`, not `5.0`).
#[must_use]
pub fn format_number(n: f64) -> String {
    serde_json::Number::from_f64(n).map_or_else(
        || n.to_string(),
        |number| {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{n:.0}")
            } else {
                number.to_string()
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_message_uses_label() {
        let table = MessageTable::default();
        let msg = table.render(ViolationKind::Required, &MessageContext::new("projectName"));
        assert_eq!(msg, "\"projectName\" is required");
    }

    #[test]
    fn override_wins_over_default() {
        let mut table = MessageTable::default();
        table.insert(ViolationKind::NumberMin, "Daily budget must be at least ${#limit}");
        let ctx = MessageContext::new("dailyBudget").with_limit("5");
        assert_eq!(
            table.render(ViolationKind::NumberMin, &ctx),
            "Daily budget must be at least $5"
        );
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let table = MessageTable::default();
        let msg = table.render(ViolationKind::StringMin, &MessageContext::new("x"));
        assert!(msg.contains("{#limit}"));
    }

    #[test]
    fn substituted_text_is_not_expanded_again() {
        let table = MessageTable::default();
        let ctx = MessageContext::new("code")
            .with_value("{#regex}")
            .with_regex("^[A-Z]+$");
        assert_eq!(
            table.render(ViolationKind::StringPattern, &ctx),
            "\"code\" with value \"{#regex}\" fails to match the required pattern: ^[A-Z]+$"
        );
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(0.01), "0.01");
        assert_eq!(format_number(-3.0), "-3");
    }

    #[test]
    fn codes_match_serde_names() {
        let json = serde_json::to_string(&ViolationKind::StringPattern).unwrap();
        assert_eq!(json, format!("\"{}\"", ViolationKind::StringPattern.code()));
    }
}
