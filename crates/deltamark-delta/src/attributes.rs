//! Per-run and per-line formatting attributes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Malformed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    /// `header` is not an integer in 1..=6.
    #[error("invalid heading level {value}: expected an integer from 1 to 6")]
    InvalidHeading {
        /// The offending value, JSON-encoded.
        value: String,
    },
}

/// Heading level (1-6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Create a heading level, returning `None` outside 1..=6.
    #[must_use]
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(Self(level))
    }

    /// Numeric level (1-6).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Vertical script position. Reserved: parsed but not rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Script {
    Sub,
    Super,
}

/// Formatting attributes of a run or of a line.
///
/// Flags use strict-true semantics: only JSON `true` turns a format on.
/// `header` is kept as the raw JSON value so a malformed level never fails
/// decoding; [`AttributeMap::heading`] validates it at render time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeMap {
    /// Bold text.
    #[serde(deserialize_with = "strict_flag", skip_serializing_if = "is_false")]
    pub bold: bool,
    /// Italic text.
    #[serde(deserialize_with = "strict_flag", skip_serializing_if = "is_false")]
    pub italic: bool,
    /// Strikethrough text.
    #[serde(deserialize_with = "strict_flag", skip_serializing_if = "is_false")]
    pub strike: bool,
    /// Raw heading level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
    /// Text color.
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Background color.
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Raw script position (`sub` or `super`).
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// Line alignment.
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    /// Link target.
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Unrecognized attributes, kept verbatim.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

fn strict_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}

/// Reserved string attributes never fail decoding; non-strings read as unset.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Integral float as an integer (`2.0` to `2`); `None` for fractions.
#[allow(clippy::cast_possible_truncation)]
fn integral(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() <= 1e15).then_some(value as i64)
}

impl AttributeMap {
    /// Create an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bold flag.
    #[must_use]
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the italic flag.
    #[must_use]
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set the strike flag.
    #[must_use]
    pub fn with_strike(mut self) -> Self {
        self.strike = true;
        self
    }

    /// Set the raw heading level. Out-of-range values are stored as given.
    #[must_use]
    pub fn with_header(mut self, level: i64) -> Self {
        self.header = Some(Value::from(level));
        self
    }

    /// Whether no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Resolve the heading level.
    ///
    /// `Ok(None)` when the attribute is absent, `null` or `false`. Integers,
    /// integral floats (`2.0`) and numeric strings in 1..=6 are accepted.
    pub fn heading(&self) -> Result<Option<HeadingLevel>, AttributeError> {
        let level = match &self.header {
            None | Some(Value::Null | Value::Bool(false)) => return Ok(None),
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            Some(_) => None,
        };

        level
            .and_then(|l| u8::try_from(l).ok())
            .and_then(HeadingLevel::new)
            .map(Some)
            .ok_or_else(|| AttributeError::InvalidHeading {
                value: self
                    .header
                    .as_ref()
                    .map(Value::to_string)
                    .unwrap_or_default(),
            })
    }

    /// Resolved script position, `None` if absent or unrecognized.
    #[must_use]
    pub fn script(&self) -> Option<Script> {
        match self.script.as_deref() {
            Some("sub") => Some(Script::Sub),
            Some("super") => Some(Script::Super),
            _ => None,
        }
    }
}
