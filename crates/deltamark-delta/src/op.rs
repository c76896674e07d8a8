//! Insert operations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::AttributeMap;

/// Inserted content: text or an embed object such as `{"image": "..."}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Insert {
    Text(String),
    Embed(Map<String, Value>),
}

/// A single insert operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Op {
    insert: Insert,
    #[serde(default, skip_serializing_if = "AttributeMap::is_empty")]
    attributes: AttributeMap,
}

impl Op {
    /// Create an operation from inserted content.
    #[must_use]
    pub fn new(insert: Insert) -> Self {
        Self {
            insert,
            attributes: AttributeMap::default(),
        }
    }

    /// Create a text insert without attributes.
    #[must_use]
    pub fn text_insert(text: impl Into<String>) -> Self {
        Self::new(Insert::Text(text.into()))
    }

    /// Create a `"\n"` insert.
    #[must_use]
    pub fn line_break() -> Self {
        Self::text_insert("\n")
    }

    /// Replace the attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: AttributeMap) -> Self {
        self.attributes = attributes;
        self
    }

    /// Inserted content.
    #[must_use]
    pub fn insert(&self) -> &Insert {
        &self.insert
    }

    /// Inserted text, `None` for embeds.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.insert {
            Insert::Text(text) => Some(text),
            Insert::Embed(_) => None,
        }
    }

    /// Attributes; empty when the operation has none.
    #[must_use]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Whether the insert is exactly `"\n"`.
    #[must_use]
    pub fn is_line_break(&self) -> bool {
        self.text() == Some("\n")
    }

    /// Whether the insert is longer text containing a `"\n"`.
    #[must_use]
    pub fn has_embedded_break(&self) -> bool {
        self.text()
            .is_some_and(|text| text != "\n" && text.contains('\n'))
    }
}
