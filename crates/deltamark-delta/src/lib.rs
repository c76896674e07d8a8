//! Rich-text delta document model.
//!
//! A [`Delta`] is the flat, ordered log of insert operations an editor widget
//! produces for its document. Each [`Op`] carries inserted text (or an embed
//! object) and an [`AttributeMap`] of formatting flags.
//!
//! Block-level attributes such as the heading level live on the `"\n"` insert
//! that terminates a line, not on the text that precedes it.
//!
//! # Example
//!
//! ```
//! use deltamark_delta::Delta;
//!
//! let delta = Delta::from_json(
//!     r#"{"ops":[{"insert":"Title"},{"insert":"\n","attributes":{"header":1}}]}"#,
//! )
//! .unwrap();
//! assert_eq!(delta.ops().len(), 2);
//! assert!(delta.ops()[1].is_line_break());
//! ```

mod attributes;
mod op;

pub use attributes::{AttributeError, AttributeMap, HeadingLevel, Script};
pub use op::{Insert, Op};

use serde::{Deserialize, Serialize};

/// Error decoding a delta document.
#[derive(Debug, thiserror::Error)]
pub enum DeltaError {
    /// JSON decoding error.
    #[error("invalid delta JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered sequence of insert operations.
///
/// Operation order is document order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    ops: Vec<Op>,
}

impl Delta {
    /// Create a delta from operations.
    #[must_use]
    pub fn new(ops: Vec<Op>) -> Self {
        Self { ops }
    }

    /// Decode a delta from JSON.
    ///
    /// Accepts the editor's document shape (`{"ops": [...]}`) as well as a
    /// bare array of operations.
    pub fn from_json(json: &str) -> Result<Self, DeltaError> {
        if json.trim_start().starts_with('[') {
            let ops: Vec<Op> = serde_json::from_str(json)?;
            return Ok(Self { ops });
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Operations in document order.
    #[must_use]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Whether the delta has no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Concatenated text of all text inserts, embeds excluded.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.ops.iter().filter_map(Op::text).collect()
    }
}

impl FromIterator<Op> for Delta {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Op>> for Delta {
    fn from(ops: Vec<Op>) -> Self {
        Self { ops }
    }
}
