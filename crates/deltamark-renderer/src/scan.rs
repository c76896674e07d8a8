//! Forward scan for line-level attributes.
//!
//! Block attributes such as the heading level are carried on the `"\n"`
//! insert that ends a line, so the attributes for a run are found by looking
//! ahead to the next line break.

use deltamark_delta::{AttributeMap, Op};

/// Find the attributes of the line containing `ops[index]`.
///
/// Walks forward from `index + 1`. Returns the attributes of the first
/// operation that is exactly `"\n"`. Returns `None` if a longer insert with an
/// embedded newline comes first (the caller splits that run itself) or if the
/// sequence ends without a line break.
#[must_use]
pub fn line_attributes_after(ops: &[Op], index: usize) -> Option<&AttributeMap> {
    for op in ops.iter().skip(index + 1) {
        if op.is_line_break() {
            return Some(op.attributes());
        }
        if op.has_embedded_break() {
            return None;
        }
    }
    None
}
