//! Renderer error types.

use deltamark_delta::AttributeError;

/// Error resolving the decoration of a single run.
///
/// Never escapes a render: the renderer logs it, records a warning, and emits
/// the run without the failing decoration.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{0}")]
    Attribute(#[from] AttributeError),
}
