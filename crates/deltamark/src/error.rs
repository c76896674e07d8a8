//! CLI error types.

use deltamark_config::ConfigError;
use deltamark_delta::DeltaError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Delta(#[from] DeltaError),
}
