use dcfx_core::{SourceError, ValidationError, ValuationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("command error: {0}")]
    Command(String),

    #[error("invalid --header value: {0}")]
    Header(String),

    #[error("data unavailable: {0}")]
    DataUnavailable(#[from] SourceError),

    #[error("valuation failed: {0} ({code})", code = .0.code())]
    Valuation(#[from] ValuationError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::Header(_) => 2,
            Self::DataUnavailable(_) => 3,
            Self::Serialization(_) => 4,
            Self::Timestamp(_) => 4,
            Self::Valuation(_) => 6,
            Self::Io(_) => 10,
        }
    }
}
