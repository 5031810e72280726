use thiserror::Error;

/// Validation and contract errors for symbols and request shapes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter or digit: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid source '{value}', expected one of yahoo, manual")]
    InvalidSource { value: String },
}

/// Failures raised by the valuation engine before any arithmetic runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValuationError {
    #[error("invalid model parameters: {reason}")]
    InvalidModelParameters { reason: String },

    #[error("insufficient data: {reason}")]
    InsufficientData { reason: String },
}

impl ValuationError {
    pub fn invalid_parameters(reason: impl Into<String>) -> Self {
        Self::InvalidModelParameters {
            reason: reason.into(),
        }
    }

    pub fn insufficient_data(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidModelParameters { .. } => "valuation.invalid_model_parameters",
            Self::InsufficientData { .. } => "valuation.insufficient_data",
        }
    }
}
