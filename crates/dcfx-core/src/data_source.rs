//! Data source trait and request/error types.
//!
//! A data source supplies the four figures a valuation needs for one symbol.
//! Its failures are [`SourceError`]s, kept apart from
//! [`ValuationError`](crate::ValuationError) so callers can tell "the data
//! could not be retrieved" from "the model inputs are wrong".
//!
//! | Figure | Method |
//! |--------|--------|
//! | Free cash flow history | [`DataSource::free_cash_flow`] |
//! | Total cash | [`DataSource::total_cash`] |
//! | Total debt | [`DataSource::total_debt`] |
//! | Outstanding shares | [`DataSource::outstanding_shares`] |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{BalanceSheetSnapshot, FreeCashFlowHistory, ProviderId, Symbol, ValuationInputs};

/// Most statement pages show four fiscal years.
pub const MAX_HISTORY_YEARS: usize = 4;

/// Provider failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Transport failed before a response arrived.
    Unavailable,
    /// Upstream answered with a redirect, client, or server error status.
    UpstreamStatus,
    InvalidRequest,
    /// The page did not contain the expected element.
    MissingField,
    /// A figure was found but could not be read as a number.
    Parse,
}

/// Structured provider error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn upstream_status(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind: SourceErrorKind::UpstreamStatus,
            message: message.into(),
            retryable,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn missing_field(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::MissingField,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Parse,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::UpstreamStatus => "source.upstream_status",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::MissingField => "source.missing_field",
            SourceErrorKind::Parse => "source.parse",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request for a company's recent free cash flow history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeCashFlowRequest {
    pub symbol: Symbol,
    pub years: usize,
}

impl FreeCashFlowRequest {
    pub fn new(symbol: Symbol, years: usize) -> Result<Self, SourceError> {
        if years == 0 {
            return Err(SourceError::invalid_request(
                "free cash flow history must cover at least one year",
            ));
        }
        if years > MAX_HISTORY_YEARS {
            return Err(SourceError::invalid_request(format!(
                "free cash flow history is limited to {MAX_HISTORY_YEARS} years, got {years}"
            )));
        }
        Ok(Self { symbol, years })
    }
}

type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Fundamentals provider contract.
///
/// Implementations must be `Send + Sync`; one instance may serve several
/// valuations concurrently.
pub trait DataSource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Free cash flow for the most recent `req.years` fiscal years, oldest
    /// first. May return fewer years if the provider has fewer.
    fn free_cash_flow<'a>(&'a self, req: &'a FreeCashFlowRequest)
        -> SourceFuture<'a, FreeCashFlowHistory>;

    fn total_cash<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, f64>;

    fn total_debt<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, f64>;

    fn outstanding_shares<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, f64>;

    /// Fetch all four figures in order, failing on the first error.
    fn valuation_inputs<'a>(
        &'a self,
        req: &'a FreeCashFlowRequest,
    ) -> SourceFuture<'a, ValuationInputs> {
        Box::pin(async move {
            let symbol = &req.symbol;
            let source = self.id();

            let free_cash_flow = self.free_cash_flow(req).await?;
            tracing::info!(%symbol, %source, years = free_cash_flow.len(), "free cash flows obtained");

            let total_cash = self.total_cash(symbol).await?;
            tracing::info!(%symbol, %source, total_cash, "total cash obtained");

            let total_debt = self.total_debt(symbol).await?;
            tracing::info!(%symbol, %source, total_debt, "total debt obtained");

            let outstanding_shares = self.outstanding_shares(symbol).await?;
            tracing::info!(%symbol, %source, outstanding_shares, "outstanding shares obtained");

            Ok(ValuationInputs {
                symbol: symbol.clone(),
                free_cash_flow,
                balance_sheet: BalanceSheetSnapshot::new(total_cash, total_debt, outstanding_shares),
            })
        })
    }
}
