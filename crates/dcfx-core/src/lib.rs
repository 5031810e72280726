//! # dcfx Core
//!
//! Discounted-cash-flow valuation engine and the data contracts that feed it.
//!
//! ## Overview
//!
//! - **Valuation engine**: a pure function from free cash flow history,
//!   model parameters, and a balance sheet snapshot to a per-share value
//! - **Domain types** with explicit `validate()` checks
//! - **Data source trait** for fundamentals providers
//! - **Yahoo Finance adapter** that scrapes the four inputs from HTML pages
//! - **HTTP transport seam** with a reqwest client and an offline client
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo Finance) |
//! | [`config`] | Explicit provider configuration (headers, timeout, hosts) |
//! | [`data_source`] | Data source trait, requests, and provider errors |
//! | [`domain`] | Symbol, cash flow history, parameters, balance sheet |
//! | [`error`] | Validation and valuation errors |
//! | [`http_client`] | HTTP client abstraction |
//! | [`source`] | Provider identifiers |
//! | [`valuation`] | The DCF engine |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dcfx_core::{
//!     discounted_cash_flow, DataSource, FreeCashFlowRequest, ProviderConfig, Symbol,
//!     ValuationParameters, YahooAdapter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = YahooAdapter::new(ProviderConfig::default());
//!     let request = FreeCashFlowRequest::new(Symbol::parse("GOOG")?, 4)?;
//!     let inputs = adapter.valuation_inputs(&request).await?;
//!
//!     let params = ValuationParameters::new(4, 0.15, 0.025, 0.08);
//!     let valuation =
//!         discounted_cash_flow(&inputs.free_cash_flow, &params, &inputs.balance_sheet)?;
//!     println!("{:.2} per share", valuation.per_share_value);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Retrieval failures and model failures live in separate types:
//!
//! ```rust
//! use dcfx_core::{SourceError, SourceErrorKind, ValuationError};
//!
//! fn describe_source(error: &SourceError) -> &'static str {
//!     match error.kind() {
//!         SourceErrorKind::Unavailable | SourceErrorKind::UpstreamStatus => "try again later",
//!         SourceErrorKind::MissingField | SourceErrorKind::Parse => "page layout changed",
//!         SourceErrorKind::InvalidRequest => "fix the request",
//!     }
//! }
//!
//! fn describe_valuation(error: &ValuationError) -> &'static str {
//!     match error {
//!         ValuationError::InvalidModelParameters { .. } => "fix the model parameters",
//!         ValuationError::InsufficientData { .. } => "need at least one year of cash flow",
//!     }
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod source;
pub mod valuation;

pub use adapters::YahooAdapter;

pub use config::ProviderConfig;

pub use data_source::{
    DataSource, FreeCashFlowRequest, SourceError, SourceErrorKind, MAX_HISTORY_YEARS,
};

pub use domain::{
    BalanceSheetSnapshot, FreeCashFlowHistory, Symbol, ValuationInputs, ValuationParameters,
    MAX_FORWARD_PERIODS,
};

pub use error::{ValidationError, ValuationError};

pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
    StatusClass,
};

pub use source::ProviderId;

pub use valuation::{
    discounted_cash_flow, intrinsic_value_per_share, DcfValuation, ProjectedCashFlow,
};
