//! # Domain Models
//!
//! Inputs to a discounted-cash-flow valuation.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`FreeCashFlowHistory`] | Annual free cash flow, oldest first |
//! | [`ValuationParameters`] | Horizon, growth, perpetual growth, discount rate |
//! | [`BalanceSheetSnapshot`] | Total cash, total debt, outstanding shares |
//! | [`ValuationInputs`] | Everything a data source returns for one symbol |
//!
//! Types are plain data; `validate()` checks the invariants the valuation
//! engine relies on and the engine calls it before computing anything.

mod models;
mod symbol;

pub use models::{
    BalanceSheetSnapshot, FreeCashFlowHistory, ValuationInputs, ValuationParameters,
    MAX_FORWARD_PERIODS,
};
pub use symbol::Symbol;
