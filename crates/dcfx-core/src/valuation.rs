//! Discounted-cash-flow valuation engine.
//!
//! The model projects the most recent free cash flow forward with constant
//! growth, caps the projection with a Gordon-growth terminal value, discounts
//! everything to today and adjusts by net cash to reach a per-share value.
//!
//! The terminal value is discounted one year beyond the last explicit
//! projection year (`t = forward_periods + 1`). Reports produced by this
//! crate depend on that horizon; keep it when changing the model.
//!
//! ```rust
//! use dcfx_core::{
//!     intrinsic_value_per_share, BalanceSheetSnapshot, FreeCashFlowHistory, ValuationParameters,
//! };
//!
//! let history = FreeCashFlowHistory::new(vec![100.0]);
//! let params = ValuationParameters::new(1, 0.0, 0.02, 0.08);
//! let balance = BalanceSheetSnapshot::new(0.0, 0.0, 10.0);
//!
//! let per_share = intrinsic_value_per_share(&history, &params, &balance)?;
//! assert!((per_share - 155.006).abs() < 1e-3);
//! # Ok::<(), dcfx_core::ValuationError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::{BalanceSheetSnapshot, FreeCashFlowHistory, ValuationError, ValuationParameters};

/// One explicit projection year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedCashFlow {
    /// 1-indexed year offset used for discounting.
    pub year: u32,
    pub free_cash_flow: f64,
    pub present_value: f64,
}

/// Full breakdown of a single valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfValuation {
    pub projections: Vec<ProjectedCashFlow>,
    pub terminal_value: f64,
    /// Year offset the terminal value is discounted at.
    pub terminal_year: u32,
    pub terminal_present_value: f64,
    pub present_value_sum: f64,
    pub equity_value: f64,
    pub per_share_value: f64,
}

/// Value a company and return the full breakdown.
///
/// # Errors
///
/// Returns [`ValuationError::InsufficientData`] if the history is empty or
/// holds non-finite values, and [`ValuationError::InvalidModelParameters`]
/// if the horizon is zero or above [`MAX_FORWARD_PERIODS`](crate::MAX_FORWARD_PERIODS),
/// `discount_rate <= perpetual_growth_rate`, the assumptions overflow, the
/// share count is not positive, or cash/debt are negative or non-finite.
pub fn discounted_cash_flow(
    history: &FreeCashFlowHistory,
    params: &ValuationParameters,
    balance: &BalanceSheetSnapshot,
) -> Result<DcfValuation, ValuationError> {
    history.validate()?;
    params.validate()?;
    balance.validate()?;

    let seed = history
        .latest()
        .ok_or_else(|| ValuationError::insufficient_data("free cash flow history is empty"))?;

    let discount = 1.0 + params.discount_rate;
    let growth = 1.0 + params.growth_rate;

    let mut projections = Vec::with_capacity(params.forward_periods as usize);
    let mut free_cash_flow = seed;
    for year in 1..=params.forward_periods {
        free_cash_flow *= growth;
        projections.push(ProjectedCashFlow {
            year,
            free_cash_flow,
            present_value: free_cash_flow / discount.powi(exponent(year)?),
        });
    }

    let terminal_value = free_cash_flow * (1.0 + params.perpetual_growth_rate)
        / (params.discount_rate - params.perpetual_growth_rate);
    let terminal_year = params.forward_periods + 1;
    let terminal_present_value = terminal_value / discount.powi(exponent(terminal_year)?);

    let present_value_sum = projections
        .iter()
        .map(|projection| projection.present_value)
        .sum::<f64>()
        + terminal_present_value;

    let equity_value = present_value_sum + balance.total_cash - balance.total_debt;
    let per_share_value = equity_value / balance.outstanding_shares;

    // Finite inputs can still overflow, e.g. extreme growth or a discount
    // rate of -100%.
    if !per_share_value.is_finite() || !terminal_present_value.is_finite() {
        return Err(ValuationError::invalid_parameters(format!(
            "assumptions produce a non-finite valuation (growth {}, discount {} over {} years)",
            params.growth_rate, params.discount_rate, params.forward_periods
        )));
    }

    Ok(DcfValuation {
        projections,
        terminal_value,
        terminal_year,
        terminal_present_value,
        present_value_sum,
        equity_value,
        per_share_value,
    })
}

fn exponent(year: u32) -> Result<i32, ValuationError> {
    i32::try_from(year).map_err(|_| {
        ValuationError::invalid_parameters(format!("discount year {year} is out of range"))
    })
}

/// Estimated fair value per share.
pub fn intrinsic_value_per_share(
    history: &FreeCashFlowHistory,
    params: &ValuationParameters,
    balance: &BalanceSheetSnapshot,
) -> Result<f64, ValuationError> {
    discounted_cash_flow(history, params, balance).map(|valuation| valuation.per_share_value)
}
