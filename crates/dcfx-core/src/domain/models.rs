use serde::{Deserialize, Serialize};

use crate::{Symbol, ValuationError};

/// Annual free cash flow history, oldest first and most recent last.
///
/// Only the most recent figure anchors the projection. Earlier years are kept
/// so that providers and reports can show what was retrieved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FreeCashFlowHistory(Vec<f64>);

impl FreeCashFlowHistory {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Build a history from newest-first values, as statement pages list them.
    pub fn from_newest_first(mut values: Vec<f64>) -> Self {
        values.reverse();
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent actual free cash flow, if any.
    pub fn latest(&self) -> Option<f64> {
        self.0.last().copied()
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        if self.0.is_empty() {
            return Err(ValuationError::insufficient_data(
                "free cash flow history must contain at least one year",
            ));
        }

        if let Some(index) = self.0.iter().position(|value| !value.is_finite()) {
            return Err(ValuationError::insufficient_data(format!(
                "free cash flow at index {index} is not a finite number"
            )));
        }

        Ok(())
    }
}

/// Longest explicit projection window a valuation accepts.
pub const MAX_FORWARD_PERIODS: u32 = 100;

/// Model assumptions supplied by the caller for one valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationParameters {
    /// Explicit projection years before the terminal value takes over.
    pub forward_periods: u32,
    /// Annual growth applied during the explicit window.
    pub growth_rate: f64,
    /// Long-run growth assumed after the explicit window.
    pub perpetual_growth_rate: f64,
    pub discount_rate: f64,
}

impl ValuationParameters {
    pub const fn new(
        forward_periods: u32,
        growth_rate: f64,
        perpetual_growth_rate: f64,
        discount_rate: f64,
    ) -> Self {
        Self {
            forward_periods,
            growth_rate,
            perpetual_growth_rate,
            discount_rate,
        }
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        if self.forward_periods == 0 {
            return Err(ValuationError::invalid_parameters(
                "forward periods must be at least one year",
            ));
        }
        if self.forward_periods > MAX_FORWARD_PERIODS {
            return Err(ValuationError::invalid_parameters(format!(
                "forward periods must not exceed {MAX_FORWARD_PERIODS} years, got {}",
                self.forward_periods
            )));
        }

        validate_finite("growth_rate", self.growth_rate)?;
        validate_finite("perpetual_growth_rate", self.perpetual_growth_rate)?;
        validate_finite("discount_rate", self.discount_rate)?;

        if self.discount_rate <= self.perpetual_growth_rate {
            return Err(ValuationError::invalid_parameters(format!(
                "discount rate {} must be strictly greater than perpetual growth rate {}",
                self.discount_rate, self.perpetual_growth_rate
            )));
        }

        Ok(())
    }
}

/// Balance sheet figures combined with the discounted cash flows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetSnapshot {
    pub total_cash: f64,
    pub total_debt: f64,
    pub outstanding_shares: f64,
}

impl BalanceSheetSnapshot {
    pub const fn new(total_cash: f64, total_debt: f64, outstanding_shares: f64) -> Self {
        Self {
            total_cash,
            total_debt,
            outstanding_shares,
        }
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        validate_finite("outstanding_shares", self.outstanding_shares)?;
        if self.outstanding_shares <= 0.0 {
            return Err(ValuationError::invalid_parameters(format!(
                "outstanding shares must be positive, got {}",
                self.outstanding_shares
            )));
        }

        validate_non_negative("total_cash", self.total_cash)?;
        validate_non_negative("total_debt", self.total_debt)?;
        Ok(())
    }
}

/// The figures a data source supplies for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    pub symbol: Symbol,
    pub free_cash_flow: FreeCashFlowHistory,
    pub balance_sheet: BalanceSheetSnapshot,
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValuationError> {
    if !value.is_finite() {
        return Err(ValuationError::invalid_parameters(format!(
            "field '{field}' must be finite"
        )));
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValuationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValuationError::invalid_parameters(format!(
            "field '{field}' must be non-negative"
        )));
    }
    Ok(())
}
