mod compute;
mod value;

use dcfx_core::{
    BalanceSheetSnapshot, DcfValuation, FreeCashFlowHistory, ProviderId, Symbol,
    ValuationParameters,
};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Everything a valuation run produced, in the shape printed as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ValuationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<Symbol>,
    pub source: ProviderId,
    pub generated_at: String,
    pub parameters: ValuationParameters,
    pub inputs: ReportInputs,
    pub valuation: DcfValuation,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportInputs {
    pub free_cash_flow: FreeCashFlowHistory,
    pub balance_sheet: BalanceSheetSnapshot,
}

impl ValuationReport {
    pub fn new(
        symbol: Option<Symbol>,
        source: ProviderId,
        parameters: ValuationParameters,
        inputs: ReportInputs,
        valuation: DcfValuation,
    ) -> Result<Self, CliError> {
        Ok(Self {
            symbol,
            source,
            generated_at: OffsetDateTime::now_utc().format(&Rfc3339)?,
            parameters,
            inputs,
            valuation,
        })
    }
}

pub async fn run(cli: &Cli) -> Result<ValuationReport, CliError> {
    match &cli.command {
        Command::Value(args) => value::run(args).await,
        Command::Compute(args) => compute::run(args),
    }
}
