use dcfx_core::{
    discounted_cash_flow, BalanceSheetSnapshot, FreeCashFlowHistory, ProviderId, Symbol,
};

use crate::cli::ComputeArgs;
use crate::error::CliError;

use super::{ReportInputs, ValuationReport};

pub fn run(args: &ComputeArgs) -> Result<ValuationReport, CliError> {
    let symbol = args.symbol.as_deref().map(Symbol::parse).transpose()?;
    let parameters = args.model.parameters();
    let free_cash_flow = FreeCashFlowHistory::new(args.free_cash_flow.clone());
    let balance_sheet = BalanceSheetSnapshot::new(args.total_cash, args.total_debt, args.shares);

    let valuation = discounted_cash_flow(&free_cash_flow, &parameters, &balance_sheet)?;
    tracing::info!(
        years = free_cash_flow.len(),
        per_share = valuation.per_share_value,
        "manual valuation complete"
    );

    ValuationReport::new(
        symbol,
        ProviderId::Manual,
        parameters,
        ReportInputs {
            free_cash_flow,
            balance_sheet,
        },
        valuation,
    )
}
