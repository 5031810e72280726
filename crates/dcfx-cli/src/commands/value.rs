use std::collections::BTreeMap;
use std::time::Instant;

use dcfx_core::{
    discounted_cash_flow, DataSource, FreeCashFlowRequest, ProviderConfig, Symbol, YahooAdapter,
};

use crate::cli::ValueArgs;
use crate::error::CliError;

use super::{ReportInputs, ValuationReport};

pub async fn run(args: &ValueArgs) -> Result<ValuationReport, CliError> {
    let adapter = YahooAdapter::new(provider_config(args)?);
    run_with(args, &adapter).await
}

/// Value `args.ticker` with figures from `source`.
pub async fn run_with(
    args: &ValueArgs,
    source: &dyn DataSource,
) -> Result<ValuationReport, CliError> {
    let symbol = Symbol::parse(&args.ticker)?;
    let parameters = args.model.parameters();
    // Bad assumptions fail before any page is fetched.
    parameters.validate()?;

    let request = FreeCashFlowRequest::new(symbol.clone(), args.period_backwards)
        .map_err(|error| CliError::Command(error.to_string()))?;

    tracing::info!(%symbol, source = %source.id(), "calculating DCF per share");
    let started = Instant::now();
    let inputs = source.valuation_inputs(&request).await?;
    let valuation =
        discounted_cash_flow(&inputs.free_cash_flow, &parameters, &inputs.balance_sheet)?;
    tracing::info!(
        %symbol,
        per_share = valuation.per_share_value,
        latency_ms = started.elapsed().as_millis() as u64,
        "valuation complete"
    );

    ValuationReport::new(
        Some(inputs.symbol),
        source.id(),
        parameters,
        ReportInputs {
            free_cash_flow: inputs.free_cash_flow,
            balance_sheet: inputs.balance_sheet,
        },
        valuation,
    )
}

fn provider_config(args: &ValueArgs) -> Result<ProviderConfig, CliError> {
    let config = ProviderConfig::default().with_timeout_ms(args.timeout_ms);
    match &args.header {
        Some(raw) => Ok(config.with_headers(parse_headers(raw)?)),
        None => Ok(config),
    }
}

fn parse_headers(raw: &str) -> Result<BTreeMap<String, String>, CliError> {
    serde_json::from_str(raw).map_err(|error| CliError::Header(error.to_string()))
}
