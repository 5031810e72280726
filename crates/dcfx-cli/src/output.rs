use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::commands::ValuationReport;
use crate::error::CliError;

pub fn render(report: &ValuationReport, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => write_table(&mut out, report)?,
    }

    Ok(())
}

/// Human-readable breakdown. The last line is always the per-share value.
pub fn write_table<W: Write>(out: &mut W, report: &ValuationReport) -> Result<(), CliError> {
    if let Some(symbol) = &report.symbol {
        writeln!(out, "symbol      : {symbol}")?;
    }
    writeln!(out, "source      : {}", report.source)?;
    writeln!(out, "generated_at: {}", report.generated_at)?;

    let parameters = &report.parameters;
    writeln!(out, "assumptions:")?;
    writeln!(out, "  forward periods      : {}", parameters.forward_periods)?;
    writeln!(out, "  growth rate          : {}", parameters.growth_rate)?;
    writeln!(out, "  perpetual growth rate: {}", parameters.perpetual_growth_rate)?;
    writeln!(out, "  discount rate        : {}", parameters.discount_rate)?;

    writeln!(out, "free cash flow (oldest first):")?;
    for value in report.inputs.free_cash_flow.as_slice() {
        writeln!(out, "  {value:>22.2}")?;
    }

    let balance = &report.inputs.balance_sheet;
    writeln!(out, "total cash        : {:.2}", balance.total_cash)?;
    writeln!(out, "total debt        : {:.2}", balance.total_debt)?;
    writeln!(out, "shares outstanding: {:.0}", balance.outstanding_shares)?;

    let valuation = &report.valuation;
    writeln!(out, "projection:")?;
    writeln!(out, "  {:>4}  {:>22}  {:>22}", "year", "free cash flow", "present value")?;
    for projection in &valuation.projections {
        writeln!(
            out,
            "  {:>4}  {:>22.2}  {:>22.2}",
            projection.year, projection.free_cash_flow, projection.present_value
        )?;
    }
    writeln!(
        out,
        "terminal value (year {}): {:.2} (present value {:.2})",
        valuation.terminal_year, valuation.terminal_value, valuation.terminal_present_value
    )?;
    writeln!(out, "present value sum : {:.2}", valuation.present_value_sum)?;
    writeln!(out, "equity value      : {:.2}", valuation.equity_value)?;
    writeln!(out, "DCF price per share: {:.2} USD", valuation.per_share_value)?;

    Ok(())
}
