//! CLI argument definitions for dcfx.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `value` | Scrape Yahoo Finance and value a ticker |
//! | `compute` | Value a company from figures given on the command line |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--log-level` | `warn` | Log level unless `RUST_LOG` is set |
//! | `--log-format` | `pretty` | Log formatter (pretty, json) |
//!
//! # Examples
//!
//! ```bash
//! dcfx value GOOG
//! dcfx value MSFT -f 5 -g 0.1 -d 0.09 --format json --pretty
//! dcfx compute --fcf 80 90 100 --total-cash 50 --total-debt 20 --shares 10
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use dcfx_core::config::DEFAULT_TIMEOUT_MS;
use dcfx_core::{ValuationParameters, MAX_HISTORY_YEARS};

/// Discounted cash flow valuation per share.
#[derive(Debug, Parser)]
#[command(
    name = "dcfx",
    author,
    version,
    about = "Discounted cash flow valuation per share",
    long_about = "dcfx estimates the intrinsic value per share of a listed company. It projects \
the most recent annual free cash flow forward, adds a perpetual-growth terminal value, discounts \
everything to today and adjusts by cash and debt.\n\
\n\
Use 'dcfx <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for the valuation report.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Base log level (trace, debug, info, warn, error). RUST_LOG overrides it.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Log output format. Logs go to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable breakdown.
    Table,
    /// Single JSON object.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch fundamentals from Yahoo Finance and value the ticker.
    ///
    /// # Examples
    ///
    ///   dcfx value GOOG
    ///   dcfx value AAPL --period-backwards 2 --growth-rate 0.08
    Value(ValueArgs),

    /// Value a company from free cash flow and balance sheet figures.
    ///
    /// # Examples
    ///
    ///   dcfx compute --fcf 100 --shares 10 -f 1 -g 0 -p 0.02
    Compute(ComputeArgs),
}

/// Model assumptions shared by every command.
#[derive(Debug, Clone, Copy, Args)]
pub struct ModelArgs {
    /// Explicit projection years before the terminal value (1 to 100).
    #[arg(short = 'f', long, default_value_t = 4)]
    pub period_forwards: u32,

    /// Discount rate, e.g. 0.08 for 8%.
    #[arg(short = 'd', long, default_value_t = 0.08, allow_negative_numbers = true)]
    pub discount_rate: f64,

    /// Annual free cash flow growth during the projection.
    #[arg(short = 'g', long, default_value_t = 0.15, allow_negative_numbers = true)]
    pub growth_rate: f64,

    /// Growth assumed forever after the projection.
    #[arg(short = 'p', long, default_value_t = 0.025, allow_negative_numbers = true)]
    pub perpetual_growth_rate: f64,
}

impl ModelArgs {
    pub const fn parameters(&self) -> ValuationParameters {
        ValuationParameters::new(
            self.period_forwards,
            self.growth_rate,
            self.perpetual_growth_rate,
            self.discount_rate,
        )
    }
}

/// Arguments for the `value` command.
#[derive(Debug, Args)]
pub struct ValueArgs {
    /// Ticker to analyse (e.g. GOOG).
    pub ticker: String,

    /// Years of free cash flow history to retrieve (1 to 4).
    #[arg(short = 'b', long, default_value_t = MAX_HISTORY_YEARS)]
    pub period_backwards: usize,

    /// Request headers as a JSON object. Replaces the default browser user-agent.
    ///
    /// Example: --header '{"user-agent": "Mozilla/5.0"}'
    #[arg(long)]
    pub header: Option<String>,

    /// Per-page request timeout in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Arguments for the `compute` command.
#[derive(Debug, Args)]
pub struct ComputeArgs {
    /// Annual free cash flow, oldest first. Only the last value is projected.
    #[arg(long = "fcf", required = true, num_args = 1.., allow_negative_numbers = true)]
    pub free_cash_flow: Vec<f64>,

    #[arg(long, default_value_t = 0.0)]
    pub total_cash: f64,

    #[arg(long, default_value_t = 0.0)]
    pub total_debt: f64,

    /// Outstanding share count.
    #[arg(long, allow_negative_numbers = true)]
    pub shares: f64,

    /// Ticker to label the report with.
    #[arg(long)]
    pub symbol: Option<String>,

    #[command(flatten)]
    pub model: ModelArgs,
}
