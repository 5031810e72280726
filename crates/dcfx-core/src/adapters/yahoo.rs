use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use scraper::{ElementRef, Html, Selector};

use crate::config::ProviderConfig;
use crate::data_source::{DataSource, FreeCashFlowRequest, SourceError};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient, StatusClass};
use crate::{FreeCashFlowHistory, ProviderId, Symbol};

/// Statement tables are published in thousands.
const STATEMENT_SCALE: f64 = 1_000.0;

const FREE_CASH_FLOW_TITLE: &str = r#"[title="Free cash flow"]"#;
const TOTAL_CASH_TITLE: &str = r#"[title="Total cash"]"#;
const TOTAL_DEBT_TITLE: &str = r#"[title="Total Debt"]"#;
const SHARES_OUTSTANDING_LABEL: &str = r#"[aria-label^="'Shares outstanding'"]"#;

/// Leading cells of the free cash flow row that are labels, not values.
const FREE_CASH_FLOW_VALUE_OFFSET: usize = 2;

/// Yahoo Finance scraping adapter.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    config: ProviderConfig,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}

impl YahooAdapter {
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: ProviderConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn cash_flow_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/quote/{}/cash-flow",
            self.config.statements_base_url,
            symbol.path_segment()
        )
    }

    /// Balance sheet page used for total cash.
    pub fn balance_sheet_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/quote/{}/balance-sheet",
            self.config.statements_base_url,
            symbol.path_segment()
        )
    }

    /// Balance sheet page used for total debt.
    pub fn debt_balance_sheet_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/quote/{}/balance-sheet",
            self.config.debt_base_url,
            symbol.path_segment()
        )
    }

    pub fn key_statistics_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/quote/{}/key-statistics",
            self.config.statements_base_url,
            symbol.path_segment()
        )
    }

    async fn fetch_page(&self, url: String, page: &'static str) -> Result<String, SourceError> {
        tracing::debug!(%url, page, "fetching yahoo page");

        let request = HttpRequest::get(url)
            .with_headers(&self.config.headers)
            .with_timeout_ms(self.config.timeout_ms);
        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                SourceError::unavailable(format!(
                    "yahoo {page} page transport error: {}",
                    error.message()
                ))
            } else {
                SourceError::invalid_request(format!(
                    "yahoo {page} page request rejected: {}",
                    error.message()
                ))
            }
        })?;

        check_status(&response, page)?;
        Ok(response.body)
    }
}

impl DataSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn free_cash_flow<'a>(
        &'a self,
        req: &'a FreeCashFlowRequest,
    ) -> Pin<Box<dyn Future<Output = Result<FreeCashFlowHistory, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self
                .fetch_page(self.cash_flow_url(&req.symbol), "cash flow")
                .await?;
            let newest_first = parse_free_cash_flow(&body, req.years)?;
            if newest_first.len() < req.years {
                tracing::warn!(
                    symbol = %req.symbol,
                    requested = req.years,
                    available = newest_first.len(),
                    "yahoo cash flow page has fewer years than requested"
                );
            }
            Ok(FreeCashFlowHistory::from_newest_first(newest_first))
        })
    }

    fn total_cash<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<f64, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self
                .fetch_page(self.balance_sheet_url(symbol), "balance sheet")
                .await?;
            parse_total_cash(&body)
        })
    }

    fn total_debt<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<f64, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self
                .fetch_page(self.debt_balance_sheet_url(symbol), "balance sheet")
                .await?;
            parse_total_debt(&body)
        })
    }

    fn outstanding_shares<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<f64, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self
                .fetch_page(self.key_statistics_url(symbol), "key statistics")
                .await?;
            parse_outstanding_shares(&body)
        })
    }
}

fn check_status(response: &HttpResponse, page: &str) -> Result<(), SourceError> {
    let status = response.status;
    match response.status_class() {
        StatusClass::Informational | StatusClass::Success => Ok(()),
        StatusClass::Redirection => Err(SourceError::upstream_status(
            format!("yahoo {page} page: HTTP status {status} (3xx redirection)"),
            false,
        )),
        StatusClass::ClientError => Err(SourceError::upstream_status(
            format!("yahoo {page} page: HTTP status {status} (4xx client error)"),
            matches!(status, 408 | 429),
        )),
        StatusClass::ServerError => Err(SourceError::upstream_status(
            format!("yahoo {page} page: HTTP status {status} (5xx server error)"),
            true,
        )),
        StatusClass::Unknown => Err(SourceError::upstream_status(
            format!("yahoo {page} page: unexpected HTTP status {status}"),
            false,
        )),
    }
}

/// Free cash flow values from a cash flow page, newest first, in currency units.
///
/// The page repeats the row title outside the statement table; the second
/// match is the statement row when both are present.
pub fn parse_free_cash_flow(html: &str, years: usize) -> Result<Vec<f64>, SourceError> {
    let document = Html::parse_document(html);
    let titles = select_all(&document, FREE_CASH_FLOW_TITLE)?;
    let title = titles
        .get(1)
        .or_else(|| titles.first())
        .copied()
        .ok_or_else(|| SourceError::missing_field("no 'Free cash flow' row on cash flow page"))?;

    let cells = row_cells(title, "span")?;
    let values = cells
        .iter()
        .skip(FREE_CASH_FLOW_VALUE_OFFSET)
        .take(years)
        .map(|text| parse_number(text).map(|value| value * STATEMENT_SCALE))
        .collect::<Result<Vec<_>, _>>()?;

    if values.is_empty() {
        return Err(SourceError::missing_field(
            "'Free cash flow' row has no values",
        ));
    }
    Ok(values)
}

/// Total cash in currency units.
pub fn parse_total_cash(html: &str) -> Result<f64, SourceError> {
    parse_balance_sheet_row(html, TOTAL_CASH_TITLE, "Total cash")
}

/// Total debt in currency units.
pub fn parse_total_debt(html: &str) -> Result<f64, SourceError> {
    parse_balance_sheet_row(html, TOTAL_DEBT_TITLE, "Total Debt")
}

/// Share count from a key statistics page (`15.2B` style figures).
pub fn parse_outstanding_shares(html: &str) -> Result<f64, SourceError> {
    let document = Html::parse_document(html);
    let label = select_all(&document, SHARES_OUTSTANDING_LABEL)?
        .first()
        .copied()
        .ok_or_else(|| {
            SourceError::missing_field("no 'Shares outstanding' row on key statistics page")
        })?;

    let cells = row_cells(label, "td")?;
    let text = cells
        .last()
        .ok_or_else(|| SourceError::missing_field("'Shares outstanding' row has no cells"))?;
    parse_abbreviated_number(text)
}

fn parse_balance_sheet_row(html: &str, css: &str, title: &str) -> Result<f64, SourceError> {
    let document = Html::parse_document(html);
    let element = select_all(&document, css)?
        .first()
        .copied()
        .ok_or_else(|| SourceError::missing_field(format!("no '{title}' row on balance sheet")))?;

    let cells = row_cells(element, "span")?;
    let text = cells
        .get(1)
        .ok_or_else(|| SourceError::missing_field(format!("'{title}' row has no value")))?;
    Ok(parse_number(text)? * STATEMENT_SCALE)
}

fn select_all<'a>(document: &'a Html, css: &str) -> Result<Vec<ElementRef<'a>>, SourceError> {
    let selector = parse_selector(css)?;
    Ok(document.select(&selector).collect())
}

/// Text of every `cell` element under the row two levels above `element`.
fn row_cells(element: ElementRef<'_>, cell: &str) -> Result<Vec<String>, SourceError> {
    let row = element
        .parent()
        .and_then(|parent| parent.parent())
        .and_then(ElementRef::wrap)
        .ok_or_else(|| SourceError::missing_field("row element has no enclosing row"))?;

    let selector = parse_selector(cell)?;
    Ok(row
        .select(&selector)
        .map(|node| node.text().collect::<String>().trim().to_owned())
        .collect())
}

fn parse_selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css)
        .map_err(|error| SourceError::parse(format!("invalid selector '{css}': {error:?}")))
}

/// Parse a statement figure such as `-1,234,567.5`.
pub fn parse_number(text: &str) -> Result<f64, SourceError> {
    let cleaned: String = text
        .chars()
        .filter(|ch| *ch != ',' && !ch.is_whitespace())
        .collect();

    if cleaned.is_empty() || cleaned == "-" || cleaned == "--" {
        return Err(SourceError::parse(format!("no figure in '{text}'")));
    }

    let value = cleaned
        .parse::<f64>()
        .map_err(|_| SourceError::parse(format!("'{text}' is not a number")))?;
    if !value.is_finite() {
        return Err(SourceError::parse(format!("'{text}' is not a finite number")));
    }
    Ok(value)
}

/// Parse a figure with an optional magnitude suffix (`k`, `M`, `B`, `T`).
pub fn parse_abbreviated_number(text: &str) -> Result<f64, SourceError> {
    let trimmed = text.trim();
    let (digits, scale) = match trimmed.chars().last() {
        Some('k') | Some('K') => (&trimmed[..trimmed.len() - 1], 1e3),
        Some('M') => (&trimmed[..trimmed.len() - 1], 1e6),
        Some('B') => (&trimmed[..trimmed.len() - 1], 1e9),
        Some('T') => (&trimmed[..trimmed.len() - 1], 1e12),
        _ => (trimmed, 1.0),
    };
    Ok(parse_number(digits)? * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::StaticHttpClient;

    const CASH_FLOW: &str = r#"
        <html><body>
          <div class="chart"><div><span title="Free cash flow">Free cash flow</span></div></div>
          <div class="row">
            <div class="column"><span title="Free cash flow">Free cash flow</span><span>i</span></div>
            <div class="column"><span>300</span></div>
            <div class="column"><span>200</span></div>
            <div class="column"><span>100</span></div>
          </div>
        </body></html>
    "#;

    const BALANCE_SHEET: &str = r#"
        <div class="row">
          <div class="column"><span title="Total cash">Total cash</span></div>
          <div class="column"><span>1,500</span></div>
        </div>
        <div class="row">
          <div class="column"><span title="Total Debt">Total debt</span></div>
          <div class="column"><span>2,000</span></div>
        </div>
    "#;

    const KEY_STATISTICS: &str = r#"
        <table><tr>
          <td><span aria-label="'Shares outstanding' is taken from the most-recently filed quarterly or annual report, and 'market cap' is calculated using shares outstanding.">Shares outstanding</span> <sup>5</sup></td>
          <td>12.5B</td>
        </tr></table>
    "#;

    #[test]
    fn free_cash_flow_uses_statement_row_and_scales_thousands() {
        let values = parse_free_cash_flow(CASH_FLOW, 4).expect("parse");
        assert_eq!(values, vec![300_000.0, 200_000.0, 100_000.0]);
    }

    #[test]
    fn free_cash_flow_honours_requested_years() {
        let values = parse_free_cash_flow(CASH_FLOW, 2).expect("parse");
        assert_eq!(values, vec![300_000.0, 200_000.0]);
    }

    #[test]
    fn balance_sheet_rows_parse_with_separators() {
        assert_eq!(parse_total_cash(BALANCE_SHEET).expect("cash"), 1_500_000.0);
        assert_eq!(parse_total_debt(BALANCE_SHEET).expect("debt"), 2_000_000.0);
    }

    #[test]
    fn shares_outstanding_reads_last_cell_with_suffix() {
        let shares = parse_outstanding_shares(KEY_STATISTICS).expect("shares");
        assert!((shares - 12.5e9).abs() < 1.0);
    }

    #[test]
    fn missing_row_is_reported_as_missing_field() {
        let err = parse_total_debt("<html><body></body></html>").expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::MissingField);
    }

    #[test]
    fn placeholder_figures_are_parse_errors() {
        for text in ["--", "-", "", "N/A", "inf"] {
            let err = parse_number(text).expect_err("must fail");
            assert_eq!(err.kind(), SourceErrorKind::Parse, "input {text:?}");
        }
        assert_eq!(parse_number("-1,234.5").expect("negative"), -1234.5);
    }

    #[test]
    fn abbreviated_numbers_scale_by_suffix() {
        assert_eq!(parse_abbreviated_number("750k").expect("k"), 750_000.0);
        assert_eq!(parse_abbreviated_number("3.2M").expect("M"), 3_200_000.0);
        assert_eq!(parse_abbreviated_number("1.1T").expect("T"), 1.1e12);
        assert_eq!(parse_abbreviated_number("42").expect("plain"), 42.0);
    }

    #[tokio::test]
    async fn redirects_and_server_errors_fail_with_status_class() {
        let adapter = YahooAdapter::default();
        let symbol = Symbol::parse("GOOG").expect("symbol");
        let client = StaticHttpClient::new()
            .with_response(
                adapter.balance_sheet_url(&symbol),
                HttpResponse::with_status(302, ""),
            )
            .with_response(
                adapter.debt_balance_sheet_url(&symbol),
                HttpResponse::with_status(503, ""),
            );
        let adapter = YahooAdapter::with_http_client(Arc::new(client), ProviderConfig::default());

        let redirect = adapter.total_cash(&symbol).await.expect_err("3xx");
        let server = adapter.total_debt(&symbol).await.expect_err("5xx");

        assert_eq!(redirect.kind(), SourceErrorKind::UpstreamStatus);
        assert!(redirect.message().contains("3xx"));
        assert!(!redirect.retryable());
        assert!(server.message().contains("5xx"));
        assert!(server.retryable());
    }
}
