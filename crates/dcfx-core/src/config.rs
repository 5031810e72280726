//! Explicit configuration for fundamentals data sources.
//!
//! Request headers and endpoints are owned by a [`ProviderConfig`] value that
//! is handed to an adapter at construction time. Nothing here is global.

use std::collections::BTreeMap;

/// Browser identification sent by default; Yahoo rejects bare clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Host serving cash flow, total cash, and key statistics pages.
pub const DEFAULT_STATEMENTS_BASE_URL: &str = "https://uk.finance.yahoo.com";

/// Host serving the balance sheet page that carries total debt.
pub const DEFAULT_DEBT_BASE_URL: &str = "https://finance.yahoo.com";

/// Headers, timeout, and endpoints used by a scraping data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub headers: BTreeMap<String, String>,
    pub timeout_ms: u64,
    pub statements_base_url: String,
    pub debt_base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(String::from("user-agent"), String::from(DEFAULT_USER_AGENT));

        Self {
            headers,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            statements_base_url: String::from(DEFAULT_STATEMENTS_BASE_URL),
            debt_base_url: String::from(DEFAULT_DEBT_BASE_URL),
        }
    }
}

impl ProviderConfig {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Replace the whole header set.
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Point both page hosts somewhere else (mirrors, local fixtures).
    pub fn with_base_urls(
        mut self,
        statements_base_url: impl Into<String>,
        debt_base_url: impl Into<String>,
    ) -> Self {
        self.statements_base_url = trim_trailing_slash(statements_base_url.into());
        self.debt_base_url = trim_trailing_slash(debt_base_url.into());
        self
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.headers.get("user-agent").map(String::as_str)
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
