use crate::{FetchedPage, HtmlFetcher, InspectError};
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::{header::HeaderMap, Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};
use url::Url;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(8);
const DEFAULT_USER_AGENT: &str = "og_inspector/0.1.0";
const DEFAULT_MIN_HTML_LENGTH: usize = 100;
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const URL_PLACEHOLDER: &str = "{url}";

/// One way of reaching a page. All configured strategies are raced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Request the page itself.
    Direct,
    /// Request the page through a relay. `{url}` in the template is replaced
    /// by the form-encoded target address.
    Proxy { name: String, template: String },
}

impl FetchStrategy {
    pub fn proxy(name: impl Into<String>, template: impl Into<String>) -> Self {
        FetchStrategy::Proxy {
            name: name.into(),
            template: template.into(),
        }
    }

    fn name(&self) -> &str {
        match self {
            FetchStrategy::Direct => "direct",
            FetchStrategy::Proxy { name, .. } => name,
        }
    }

    fn request_url(&self, url: &str) -> String {
        match self {
            FetchStrategy::Direct => url.to_string(),
            FetchStrategy::Proxy { template, .. } => {
                let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
                template.replace(URL_PLACEHOLDER, &encoded)
            }
        }
    }
}

/// Configuration for [`Fetcher`].
///
/// # Examples
/// ```ignore
/// let fetcher = Fetcher::new_with_config(
///     FetcherConfig::default()
///         .with_timeout(Duration::from_secs(5))
///         .with_cors_proxies(),
/// )?;
/// ```
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub headers: Option<HeaderMap>,
    pub max_redirects: Option<usize>,
    /// Bodies shorter than this are not considered HTML.
    pub min_html_length: usize,
    pub strategies: Vec<FetchStrategy>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
            headers: None,
            max_redirects: None,
            min_html_length: DEFAULT_MIN_HTML_LENGTH,
            strategies: vec![FetchStrategy::Direct],
        }
    }
}

impl FetcherConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = Some(max_redirects);
        self
    }

    pub fn with_min_html_length(mut self, min_html_length: usize) -> Self {
        self.min_html_length = min_html_length;
        self
    }

    pub fn with_strategies(mut self, strategies: Vec<FetchStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Replaces the strategies with the public CORS relays used by
    /// browser-based inspectors.
    pub fn with_cors_proxies(self) -> Self {
        self.with_strategies(vec![
            FetchStrategy::proxy("codetabs", "https://api.codetabs.com/v1/proxy?quest={url}"),
            FetchStrategy::proxy("corsproxy", "https://corsproxy.io/?{url}"),
            FetchStrategy::proxy("allorigins", "https://api.allorigins.win/raw?url={url}"),
        ])
    }
}

/// HTML fetch collaborator backed by `reqwest`.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    strategies: Vec<FetchStrategy>,
    min_html_length: usize,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    pub fn new() -> Self {
        debug!("Fetcher initialized with default configuration");

        Self::new_with_config(FetcherConfig::default()).unwrap_or_else(|e| {
            error!(error = %e, "Failed to create HTTP client");
            panic!("Failed to initialize HTTP client: {}", e);
        })
    }

    pub fn new_with_config(config: FetcherConfig) -> Result<Self, InspectError> {
        let mut headers = config.headers.unwrap_or_default();
        if !headers.contains_key(reqwest::header::ACCEPT) {
            headers.insert(
                reqwest::header::ACCEPT,
                reqwest::header::HeaderValue::from_static(ACCEPT_HTML),
            );
        }

        let mut client_builder = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .default_headers(headers);

        if let Some(max_redirects) = config.max_redirects {
            client_builder = client_builder.redirect(reqwest::redirect::Policy::limited(max_redirects));
        }

        let client = client_builder
            .build()
            .map_err(|e| InspectError::FetchError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, config.strategies, config.min_html_length))
    }

    pub fn with_client(client: Client, strategies: Vec<FetchStrategy>, min_html_length: usize) -> Self {
        Self {
            client,
            strategies,
            min_html_length,
        }
    }

    fn is_plausible_html(&self, body: &str) -> bool {
        body.len() >= self.min_html_length && body.contains('<')
    }

    #[instrument(level = "debug", skip(self, strategy), fields(strategy = %strategy.name()), err)]
    async fn attempt(&self, strategy: &FetchStrategy, url: &str) -> Result<FetchedPage, InspectError> {
        let request_url = strategy.request_url(url);
        debug!(request_url = %request_url, "Starting fetch attempt");

        let response = self.client.get(&request_url).send().await.map_err(|e| {
            if e.is_timeout() {
                InspectError::TimeoutError(format!("{} timed out: {e}", strategy.name()))
            } else {
                InspectError::FetchError(format!("{} request failed: {e}", strategy.name()))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(strategy.name(), status));
        }

        let resolved = response.url().clone();
        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                InspectError::TimeoutError(format!("{} timed out reading body: {e}", strategy.name()))
            } else {
                InspectError::FetchError(format!("{} failed to read body: {e}", strategy.name()))
            }
        })?;

        if !self.is_plausible_html(&html) {
            return Err(InspectError::InvalidContent(format!(
                "{} returned {} bytes that do not look like HTML",
                strategy.name(),
                html.len()
            )));
        }

        debug!(content_length = html.len(), "Fetch attempt succeeded");
        Ok(match strategy {
            FetchStrategy::Direct => {
                let redirected = Url::parse(url).map(|requested| requested != resolved).ok();
                FetchedPage {
                    html,
                    final_url: resolved.to_string(),
                    redirected,
                }
            }
            FetchStrategy::Proxy { .. } => FetchedPage::new(html, url),
        })
    }
}

fn status_error(strategy: &str, status: StatusCode) -> InspectError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            InspectError::BlockedError {
                status: status.as_u16(),
                message: format!("{strategy} was refused with {status}"),
            }
        }
        _ => InspectError::FetchError(format!("{strategy} returned HTTP {}", status.as_u16())),
    }
}

/// Folds the failures of every attempt into the error reported to the caller.
fn combine_failures(url: &str, mut failures: Vec<InspectError>) -> InspectError {
    if failures.len() == 1 {
        return failures.remove(0);
    }
    if failures.is_empty() {
        return InspectError::FetchError(format!("no fetch strategy configured for {url}"));
    }

    if failures
        .iter()
        .all(|e| matches!(e, InspectError::BlockedError { .. }))
    {
        return failures.remove(0);
    }
    if failures
        .iter()
        .all(|e| matches!(e, InspectError::TimeoutError(_)))
    {
        return InspectError::TimeoutError(format!("every attempt for {url} timed out"));
    }

    let reasons = failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    InspectError::FetchError(format!(
        "Failed to fetch {url}. The site may be blocking requests or temporarily unavailable. ({reasons})"
    ))
}

#[async_trait]
impl HtmlFetcher for Fetcher {
    #[instrument(level = "debug", skip(self), err)]
    async fn fetch(&self, url: &str) -> Result<FetchedPage, InspectError> {
        let mut attempts: FuturesUnordered<_> = self
            .strategies
            .iter()
            .map(|strategy| self.attempt(strategy, url))
            .collect();

        let mut failures = Vec::new();
        while let Some(result) = attempts.next().await {
            match result {
                Ok(page) => {
                    debug!(final_url = %page.final_url, "Fetched page");
                    return Ok(page);
                }
                Err(e) => {
                    warn!(error = %e, "Fetch attempt failed");
                    failures.push(e);
                }
            }
        }

        Err(combine_failures(url, failures))
    }
}
