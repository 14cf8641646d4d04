use async_trait::async_trait;

mod analyzer;
mod dom;
mod error;
mod extractor;
mod fetcher;
#[cfg(feature = "logging")]
mod logging;
mod platform;
mod structured_data;
mod suggestions;
mod types;
mod utils;

pub use analyzer::MetaAnalyzer;
pub use dom::HtmlDocument;
pub use error::InspectError;
pub use extractor::{ExtractedMetadata, MetadataExtractor};
pub use fetcher::{FetchStrategy, Fetcher, FetcherConfig, DEFAULT_FETCH_TIMEOUT};
#[cfg(feature = "logging")]
pub use logging::{log_error_card, log_report_card, setup_logging, LogConfig};
pub use platform::{Platform, PlatformConfig, PlatformPreview, NO_TITLE_PLACEHOLDER};
pub use structured_data::parse_structured_data_types;
pub use suggestions::evaluate;
pub use types::{
    AnalysisReport, BasicMetaFields, Finding, OpenGraphFields, Severity, TechnicalSignals,
    TwitterCardFields,
};
pub use utils::{hostname_of, is_secure_transport, normalize_url};

/// A complete HTML payload handed back by a fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub html: String,
    /// Address the document was finally served from.
    pub final_url: String,
    /// `Some(true)` when the collaborator observed a redirect, `None` when it cannot tell.
    pub redirected: Option<bool>,
}

impl FetchedPage {
    pub fn new(html: impl Into<String>, final_url: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            final_url: final_url.into(),
            redirected: None,
        }
    }
}

/// Retrieves the HTML behind a URL. The analyzer issues exactly one `fetch`
/// per analysis and never retries.
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, InspectError>;
}
