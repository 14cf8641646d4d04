use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Failed to parse URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch content: {0}")]
    FetchError(String),

    #[error("Request blocked by site: {status} - {message}")]
    BlockedError { status: u16, message: String },

    #[error("Request timeout: {0}")]
    TimeoutError(String),

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Failed to extract metadata: {0}")]
    ExtractionError(String),
}

impl InspectError {
    /// True for every failure that originates in HTML retrieval.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            InspectError::FetchError(_)
                | InspectError::BlockedError { .. }
                | InspectError::TimeoutError(_)
                | InspectError::InvalidContent(_)
        )
    }

    /// Stable, user-facing wording for the error.
    pub fn user_message(&self) -> &'static str {
        match self {
            InspectError::UrlParseError(_) | InspectError::InvalidUrl(_) => {
                "Please enter a valid URL."
            }
            InspectError::BlockedError { .. } => {
                "The site blocked the request. Try again later or check the page is public."
            }
            InspectError::FetchError(_)
            | InspectError::TimeoutError(_)
            | InspectError::InvalidContent(_) => {
                "Could not reach the site. It may be offline or temporarily unavailable."
            }
            InspectError::ExtractionError(_) => "The page returned an empty document.",
        }
    }

    pub fn log(&self) {
        match self {
            InspectError::UrlParseError(e) => {
                warn!(error = %e, "URL parsing failed");
            }
            InspectError::InvalidUrl(e) => {
                warn!(error = %e, "Invalid URL supplied");
            }
            InspectError::FetchError(e) => {
                error!(error = %e, "Content fetch failed");
            }
            InspectError::BlockedError { status, message } => {
                warn!(status = %status, error = %message, "Site blocked the request");
            }
            InspectError::TimeoutError(e) => {
                warn!(error = %e, "Request timed out");
            }
            InspectError::InvalidContent(e) => {
                warn!(error = %e, "Invalid content received");
            }
            InspectError::ExtractionError(e) => {
                error!(error = %e, "Metadata extraction failed");
            }
        }
    }
}
