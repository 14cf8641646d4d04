use crate::suggestions::evaluate;
use crate::utils::normalize_url;
use crate::{AnalysisReport, Fetcher, HtmlFetcher, InspectError, MetadataExtractor};
use tracing::{debug, instrument};

/// Turns a URL into an [`AnalysisReport`]: normalize, fetch once, extract,
/// evaluate. Holds no per-request state, so one analyzer can serve any
/// number of independent analyses.
#[derive(Clone)]
pub struct MetaAnalyzer<F = Fetcher> {
    pub fetcher: F,
    extractor: MetadataExtractor,
}

impl MetaAnalyzer<Fetcher> {
    pub fn new() -> Self {
        Self::with_fetcher(Fetcher::new())
    }
}

impl Default for MetaAnalyzer<Fetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: HtmlFetcher> MetaAnalyzer<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            extractor: MetadataExtractor::new(),
        }
    }

    #[instrument(level = "debug", skip(self), err)]
    pub async fn analyze(&self, raw_url: &str) -> Result<AnalysisReport, InspectError> {
        let url = normalize_url(raw_url)?;
        debug!(url = %url, "Analyzing URL");

        let page = self.fetcher.fetch(&url).await?;

        let mut report = self.build_report(page.html, &url, page.final_url)?;
        report.technical.has_redirect = page.redirected;
        Ok(report)
    }

    /// Analyzes HTML that is already in hand. `url` is taken as both the
    /// requested and the final address.
    pub fn analyze_html(&self, html: &str, url: &str) -> Result<AnalysisReport, InspectError> {
        self.build_report(html.to_string(), url, url.to_string())
    }

    fn build_report(
        &self,
        html: String,
        url: &str,
        final_url: String,
    ) -> Result<AnalysisReport, InspectError> {
        let metadata = self.extractor.extract(&html, url)?;
        let findings = evaluate(
            &metadata.open_graph,
            &metadata.twitter,
            &metadata.meta,
            &metadata.technical,
        );
        debug!(url = %url, findings = findings.len(), "Suggestions evaluated");

        Ok(AnalysisReport {
            url: url.to_string(),
            final_url,
            open_graph: metadata.open_graph,
            twitter: metadata.twitter,
            meta: metadata.meta,
            technical: metadata.technical,
            findings,
            raw_html: html,
        })
    }
}
