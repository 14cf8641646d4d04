use crate::dom::HtmlDocument;
use crate::structured_data::parse_structured_data_types;
use crate::types::{BasicMetaFields, OpenGraphFields, TechnicalSignals, TwitterCardFields};
use crate::utils::is_secure_transport;
use crate::InspectError;
use tracing::debug;

const LD_JSON_SELECTOR: &str = r#"script[type="application/ld+json"]"#;
const FAVICON_SELECTOR: &str = r#"link[rel="icon"], link[rel="shortcut icon"]"#;
const CANONICAL_SELECTOR: &str = r#"link[rel="canonical"]"#;
const CHARSET_SELECTOR: &str = "meta[charset]";

/// The four field groups read from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMetadata {
    pub open_graph: OpenGraphFields,
    pub twitter: TwitterCardFields,
    pub meta: BasicMetaFields,
    pub technical: TechnicalSignals,
}

/// Metadata extractor, responsible for reading social and technical tags from a page
#[derive(Clone)]
pub struct MetadataExtractor;

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parses `html` and reads every field group. `url` is the address the
    /// document was requested from and only drives the HTTPS check.
    pub fn extract(&self, html: &str, url: &str) -> Result<ExtractedMetadata, InspectError> {
        if html.trim().is_empty() {
            return Err(InspectError::ExtractionError(format!(
                "empty document received for {url}"
            )));
        }

        let document = HtmlDocument::parse(html);
        let metadata = ExtractedMetadata {
            open_graph: self.extract_open_graph(&document),
            twitter: self.extract_twitter_card(&document),
            meta: self.extract_basic_meta(&document),
            technical: self.extract_technical(&document, url),
        };

        debug!(
            url = %url,
            og_title = ?metadata.open_graph.title,
            twitter_card = ?metadata.twitter.card,
            structured_data = ?metadata.technical.structured_data_types,
            "Metadata extracted"
        );
        Ok(metadata)
    }

    fn extract_open_graph(&self, document: &HtmlDocument) -> OpenGraphFields {
        let og = |property: &str| {
            let selector = format!(r#"meta[property="og:{property}"]"#);
            document.meta_content(&[selector.as_str()])
        };

        OpenGraphFields {
            title: og("title"),
            description: og("description"),
            image: og("image"),
            image_width: og("image:width"),
            image_height: og("image:height"),
            image_alt: og("image:alt"),
            url: og("url"),
            content_type: og("type"),
            site_name: og("site_name"),
            locale: og("locale"),
        }
    }

    fn extract_twitter_card(&self, document: &HtmlDocument) -> TwitterCardFields {
        // Some sites publish twitter:* under `property` like Open Graph does.
        let twitter = |name: &str| {
            let by_name = format!(r#"meta[name="twitter:{name}"]"#);
            let by_property = format!(r#"meta[property="twitter:{name}"]"#);
            document.meta_content(&[by_name.as_str(), by_property.as_str()])
        };

        TwitterCardFields {
            card: twitter("card"),
            title: twitter("title"),
            description: twitter("description"),
            image: twitter("image"),
            image_alt: twitter("image:alt"),
            site: twitter("site"),
            creator: twitter("creator"),
        }
    }

    fn extract_basic_meta(&self, document: &HtmlDocument) -> BasicMetaFields {
        let named = |name: &str| {
            let selector = format!(r#"meta[name="{name}"]"#);
            document.meta_content(&[selector.as_str()])
        };

        BasicMetaFields {
            title: document.text("title"),
            description: named("description"),
            canonical: document.attr(CANONICAL_SELECTOR, "href"),
            robots: named("robots"),
            author: named("author"),
            keywords: named("keywords"),
            viewport: named("viewport"),
            charset: document.attr(CHARSET_SELECTOR, "charset"),
            theme_color: named("theme-color"),
        }
    }

    fn extract_technical(&self, document: &HtmlDocument, url: &str) -> TechnicalSignals {
        let blocks = document.texts(LD_JSON_SELECTOR);

        let mut structured_data_types = Vec::new();
        for (index, block) in blocks.iter().enumerate() {
            match parse_structured_data_types(block) {
                Ok(types) => structured_data_types.extend(types),
                Err(e) => {
                    debug!(block = index, error = %e, "Skipping malformed JSON-LD block");
                }
            }
        }

        TechnicalSignals {
            favicon: document.attr(FAVICON_SELECTOR, "href"),
            charset: document.attr(CHARSET_SELECTOR, "charset"),
            viewport: document.meta_content(&[r#"meta[name="viewport"]"#]),
            is_https: is_secure_transport(url),
            has_redirect: None,
            has_structured_data: !blocks.is_empty(),
            structured_data_types,
        }
    }
}
