use scraper::{Html, Selector};
use tracing::debug;

/// Thin query layer over a parsed HTML document.
///
/// Parsing never fails: malformed markup is repaired by the HTML5 tree builder,
/// so lookups on broken pages simply come back empty. Values are returned
/// exactly as written; only an empty string is reported as absent.
pub struct HtmlDocument {
    document: Html,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    fn selector(pattern: &str) -> Option<Selector> {
        match Selector::parse(pattern) {
            Ok(selector) => Some(selector),
            Err(e) => {
                debug!(selector = %pattern, error = ?e, "Ignoring invalid selector");
                None
            }
        }
    }

    /// Attribute of the first element matching `pattern`.
    pub fn attr(&self, pattern: &str, attribute: &str) -> Option<String> {
        let selector = Self::selector(pattern)?;

        self.document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(attribute))
            .and_then(non_empty)
    }

    /// Tries each pattern in order and returns the first non-empty attribute.
    /// Only the first element of each pattern is consulted.
    pub fn first_attr(&self, patterns: &[&str], attribute: &str) -> Option<String> {
        patterns
            .iter()
            .find_map(|pattern| self.attr(pattern, attribute))
    }

    pub fn meta_content(&self, patterns: &[&str]) -> Option<String> {
        self.first_attr(patterns, "content")
    }

    /// Text content of the first element matching `pattern`.
    pub fn text(&self, pattern: &str) -> Option<String> {
        let selector = Self::selector(pattern)?;

        self.document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
            .and_then(|text| non_empty(&text))
    }

    /// Raw text content of every element matching `pattern`, in document order.
    pub fn texts(&self, pattern: &str) -> Vec<String> {
        let Some(selector) = Self::selector(pattern) else {
            return Vec::new();
        };

        self.document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_attr_skips_empty_content() {
        let doc = HtmlDocument::parse(
            r#"<meta name="twitter:site" content=""><meta property="twitter:site" content="@rust">"#,
        );
        assert_eq!(
            doc.meta_content(&[r#"meta[name="twitter:site"]"#, r#"meta[property="twitter:site"]"#]),
            Some("@rust".to_string())
        );
    }

    #[test]
    fn test_only_first_element_per_selector() {
        let doc = HtmlDocument::parse(
            r#"<meta property="og:title" content=""><meta property="og:title" content="Second">"#,
        );
        assert_eq!(doc.meta_content(&[r#"meta[property="og:title"]"#]), None);
    }

    #[test]
    fn test_whitespace_values_are_kept_verbatim() {
        let doc = HtmlDocument::parse(
            r#"<title>
    Indented
  </title><meta name="viewport" content="  ">"#,
        );
        assert_eq!(doc.text("title"), Some("\n    Indented\n  ".to_string()));
        assert_eq!(doc.meta_content(&[r#"meta[name="viewport"]"#]), Some("  ".to_string()));
    }

    #[test]
    fn test_invalid_selector_is_absent() {
        let doc = HtmlDocument::parse("<title>x</title>");
        assert_eq!(doc.text("[[["), None);
        assert!(doc.texts("[[[").is_empty());
    }

    #[test]
    fn test_unclosed_markup_is_tolerated() {
        let doc = HtmlDocument::parse("<html><head><title>Broken<meta name=description content=ok");
        assert!(doc.text("title").is_some());
    }
}
