use crate::types::{
    BasicMetaFields, Finding, OpenGraphFields, Severity, TechnicalSignals, TwitterCardFields,
};

/// Lengths are measured in UTF-16 code units, the unit search engines and
/// browsers report, so an emoji counts as two.
pub const MAX_TITLE_LENGTH: usize = 60;
pub const MAX_DESCRIPTION_LENGTH: usize = 160;

/// Runs every metadata rule in a fixed order and collects the findings.
///
/// Rules never short-circuit each other, so the output order is always:
/// title, meta description, og:title, og:description, og:image (or its
/// dimensions), twitter:card, viewport, HTTPS.
pub fn evaluate(
    og: &OpenGraphFields,
    twitter: &TwitterCardFields,
    meta: &BasicMetaFields,
    technical: &TechnicalSignals,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    match meta.title.as_deref() {
        None => findings.push(Finding::new(
            "title",
            Severity::Missing,
            "Missing page title",
            "Critical for SEO and browser tabs",
        )),
        Some(title) => {
            let length = utf16_len(title);
            if length > MAX_TITLE_LENGTH {
                findings.push(Finding::new(
                    "title",
                    Severity::Suboptimal,
                    format!("Title is {length} characters (recommended: under {MAX_TITLE_LENGTH})"),
                    "May be truncated in search results",
                ));
            }
        }
    }

    match meta.description.as_deref() {
        None => findings.push(Finding::new(
            "meta description",
            Severity::Missing,
            "Missing meta description",
            "Search engines may generate their own snippet",
        )),
        Some(description) => {
            let length = utf16_len(description);
            if length > MAX_DESCRIPTION_LENGTH {
                findings.push(Finding::new(
                    "meta description",
                    Severity::Suboptimal,
                    format!(
                        "Description is {length} characters (recommended: under {MAX_DESCRIPTION_LENGTH})"
                    ),
                    "May be truncated in search results",
                ));
            }
        }
    }

    if og.title.is_none() {
        findings.push(Finding::new(
            "og:title",
            Severity::Missing,
            "Missing og:title",
            "Social platforms will use page title as fallback",
        ));
    }

    if og.description.is_none() {
        findings.push(Finding::new(
            "og:description",
            Severity::Missing,
            "Missing og:description",
            "Social previews may lack context",
        ));
    }

    if og.image.is_none() {
        findings.push(Finding::new(
            "og:image",
            Severity::Missing,
            "Missing og:image",
            "No image in social previews significantly reduces engagement",
        ));
    } else if og.image_width.is_none() || og.image_height.is_none() {
        findings.push(Finding::new(
            "og:image:width/height",
            Severity::Suboptimal,
            "Missing og:image:width and og:image:height",
            "Platforms may render image incorrectly initially",
        ));
    }

    if twitter.card.is_none() {
        findings.push(Finding::new(
            "twitter:card",
            Severity::Missing,
            "Missing twitter:card",
            "Twitter may not display rich preview",
        ));
    }

    if technical.viewport.is_none() {
        findings.push(Finding::new(
            "viewport",
            Severity::Missing,
            "Missing viewport meta tag",
            "Page may not be mobile-friendly",
        ));
    }

    if !technical.is_https {
        findings.push(Finding::new(
            "HTTPS",
            Severity::Suboptimal,
            "Site is not using HTTPS",
            "Security warning in browsers, SEO penalty",
        ));
    }

    findings
}

fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}
