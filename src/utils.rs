use unicode_width::UnicodeWidthChar;

use crate::InspectError;
use url::Url;

const SECURE_PREFIX: &str = "https://";
const INSECURE_PREFIX: &str = "http://";

/// Safely truncate a string, ensuring it is not truncated in the middle of multi-byte characters
///
/// The result never exceeds `max_width` display columns, ellipsis included.
#[cfg_attr(not(feature = "logging"), allow(dead_code))]
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);

        if current_width + char_width + 3 > max_width {
            break;
        }

        result.push(c);
        current_width += char_width;
    }

    result.push_str("...");
    result
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Trims the input and assumes `https://` when no http(s) scheme is given.
pub fn normalize_url(raw: &str) -> Result<String, InspectError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InspectError::InvalidUrl("empty URL".to_string()));
    }

    let normalized = if has_prefix_ignore_case(trimmed, SECURE_PREFIX)
        || has_prefix_ignore_case(trimmed, INSECURE_PREFIX)
    {
        trimmed.to_string()
    } else {
        format!("{SECURE_PREFIX}{trimmed}")
    };

    let _ = Url::parse(&normalized)?;
    Ok(normalized)
}

/// Prefix check for `https://`, ignoring ASCII case.
pub fn is_secure_transport(url: &str) -> bool {
    has_prefix_ignore_case(url, SECURE_PREFIX)
}

/// Host part of `url`, or the input itself when it does not parse.
pub fn hostname_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(String::from))
        .unwrap_or_else(|| url.to_string())
}
