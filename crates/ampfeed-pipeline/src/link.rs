//! Tracking-URL rewriting
//!
//! Product links are rewritten into outbound tracking links: the source
//! URL's query string is discarded, the remaining URL is form-encoded, and
//! the encoded value is embedded twice into the advertiser's base template,
//! once as `cu` and once as `fbu`. Two downstream attribution consumers read
//! the two parameters independently, so the duplication is load-bearing.

use crate::error::RowEncodingError;
use serde::{Deserialize, Serialize};

/// Base tracking-URL template for one advertiser
///
/// The base carries the partner and campaign parameters; `cu` and `fbu` are
/// appended by [`TrackingTemplate::rewrite`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingTemplate {
    base: String,
}

impl TrackingTemplate {
    /// Create a template from a base URL
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// The base URL without `cu`/`fbu` parameters
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Rewrite a raw product URL into a tracking link
    ///
    /// Everything from the first `?` on is dropped, the rest is
    /// form-encoded, and the encoded value lands in both the `cu` and `fbu`
    /// parameters.
    pub fn rewrite(&self, raw_url: &str) -> Result<String, RowEncodingError> {
        let clean = raw_url.split('?').next().unwrap_or("");
        if let Some(byte) = clean.bytes().find(|b| b.is_ascii_control()) {
            return Err(RowEncodingError::new(
                raw_url,
                format!("control byte 0x{:02x} in URL", byte),
            ));
        }
        let encoded = form_encode(clean);
        Ok(format!("{}&cu={}&fbu={}", self.base, encoded, encoded))
    }

    /// The degraded link used when a row's URL cannot be encoded
    pub fn empty_link(&self) -> String {
        format!("{}&cu=&fbu=", self.base)
    }
}

/// Form-style percent-encoding: reserved bytes become `%XX`, spaces become
/// `+` (the encoding the attribution endpoints decode)
fn form_encode(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn template() -> TrackingTemplate {
        TrackingTemplate::new(
            "https://klarnashoppingads.ampxdirect.com/?partner=klarnashoppingads&ctaid=74894",
        )
    }

    #[test]
    fn test_rewrite_discards_query_and_doubles_encoding() {
        let out = template().rewrite("https://example.com/item?x=1").unwrap();
        let encoded = "https%3A%2F%2Fexample.com%2Fitem";
        assert!(out.contains(&format!("&cu={}", encoded)));
        assert!(out.contains(&format!("&fbu={}", encoded)));
        assert!(!out.contains("x=1"));
    }

    #[test]
    fn test_rewrite_is_deterministic() {
        let a = template().rewrite("https://example.com/a b").unwrap();
        let b = template().rewrite("https://example.com/a b").unwrap();
        assert_eq!(a, b);
        assert!(a.contains("a+b"));
    }

    #[test]
    fn test_rewrite_rejects_control_bytes() {
        let err = template().rewrite("https://example.com/\u{1}bad").unwrap_err();
        assert!(err.reason.contains("control byte"));
    }

    #[test]
    fn test_empty_link_shape() {
        let link = template().empty_link();
        assert!(link.ends_with("&cu=&fbu="));
    }

    #[test]
    fn test_rewrite_empty_input() {
        let out = template().rewrite("").unwrap();
        assert!(out.ends_with("&cu=&fbu="));
    }
}
