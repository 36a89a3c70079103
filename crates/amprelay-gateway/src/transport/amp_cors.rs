//! AMP CORS response headers.
//!
//! See <https://amp.dev/documentation/guides-and-tutorials/learn/amp-caches-and-cors/amp-cors-requests>.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

use amprelay_core::error::{AmpRelayError, Result};

pub const AMP_ALLOW_SOURCE_ORIGIN: HeaderName =
    HeaderName::from_static("amp-access-control-allow-source-origin");

/// Headers granting the AMP cache credentialed access and echoing the
/// verified source origin.
pub fn apply(headers: &mut HeaderMap, amp_cache_origin: &str, source_origin: &str) -> Result<()> {
    let value = |v: &str| {
        HeaderValue::from_str(v)
            .map_err(|e| AmpRelayError::Internal(format!("invalid header value {v:?}: {e}")))
    };

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value(amp_cache_origin)?);
    headers.insert(AMP_ALLOW_SOURCE_ORIGIN, value(source_origin)?);
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("AMP-Access-Control-Allow-Source-Origin"),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_all_four_headers() {
        let mut h = HeaderMap::new();
        assert!(apply(&mut h, "https://cdn.ampproject.org", "http://demo.ymotongpoo.com").is_ok());

        let get = |k: &str| h.get(k).and_then(|v| v.to_str().ok());
        assert_eq!(get("access-control-allow-credentials"), Some("true"));
        assert_eq!(get("access-control-allow-origin"), Some("https://cdn.ampproject.org"));
        assert_eq!(get("amp-access-control-allow-source-origin"), Some("http://demo.ymotongpoo.com"));
        assert_eq!(
            get("access-control-expose-headers"),
            Some("AMP-Access-Control-Allow-Source-Origin")
        );
    }
}
