//! Request handlers for the relay's public endpoints.
//!
//! - `/config.json` : origin-checked `amp-analytics` config with identity cookie
//! - `/analytics`   : pageview sink

pub mod analytics;
pub mod config;

use std::borrow::Cow;

use axum::http::{header::AsHeaderName, HeaderMap};

/// Raw query pairs in request order; repeated keys are kept.
pub type QueryPairs = Vec<(String, String)>;

/// Header value as text; non-visible-ASCII values are treated as absent.
pub(crate) fn header_str<K: AsHeaderName>(headers: &HeaderMap, name: K) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Header value for any non-empty header, decoding opaque bytes lossily.
pub(crate) fn header_lossy<K: AsHeaderName>(headers: &HeaderMap, name: K) -> Option<Cow<'_, str>> {
    headers
        .get(name)
        .map(|v| v.as_bytes())
        .filter(|b| !b.is_empty())
        .map(String::from_utf8_lossy)
}

/// First value for `key`, like `url.Values.Get`.
pub(crate) fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}
