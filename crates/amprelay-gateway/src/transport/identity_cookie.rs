//! Identity cookie read/write.

use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;

use amprelay_core::error::{AmpRelayError, Result};
use amprelay_core::identity::{IdentityToken, IDENTITY_COOKIE};

/// What the request's `Cookie` headers say about the identity cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityCookie {
    Missing,
    Present(IdentityToken),
    /// No usable identity cookie, and some `Cookie` header was not visible
    /// ASCII or carried the identity cookie with an empty value.
    Malformed,
}

pub fn read_identity_cookie(headers: &HeaderMap) -> IdentityCookie {
    let mut malformed = false;
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else {
            malformed = true;
            continue;
        };
        // Unparseable pairs belong to other cookies; skip them.
        for c in Cookie::split_parse(raw).filter_map(|c| c.ok()) {
            if c.name() != IDENTITY_COOKIE {
                continue;
            }
            if c.value().is_empty() {
                malformed = true;
                continue;
            }
            return IdentityCookie::Present(IdentityToken::from_client(c.value()));
        }
    }
    if malformed {
        IdentityCookie::Malformed
    } else {
        IdentityCookie::Missing
    }
}

/// `Set-Cookie` value for a newly issued token (no path/expiry attributes).
pub fn identity_set_cookie(token: &IdentityToken) -> Result<HeaderValue> {
    let c = Cookie::new(IDENTITY_COOKIE, token.as_str());
    HeaderValue::from_str(&c.to_string())
        .map_err(|e| AmpRelayError::Internal(format!("invalid identity cookie: {e}")))
}
