//! Per-viewer identity tokens.
//!
//! A token is an opaque bearer string held by the client in the `uuid`
//! cookie. The server never validates, rotates or invalidates it.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Cookie carrying the identity token.
pub const IDENTITY_COOKIE: &str = "uuid";

/// Identity used when the client's cookie cannot be read.
pub const FALLBACK_IDENTITY: &str = "error";

/// Opaque per-viewer identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityToken(String);

impl IdentityToken {
    /// Length of freshly issued tokens.
    pub const LEN: usize = 16;

    /// Wrap a client-supplied value as-is.
    pub fn from_client(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The sentinel identity for unreadable cookies.
    pub fn fallback() -> Self {
        Self(FALLBACK_IDENTITY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of new identity tokens.
///
/// Implementations must be shareable across request tasks.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> IdentityToken;
}

/// Thread-local PRNG, one uniform draw from `[0-9a-zA-Z]` per character.
///
/// Not cryptographically secure; tokens only correlate pageviews.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> IdentityToken {
        let s: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(IdentityToken::LEN)
            .map(char::from)
            .collect();
        IdentityToken(s)
    }
}
