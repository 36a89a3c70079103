//! amprelay core: transport-agnostic primitives for the AMP analytics relay.
//!
//! This crate owns the origin verification rules, identity token issuance,
//! the per-request analytics record and the `amp-analytics` config document
//! template. It carries no HTTP or runtime dependencies; the gateway crate
//! feeds it plain header/query values and serves what it renders.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `AmpRelayError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod document;
pub mod error;
pub mod identity;
pub mod origin;
pub mod record;

/// Shared result type.
pub use error::{Result, AmpRelayError};
