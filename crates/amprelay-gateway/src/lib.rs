//! amprelay gateway library entry.
//!
//! Wires config loading, origin verification, identity cookies and the
//! config/analytics handlers into an axum service. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;
