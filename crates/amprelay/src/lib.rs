//! Top-level facade crate for amprelay.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use amprelay_core::*;
}

pub mod gateway {
    pub use amprelay_gateway::*;
}
