//! HTTP plumbing shared by handlers: identity cookie and AMP CORS headers.

pub mod amp_cors;
pub mod identity_cookie;
