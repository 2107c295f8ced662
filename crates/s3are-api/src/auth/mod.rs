//! Trusted-header authentication
//!
//! The service sits behind a gateway that authenticates callers and forwards
//! their identity in a single header. Nothing here verifies credentials.

pub mod middleware;
pub mod models;

pub use middleware::{consumer_middleware, identify, AuthState};
pub use models::Consumer;
