//! HTTP handlers for ping-service.

pub mod health;
pub mod ping;

pub use health::{health_check, readiness_check};
pub use ping::ping;
