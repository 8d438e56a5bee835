//! HTTP handlers for relay-service.

pub mod health;
pub mod ping;
pub mod rabbit;

pub use health::{health_check, readiness_check};
pub use ping::ping;
pub use rabbit::publish_test_message;
