//! service-core: Shared infrastructure for the wicwug microservice skeletons.
pub mod broker;
pub mod cli;
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod shutdown;

pub use axum;
pub use clap;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tokio_util;
pub use tower;
pub use tower_http;
pub use tracing;
