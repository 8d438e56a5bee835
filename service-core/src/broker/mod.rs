//! AMQP broker plumbing shared by services that publish to or drain a queue.
//!
//! A [`BrokerSession`] owns one connection and the single channel opened on
//! it. Publishing goes through the [`MessagePublisher`] trait so handlers can
//! be exercised against [`MockPublisher`]; consuming is done by a
//! [`QueueListener`] running in the background until it is stopped.

mod consumer;
mod error;
mod publisher;
mod session;

pub use consumer::{QueueListener, drain};
pub use error::{BrokerError, UNPARSEABLE_URL, redact_credentials};
pub use publisher::{AmqpPublisher, MessagePublisher, MockPublisher, OutboundMessage};
pub use session::{BrokerConfig, BrokerSession, DEFAULT_BROKER_URL, DEFAULT_QUEUE};

/// The nameless direct exchange; routing keys address queues by name.
pub const DEFAULT_EXCHANGE: &str = "";
