use super::{BrokerError, BrokerSession, DEFAULT_EXCHANGE};
use async_trait::async_trait;
use lapin::{BasicProperties, options::BasicPublishOptions};
use serde::Serialize;
use std::sync::{Arc, Mutex};

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub content_type: String,
    pub body: Vec<u8>,
}

impl OutboundMessage {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, BrokerError> {
        Ok(Self {
            content_type: JSON_CONTENT_TYPE.to_string(),
            body: serde_json::to_vec(value)?,
        })
    }
}

#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Publish on the default exchange; `routing_key` names the target queue.
    async fn publish(&self, routing_key: &str, message: OutboundMessage)
    -> Result<(), BrokerError>;
    fn is_connected(&self) -> bool;
}

pub struct AmqpPublisher {
    session: Arc<BrokerSession>,
}

impl AmqpPublisher {
    pub fn new(session: Arc<BrokerSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl MessagePublisher for AmqpPublisher {
    async fn publish(
        &self,
        routing_key: &str,
        message: OutboundMessage,
    ) -> Result<(), BrokerError> {
        if !self.session.is_connected() {
            return Err(BrokerError::NotConnected);
        }

        let publish_error = |source| BrokerError::Publish {
            routing_key: routing_key.to_string(),
            source,
        };

        let properties =
            BasicProperties::default().with_content_type(message.content_type.as_str().into());

        self.session
            .channel()
            .basic_publish(
                DEFAULT_EXCHANGE,
                routing_key,
                BasicPublishOptions::default(),
                &message.body,
                properties,
            )
            .await
            .map_err(publish_error)?
            .await
            .map_err(publish_error)?;

        tracing::debug!(
            routing_key = %routing_key,
            bytes = message.body.len(),
            "Published message to broker"
        );

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.session.is_connected()
    }
}

/// In-memory publisher for tests; records accepted messages.
pub struct MockPublisher {
    accept: bool,
    published: Mutex<Vec<(String, OutboundMessage)>>,
}

impl MockPublisher {
    pub fn new(accept: bool) -> Self {
        Self {
            accept,
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn published(&self) -> Vec<(String, OutboundMessage)> {
        self.published
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn publish_count(&self) -> usize {
        self.published
            .lock()
            .map(|messages| messages.len())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MessagePublisher for MockPublisher {
    async fn publish(
        &self,
        routing_key: &str,
        message: OutboundMessage,
    ) -> Result<(), BrokerError> {
        if !self.accept {
            return Err(BrokerError::Rejected(
                "Mock publisher is not accepting messages".to_string(),
            ));
        }

        tracing::info!(
            routing_key = %routing_key,
            bytes = message.body.len(),
            "[MOCK] Message would be published"
        );

        if let Ok(mut messages) = self.published.lock() {
            messages.push((routing_key.to_string(), message));
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.accept
    }
}
