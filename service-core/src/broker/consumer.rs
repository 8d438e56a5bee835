use super::{BrokerError, BrokerSession};
use futures::{Stream, StreamExt};
use lapin::{options::BasicConsumeOptions, types::FieldTable};
use std::fmt::Display;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Background task draining a queue and logging every delivered body.
pub struct QueueListener {
    queue: String,
    shutdown: CancellationToken,
    handle: JoinHandle<u64>,
}

impl QueueListener {
    /// Start consuming the session's queue with automatic acknowledgement.
    pub async fn start(session: &BrokerSession, consumer_tag: &str) -> Result<Self, BrokerError> {
        let queue = session.queue().to_string();

        let consumer = session
            .channel()
            .basic_consume(
                &queue,
                consumer_tag,
                BasicConsumeOptions {
                    no_ack: true,
                    ..BasicConsumeOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|source| BrokerError::Consume {
                queue: queue.clone(),
                source,
            })?;

        let tag = consumer.tag();
        tracing::debug!(
            queue = %queue,
            consumer_tag = %tag.as_str(),
            "Queue listener started"
        );

        let shutdown = CancellationToken::new();
        let deliveries = consumer.map(|delivery| delivery.map(|delivery| delivery.data));
        let handle = tokio::spawn(drain(deliveries, shutdown.clone(), queue.clone()));

        Ok(Self {
            queue,
            shutdown,
            handle,
        })
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }

    /// Signal the listener and wait for it to finish; returns how many
    /// messages it received.
    pub async fn stop(self) -> u64 {
        self.shutdown.cancel();
        match self.handle.await {
            Ok(received) => received,
            Err(e) => {
                tracing::error!(queue = %self.queue, error = %e, "Queue listener task failed");
                0
            }
        }
    }
}

/// Drain `deliveries` until `shutdown` fires or the stream ends.
///
/// Delivery errors are logged and skipped. Returns the number of bodies received.
pub async fn drain<S, E>(deliveries: S, shutdown: CancellationToken, queue: String) -> u64
where
    S: Stream<Item = Result<Vec<u8>, E>>,
    E: Display,
{
    let mut deliveries = std::pin::pin!(deliveries);
    let mut received = 0u64;

    loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                tracing::warn!(queue = %queue, received, "Queue listener interrupted");
                break;
            }
            delivery = deliveries.next() => match delivery {
                Some(Ok(body)) => {
                    received += 1;
                    tracing::debug!(
                        queue = %queue,
                        bytes = body.len(),
                        message = %String::from_utf8_lossy(&body),
                        "Received message on broker"
                    );
                }
                Some(Err(e)) => {
                    tracing::warn!(queue = %queue, error = %e, "Failed to receive delivery");
                }
                None => {
                    tracing::info!(queue = %queue, received, "Delivery stream closed");
                    break;
                }
            }
        }
    }

    received
}
