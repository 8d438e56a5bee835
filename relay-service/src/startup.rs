//! Application startup and lifecycle management.
//!
//! `Application::build` binds the HTTP listener and, when enabled, opens the
//! broker session and starts draining the queue in the background. Both are
//! torn down after the HTTP server stops.

use crate::config::RelayConfig;
use crate::handlers;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::broker::{
    AmqpPublisher, BrokerConfig, BrokerError, BrokerSession, MessagePublisher, QueueListener,
};
use service_core::error::AppError;
use service_core::middleware::{cors::cors_middleware, tracing::request_span};
use service_core::shutdown::shutdown_signal;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: RelayConfig,
    /// `None` when the broker is disabled or could not be reached at startup.
    pub publisher: Option<Arc<dyn MessagePublisher>>,
}

impl AppState {
    pub fn broker_connected(&self) -> bool {
        self.publisher
            .as_ref()
            .is_some_and(|publisher| publisher.is_connected())
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/ping", get(handlers::ping))
        .route("/rabbit/test", post(handlers::publish_test_message))
        .layer(from_fn(cors_middleware));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    session: Option<Arc<BrokerSession>>,
    queue_listener: Option<QueueListener>,
}

impl Application {
    /// Build the application, connecting to the broker when it is enabled.
    ///
    /// A broker that can't be reached is not fatal: the service starts
    /// without a session and the publish endpoint answers 502.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let (session, queue_listener) = if config.broker.enabled {
            match start_broker(&config.broker).await {
                Ok((session, listener)) => (Some(session), Some(listener)),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to start the listening channel");
                    (None, None)
                }
            }
        } else {
            tracing::info!("Broker disabled by configuration");
            (None, None)
        };

        let publisher = session
            .clone()
            .map(|session| Arc::new(AmqpPublisher::new(session)) as Arc<dyn MessagePublisher>);

        let state = AppState {
            config: config.clone(),
            publisher,
        };

        let mut app = Self::build_with_state(state).await?;
        app.session = session;
        app.queue_listener = queue_listener;
        Ok(app)
    }

    /// Build around a ready-made state, without touching the broker.
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        // Port 0 picks a random port for tests
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Relay service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
            session: None,
            queue_listener: None,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then stop the queue listener and close
    /// the broker session.
    pub async fn run_until<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let result = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await;

        if let Err(e) = &result {
            tracing::error!("HTTP server error: {}", e);
        }

        if let Some(listener) = self.queue_listener {
            let received = listener.stop().await;
            tracing::info!(received, "Queue listener stopped");
        }

        if let Some(session) = self.session {
            session.close().await;
        }

        result
    }
}

async fn start_broker(
    config: &BrokerConfig,
) -> Result<(Arc<BrokerSession>, QueueListener), BrokerError> {
    let session = Arc::new(BrokerSession::connect(config).await?);

    match QueueListener::start(&session, &config.consumer_tag).await {
        Ok(listener) => {
            tracing::debug!(queue = %listener.queue(), "Listening on broker queue");
            Ok((session, listener))
        }
        Err(e) => {
            session.close().await;
            Err(e)
        }
    }
}
