use relay_service::config::RelayConfig;
use relay_service::startup::{AppState, Application};
use service_core::broker::{BrokerConfig, MessagePublisher};
use service_core::config::Config as CoreConfig;
use service_core::tokio_util::sync::CancellationToken;
use std::sync::Arc;

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub port: u16,
    shutdown: CancellationToken,
}

impl TestApp {
    fn config() -> RelayConfig {
        RelayConfig {
            common: CoreConfig {
                port: 0,
                app_name: "wicwug".to_string(),
            },
            broker: BrokerConfig {
                enabled: false, // No broker in the test environment
                ..BrokerConfig::default()
            },
        }
    }

    /// Spawn the app with the broker disabled.
    pub async fn spawn() -> Self {
        let app = Application::build(Self::config())
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    /// Spawn the app with a stand-in publisher.
    pub async fn spawn_with_publisher(publisher: Arc<dyn MessagePublisher>) -> Self {
        let state = AppState {
            config: Self::config(),
            publisher: Some(publisher),
        };
        let app = Application::build_with_state(state)
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    async fn start(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);
        let shutdown = CancellationToken::new();

        let signal = shutdown.clone();
        tokio::spawn(async move {
            app.run_until(async move { signal.cancelled().await })
                .await
                .ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
