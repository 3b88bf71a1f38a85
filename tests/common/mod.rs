use portfolio_backend::services::{MockMailer, MockStore};
use portfolio_backend::startup::{AppState, Application};
use std::sync::Arc;
use std::time::Duration;

/// A running application instance backed by in-memory doubles, so the HTTP
/// surface can be driven without MongoDB or an SMTP relay. Handles into the
/// doubles stay available for asserting on side effects.
pub struct TestApp {
    pub address: String,
    pub store: Arc<MockStore>,
    pub mailer: Arc<MockMailer>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(MockStore::new(), MockMailer::new()).await
    }

    pub async fn spawn_with(store: MockStore, mailer: MockMailer) -> Self {
        let store = Arc::new(store);
        let mailer = Arc::new(mailer);

        let state = AppState {
            store: store.clone(),
            mailer: mailer.clone(),
        };

        let app = Application::with_state(state, 0)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait until the server accepts connections.
        let client = reqwest::Client::new();
        let probe = format!("{}/metrics", address);
        for _ in 0..50 {
            if client.get(&probe).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            store,
            mailer,
        }
    }
}
