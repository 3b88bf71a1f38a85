use crate::config::AppConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::{ContactStore, Mailer, MongoStore, SmtpMailer};
use axum::{
    routing::{get, post},
    Router,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared request state: the store and mailer behind trait objects so tests
/// can substitute in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
    pub mailer: Arc<dyn Mailer>,
}

/// The full HTTP surface with tracing and a permissive CORS policy, since the
/// portfolio frontend is served from a different origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/hello", get(handlers::hello))
        .route("/test", get(handlers::test_database))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/contact", post(handlers::submit_contact))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build against the real collaborators from configuration.
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn ContactStore> = Arc::new(
            MongoStore::connect(&config.database.url, &config.database.name)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to connect to MongoDB: {}", e);
                    e
                })?,
        );

        if !config.smtp.is_configured() {
            tracing::warn!("SMTP relay not configured; contact notifications disabled");
        }
        let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(config.smtp.clone()));

        Self::with_state(AppState { store, mailer }, config.port).await
    }

    /// Bind and assemble with pre-built collaborators. Port 0 asks the OS for
    /// a free port, which `port()` then reports.
    pub async fn with_state(state: AppState, port: u16) -> Result<Self, AppError> {
        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
