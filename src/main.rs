use portfolio_backend::config::AppConfig;
use portfolio_backend::observability::init_tracing;
use portfolio_backend::services::init_metrics;
use portfolio_backend::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Recorder first: counters touched before installation are lost.
    init_metrics();
    init_tracing("info");

    let config = AppConfig::load();

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
