use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::startup::AppState;

/// Collections reported by /test before the listing is cut off.
const MAX_REPORTED_COLLECTIONS: usize = 10;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello from the Rust backend!" }))
}

pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello from the backend API!" }))
}

#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Connectivity self-check for the deployed stack.
///
/// Always answers 200 with the same envelope; a broken store only degrades
/// the `database` field. Error text is capped, so a misbehaving driver can
/// neither fail this endpoint nor flood its response.
pub async fn test_database(State(state): State<AppState>) -> Json<DatabaseStatus> {
    let (database, collections) = match state.store.list_collections().await {
        Ok(names) => (
            "✅ Connected & Working".to_string(),
            names
                .into_iter()
                .take(MAX_REPORTED_COLLECTIONS)
                .collect::<Vec<_>>(),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Store introspection failed");
            (
                format!("⚠️ Connected but Error: {}", e.detail()),
                Vec::new(),
            )
        }
    };

    Json(DatabaseStatus {
        backend: "✅ Running".to_string(),
        database,
        database_url: env_presence("DATABASE_URL"),
        database_name: env_presence("DATABASE_NAME"),
        connection_status: "Connected".to_string(),
        collections,
    })
}

/// Reports whether `key` is exported without echoing its value.
fn env_presence(key: &str) -> String {
    if std::env::var(key).is_ok() {
        "✅ Set".to_string()
    } else {
        "❌ Not Set".to_string()
    }
}
