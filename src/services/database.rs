use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Client as MongoClient, Collection, Database};
use std::sync::Mutex;

use crate::error::AppError;
use crate::models::ContactMessage;

/// Collection receiving contact-form submissions.
pub const CONTACT_COLLECTION: &str = "contactmessage";

/// Append-only access to the contact message store, plus the lightweight
/// introspection the diagnostic endpoints rely on.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn append(&self, message: &ContactMessage) -> Result<(), AppError>;
    async fn ping(&self) -> Result<(), AppError>;
    async fn list_collections(&self) -> Result<Vec<String>, AppError>;
}

#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    fn messages(&self) -> Collection<ContactMessage> {
        self.db.collection(CONTACT_COLLECTION)
    }
}

#[async_trait]
impl ContactStore for MongoStore {
    async fn append(&self, message: &ContactMessage) -> Result<(), AppError> {
        self.messages()
            .insert_one(message, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert contact message: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB ping failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn list_collections(&self) -> Result<Vec<String>, AppError> {
        self.db.list_collection_names(None).await.map_err(|e| {
            tracing::error!("Failed to list collections: {}", e);
            AppError::from(e)
        })
    }
}

/// In-memory store for tests. Records appended messages and can be switched
/// into a failing mode where every operation reports an outage.
pub struct MockStore {
    messages: Mutex<Vec<ContactMessage>>,
    fail: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A store whose every operation reports a connectivity failure.
    pub fn failing() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<ContactMessage> {
        self.messages.lock().expect("store mutex poisoned").clone()
    }

    pub fn append_count(&self) -> usize {
        self.messages.lock().expect("store mutex poisoned").len()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::PersistenceError(anyhow::anyhow!(
                "simulated store outage"
            )));
        }
        Ok(())
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for MockStore {
    async fn append(&self, message: &ContactMessage) -> Result<(), AppError> {
        self.check()?;
        self.messages
            .lock()
            .expect("store mutex poisoned")
            .push(message.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }

    async fn list_collections(&self) -> Result<Vec<String>, AppError> {
        self.check()?;
        Ok(vec![CONTACT_COLLECTION.to_string()])
    }
}
