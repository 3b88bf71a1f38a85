use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A contact-form submission as stored in the `contactmessage` collection.
///
/// `subject` carries no skip attribute on purpose: an omitted subject is
/// persisted as an explicit null so stored documents always have the same
/// shape. Subject defaulting happens at notification time, never at rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_utc: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(name: String, email: String, subject: Option<String>, message: String) -> Self {
        Self {
            id: None,
            name,
            email,
            subject,
            message,
            created_utc: Utc::now(),
        }
    }
}
