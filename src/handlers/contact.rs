use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::models::ContactMessage;
use crate::services::{ContactEmail, MailerError};
use crate::startup::AppState;

/// Subject substituted at submission time when the form left it blank.
const FALLBACK_SUBJECT: &str = "Portfolio Contact";

#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub subject: Option<String>,
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub ok: bool,
    pub email_sent: bool,
}

/// Accept a contact-form submission: validate, persist, then notify.
///
/// Persistence failures abort the request. Notification failures only flip
/// `email_sent` to false; a submission that is already stored must never be
/// reported as failed because the relay is down.
#[tracing::instrument(skip(state, request))]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    request.validate()?;

    // The stored subject stays exactly as submitted. Null and empty string are
    // preserved at rest; defaulting is a notification-only concern.
    let message = ContactMessage::new(
        request.name.clone(),
        request.email.clone(),
        request.subject.clone(),
        request.message.clone(),
    );
    state.store.append(&message).await?;

    let email = ContactEmail {
        sender_name: request.name,
        sender_email: request.email,
        subject: Some(
            request
                .subject
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| FALLBACK_SUBJECT.to_string()),
        ),
        message: request.message,
    };

    let email_sent = match state.mailer.send(&email).await {
        Ok(()) => true,
        Err(MailerError::NotConfigured) => {
            tracing::info!("SMTP relay not configured, skipping contact notification");
            false
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to send contact notification");
            false
        }
    };

    metrics::counter!(
        "contact_submissions_total",
        "email" => if email_sent { "sent" } else { "unsent" }
    )
    .increment(1);

    Ok(Json(ContactResponse {
        ok: true,
        email_sent,
    }))
}
