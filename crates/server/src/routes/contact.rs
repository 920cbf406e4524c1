//! Contact form route handlers.
//!
//! The one public write endpoint. Input is normalized (trim, collapse
//! whitespace, cap length) before validation so stored rows are clean.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use sanad_core::{Email, MessageId, normalize_text};

use crate::db::{MessageRepository, NewMessage};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Field length caps, in characters.
const MAX_NAME_LEN: usize = 120;
const MAX_EMAIL_LEN: usize = 160;
const MAX_SERVICE_LEN: usize = 80;
const MAX_MESSAGE_LEN: usize = 2000;

/// Service category recorded when the form leaves it blank.
const DEFAULT_SERVICE: &str = "General";

/// Contact form submission body.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
}

/// Response for a stored submission.
#[derive(Debug, Serialize)]
pub struct ContactSubmitted {
    pub message: String,
    pub id: MessageId,
}

/// Submit a contact form message.
///
/// POST /api/contact
#[instrument(skip_all, fields(service = %form.service))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ContactSubmitted>> {
    let name = normalize_text(&form.name, MAX_NAME_LEN);
    let email = normalize_text(&form.email, MAX_EMAIL_LEN).to_lowercase();
    let service = normalize_text(&form.service, MAX_SERVICE_LEN);
    let service = if service.is_empty() {
        DEFAULT_SERVICE.to_owned()
    } else {
        service
    };
    let message = normalize_text(&form.message, MAX_MESSAGE_LEN);

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(AppError::Validation(
            "Please fill in all required fields.".to_owned(),
        ));
    }

    let email = Email::parse(&email).map_err(|_| {
        AppError::Validation("Please provide a valid email address.".to_owned())
    })?;

    let new = NewMessage {
        name,
        email: email.to_string(),
        service,
        message,
    };
    let id = MessageRepository::new(state.pool())
        .insert(&new)
        .await
        .map_err(|e| AppError::store("Failed to save message.", e))?;

    tracing::info!(message_id = %id, "Contact message stored");

    Ok(Json(ContactSubmitted {
        message: "Message sent successfully!".to_owned(),
        id,
    }))
}
