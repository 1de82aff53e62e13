//! Public lead intake: contact form, career applications, WhatsApp widget.

use crate::error::ApiResult;
use crate::handlers::common::require_field;
use crate::metrics;
use crate::state::AppState;
use atelier_metadata::models::{CareerApplicationRow, ContactMessageRow, WhatsappLeadRow};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct LeadAccepted {
    pub status: &'static str,
}

fn accepted() -> (StatusCode, Json<LeadAccepted>) {
    (StatusCode::CREATED, Json(LeadAccepted { status: "received" }))
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub message: String,
}

/// POST /v1/leads/contact - Contact-form submission.
pub async fn create_contact_message(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> ApiResult<(StatusCode, Json<LeadAccepted>)> {
    require_field(&request.name, "name")?;
    require_field(&request.phone, "phone")?;
    require_field(&request.message, "message")?;

    let row = ContactMessageRow {
        message_id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        email: request.email,
        phone: request.phone.trim().to_string(),
        message: request.message.trim().to_string(),
        created_at: OffsetDateTime::now_utc(),
    };
    state.metadata.create_contact_message(&row).await?;

    metrics::LEADS_RECEIVED.inc();
    Ok(accepted())
}

#[derive(Debug, Deserialize)]
pub struct CareerRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub message: Option<String>,
}

/// POST /v1/leads/careers - Career application.
pub async fn create_career_application(
    State(state): State<AppState>,
    Json(request): Json<CareerRequest>,
) -> ApiResult<(StatusCode, Json<LeadAccepted>)> {
    require_field(&request.name, "name")?;
    require_field(&request.email, "email")?;
    require_field(&request.phone, "phone")?;
    require_field(&request.position, "position")?;

    let row = CareerApplicationRow {
        application_id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        phone: request.phone.trim().to_string(),
        position: request.position.trim().to_string(),
        message: request.message,
        created_at: OffsetDateTime::now_utc(),
    };
    state.metadata.create_career_application(&row).await?;

    metrics::LEADS_RECEIVED.inc();
    Ok(accepted())
}

#[derive(Debug, Deserialize)]
pub struct WhatsappRequest {
    pub country_code: String,
    pub phone: String,
}

/// POST /v1/leads/whatsapp - WhatsApp subscription widget.
///
/// Resubmitting the same number is accepted and ignored by the store, so
/// the widget can fire on every page load without creating duplicates.
pub async fn create_whatsapp_lead(
    State(state): State<AppState>,
    Json(request): Json<WhatsappRequest>,
) -> ApiResult<(StatusCode, Json<LeadAccepted>)> {
    require_field(&request.country_code, "country_code")?;
    require_field(&request.phone, "phone")?;

    let row = WhatsappLeadRow {
        lead_id: Uuid::new_v4(),
        country_code: request.country_code.trim().to_string(),
        phone: request.phone.trim().to_string(),
        created_at: OffsetDateTime::now_utc(),
    };
    state.metadata.create_whatsapp_lead(&row).await?;

    metrics::LEADS_RECEIVED.inc();
    Ok(accepted())
}
