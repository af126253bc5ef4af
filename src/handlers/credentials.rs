//! Handlers shared by every credential resource. The resource is carried by
//! the router state, so `/api/ftp` and `/api/database` run the same code.

use axum::{Json, extract::State, http::StatusCode};
use tracing::{error, info};

use crate::error::SitekeepError;
use crate::middleware::{CredentialForm, RecordPath, WebsitePath};
use crate::router::ResourceState;
use crate::types::envelope::ApiEnvelope;

/// GET /api/{resource}/{website_id}
pub async fn list_handler(
    State(state): State<ResourceState>,
    WebsitePath(website_id): WebsitePath,
) -> Result<Json<ApiEnvelope>, SitekeepError> {
    ensure_website(&state, website_id).await?;
    let records = state
        .credentials
        .list(website_id)
        .await
        .inspect_err(|e| log_failure(&state, "listing", website_id, None, e))?;
    Ok(Json(ApiEnvelope::records(records)))
}

/// GET /api/{resource}/{website_id}/{id}
pub async fn details_handler(
    State(state): State<ResourceState>,
    RecordPath { website_id, id }: RecordPath,
) -> Result<Json<ApiEnvelope>, SitekeepError> {
    ensure_website(&state, website_id).await?;
    let record = state
        .credentials
        .details(id, Some(website_id))
        .await
        .inspect_err(|e| log_failure(&state, "showing", website_id, Some(id), e))?
        .ok_or(SitekeepError::RecordNotFound(state.resource()))?;
    Ok(Json(ApiEnvelope::record(record)))
}

/// POST /api/{resource}/{website_id}
pub async fn add_handler(
    State(state): State<ResourceState>,
    WebsitePath(website_id): WebsitePath,
    CredentialForm(input): CredentialForm,
) -> Result<(StatusCode, Json<ApiEnvelope>), SitekeepError> {
    ensure_website(&state, website_id).await?;
    let record = state
        .credentials
        .add(website_id, &input)
        .await
        .inspect_err(|e| log_failure(&state, "adding", website_id, None, e))?;

    info!(
        resource = %state.resource(),
        website_id,
        id = record.id,
        "credential added"
    );
    let message = state.resource().added_message();
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::record(record).with_message(message)),
    ))
}

/// PUT /api/{resource}/{website_id}/{id}
pub async fn update_handler(
    State(state): State<ResourceState>,
    RecordPath { website_id, id }: RecordPath,
    CredentialForm(input): CredentialForm,
) -> Result<Json<ApiEnvelope>, SitekeepError> {
    ensure_website(&state, website_id).await?;
    let record = state
        .credentials
        .update(id, website_id, &input)
        .await
        .inspect_err(|e| log_failure(&state, "updating", website_id, Some(id), e))?;

    info!(resource = %state.resource(), website_id, id, "credential updated");
    let message = state.resource().updated_message();
    Ok(Json(ApiEnvelope::record(record).with_message(message)))
}

/// DELETE /api/{resource}/{website_id}/{id}
pub async fn delete_handler(
    State(state): State<ResourceState>,
    RecordPath { website_id, id }: RecordPath,
) -> Result<StatusCode, SitekeepError> {
    ensure_website(&state, website_id).await?;
    state
        .credentials
        .details(id, Some(website_id))
        .await
        .inspect_err(|e| log_failure(&state, "deleting", website_id, Some(id), e))?
        .ok_or(SitekeepError::RecordNotFound(state.resource()))?;
    state
        .credentials
        .delete(id)
        .await
        .inspect_err(|e| log_failure(&state, "deleting", website_id, Some(id), e))?;

    info!(resource = %state.resource(), website_id, id, "credential deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_website(state: &ResourceState, website_id: i64) -> Result<(), SitekeepError> {
    let exists = state
        .websites
        .exists(website_id)
        .await
        .inspect_err(|e| log_failure(state, "resolving website for", website_id, None, e))?;
    if exists {
        Ok(())
    } else {
        Err(SitekeepError::WebsiteNotFound)
    }
}

fn log_failure(
    state: &ResourceState,
    action: &str,
    website_id: i64,
    id: Option<i64>,
    err: &SitekeepError,
) {
    if err.is_internal() {
        error!(
            resource = %state.resource(),
            website_id,
            id,
            error = %err,
            "error {action} credential"
        );
    }
}
