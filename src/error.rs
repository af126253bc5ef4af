use axum::{Json, http::StatusCode, response::IntoResponse};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::service::validator::ValidationErrors;
use crate::types::envelope::ApiEnvelope;
use crate::types::resource::Resource;

#[derive(Debug, ThisError)]
pub enum SitekeepError {
    #[error("Website not found")]
    WebsiteNotFound,

    #[error("{}", .0.not_found_message())]
    RecordNotFound(Resource),

    #[error("Data is invalid")]
    Validation(ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SitekeepError {
    pub fn status(&self) -> StatusCode {
        match self {
            SitekeepError::WebsiteNotFound | SitekeepError::RecordNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            SitekeepError::Validation(_) | SitekeepError::BadRequest(_) => StatusCode::BAD_REQUEST,
            SitekeepError::DatabaseError(_)
            | SitekeepError::ConfigError(_)
            | SitekeepError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Failures the caller cannot fix; these are logged at error level.
    pub fn is_internal(&self) -> bool {
        self.status().is_server_error()
    }
}

impl From<figment::Error> for SitekeepError {
    fn from(e: figment::Error) -> Self {
        SitekeepError::ConfigError(Box::new(e))
    }
}

impl IntoResponse for SitekeepError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = self.to_string();
        let body = match self {
            SitekeepError::Validation(errors) => ApiEnvelope::failure(message).with_errors(errors),
            _ => ApiEnvelope::failure(message),
        };
        (status, Json(body)).into_response()
    }
}
