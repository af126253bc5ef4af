use axum::extract::{FromRequestParts, Path, rejection::PathRejection};
use axum::http::request::Parts;
use tracing::debug;

use crate::error::SitekeepError;

/// `/{website_id}` segment, answering with the JSON envelope on bad input.
#[derive(Debug, Clone, Copy)]
pub struct WebsitePath(pub i64);

/// `/{website_id}/{id}` segments.
#[derive(Debug, Clone, Copy)]
pub struct RecordPath {
    pub website_id: i64,
    pub id: i64,
}

impl<S> FromRequestParts<S> for WebsitePath
where
    S: Send + Sync,
{
    type Rejection = SitekeepError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(website_id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection)?;
        Ok(Self(website_id))
    }
}

impl<S> FromRequestParts<S> for RecordPath
where
    S: Send + Sync,
{
    type Rejection = SitekeepError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((website_id, id)) = Path::<(i64, i64)>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection)?;
        Ok(Self { website_id, id })
    }
}

fn path_rejection(rejection: PathRejection) -> SitekeepError {
    debug!(reason = %rejection.body_text(), "rejected path parameters");
    SitekeepError::BadRequest("Invalid path parameter".to_string())
}
