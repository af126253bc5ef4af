use axum::{
    Form, Json,
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{HeaderMap, header::CONTENT_TYPE},
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::db::models::CredentialInput;
use crate::error::SitekeepError;

/// Credential fields from a request body.
///
/// Form-encoded bodies are the primary format; `application/json` objects
/// are accepted as well. Scalars are taken as text, `null` means "not sent".
/// An empty body without a form content type carries no fields.
#[derive(Debug)]
pub struct CredentialForm(pub CredentialInput);

impl<S> FromRequest<S> for CredentialForm
where
    S: Send + Sync,
{
    type Rejection = SitekeepError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if content_type_is(req.headers(), "application/json") {
            let Json(body) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|rejection| SitekeepError::BadRequest(rejection.body_text()))?;
            return json_to_input(body).map(Self);
        }

        let req = if content_type_is(req.headers(), FORM_CONTENT_TYPE) {
            req
        } else {
            let (parts, body) = req.into_parts();
            let bytes = Bytes::from_request(Request::from_parts(parts.clone(), body), state)
                .await
                .map_err(|rejection| SitekeepError::BadRequest(rejection.body_text()))?;
            if bytes.is_empty() {
                return Ok(Self(CredentialInput::default()));
            }
            Request::from_parts(parts, Body::from(bytes))
        };

        let Form(body) = Form::<BTreeMap<String, String>>::from_request(req, state)
            .await
            .map_err(|rejection| SitekeepError::BadRequest(rejection.body_text()))?;
        Ok(Self(CredentialInput(body)))
    }
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn content_type_is(headers: &HeaderMap, mime: &str) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with(mime))
        == Some(true)
}

fn json_to_input(body: Map<String, Value>) -> Result<CredentialInput, SitekeepError> {
    let mut fields = BTreeMap::new();
    for (key, value) in body {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(SitekeepError::BadRequest(format!(
                    "Field `{key}` must be a string"
                )));
            }
        };
        fields.insert(key, text);
    }
    Ok(CredentialInput(fields))
}
