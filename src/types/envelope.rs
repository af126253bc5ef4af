use serde::{Deserialize, Serialize};

use crate::db::models::CredentialRecord;
use crate::service::validator::ValidationErrors;

/// Uniform JSON body for every API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<CredentialRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<CredentialRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ApiEnvelope {
    fn empty(success: bool) -> Self {
        Self {
            success,
            message: None,
            record: None,
            records: None,
            errors: None,
        }
    }

    pub fn records(records: Vec<CredentialRecord>) -> Self {
        Self {
            records: Some(records),
            ..Self::empty(true)
        }
    }

    pub fn record(record: CredentialRecord) -> Self {
        Self {
            record: Some(record),
            ..Self::empty(true)
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::empty(false)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_errors(mut self, errors: ValidationErrors) -> Self {
        self.errors = Some(errors);
        self
    }
}
