use crate::types::resource::Resource;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;

/// A stored credential row, serialized flat: `{id, website_id, type, hostname, ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CredentialRecord {
    pub id: i64,
    pub website_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Website {
    pub id: i64,
    pub name: String,
    pub domain: Option<String>,
}

/// Raw incoming body fields, before whitelisting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CredentialInput(pub BTreeMap<String, String>);

impl CredentialInput {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for CredentialInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A record about to be written: either a fresh insert or an existing row
/// with incoming fields merged over it. Only whitelisted columns are present.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialDraft {
    pub website_id: i64,
    pub kind: Option<String>,
    pub fields: BTreeMap<String, Option<String>>,
}

impl CredentialDraft {
    /// Build an insert draft; fields the body does not carry stay `None`.
    pub fn from_input(resource: Resource, website_id: i64, input: &CredentialInput) -> Self {
        let fields = resource
            .fields()
            .iter()
            .map(|f| (f.name.to_string(), input.get(f.name).map(str::to_string)))
            .collect();
        Self {
            website_id,
            kind: input.get("type").map(str::to_string),
            fields,
        }
    }

    /// Merge whitelisted incoming fields over an existing record. `id` and
    /// `website_id` in the body are ignored.
    pub fn merged(resource: Resource, existing: &CredentialRecord, input: &CredentialInput) -> Self {
        let fields = resource
            .fields()
            .iter()
            .map(|f| {
                let value = match input.get(f.name) {
                    Some(v) => Some(v.to_string()),
                    None => existing.fields.get(f.name).cloned().flatten(),
                };
                (f.name.to_string(), value)
            })
            .collect();
        let kind = input
            .get("type")
            .map(str::to_string)
            .or_else(|| Some(existing.kind.clone()));
        Self {
            website_id: existing.website_id,
            kind,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_deref())
    }
}
