use crate::db::models::CredentialDraft;
use crate::types::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name -> message. First message per field wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Whether the draft's website is known to exist. `Unchecked` is used when the
/// id is missing and no lookup was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebsiteLookup {
    Found,
    Missing,
    Unchecked,
}

/// Check a draft against the resource rules, collecting every violation.
pub fn validate(resource: Resource, draft: &CredentialDraft, website: WebsiteLookup) -> ValidationErrors {
    check(resource, draft, website, true)
}

/// Rules for changes aimed at a record that could not be loaded. Only the
/// incoming fields are checked, so an absent `type` is not an error.
pub fn validate_incoming(
    resource: Resource,
    draft: &CredentialDraft,
    website: WebsiteLookup,
) -> ValidationErrors {
    check(resource, draft, website, false)
}

fn check(
    resource: Resource,
    draft: &CredentialDraft,
    website: WebsiteLookup,
    type_required: bool,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    // Only an empty id is missing; any other value must name a stored website.
    if draft.website_id == 0 {
        errors.add("website_id", "Website is required.");
    } else if website != WebsiteLookup::Found {
        errors.add("website_id", "Website does not exist.");
    }

    match draft.kind.as_deref() {
        None | Some("") if !type_required => {}
        None | Some("") => {
            errors.add("type", format!("{} type is required.", resource.display_name()));
        }
        Some(kind) if !resource.accepts_type(kind) => {
            errors.add(
                "type",
                format!("Invalid {} type.", resource.display_name().to_lowercase()),
            );
        }
        Some(_) => {}
    }

    for col in resource.fields() {
        let Some(value) = draft.field(col.name) else {
            continue;
        };
        if value.chars().count() > col.max_len {
            errors.add(
                col.name,
                format!(
                    "{} must not be more than {} characters.",
                    col.label, col.max_len
                ),
            );
        }
    }

    errors
}
