pub mod validator;

pub use validator::{ValidationErrors, WebsiteLookup, validate, validate_incoming};
