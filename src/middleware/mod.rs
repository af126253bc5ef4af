pub mod credential_form;
pub mod method_override;
pub mod path;

pub use credential_form::CredentialForm;
pub use method_override::{SitekeepService, with_method_override};
pub use path::{RecordPath, WebsitePath};
