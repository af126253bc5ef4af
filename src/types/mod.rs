pub mod envelope;
pub mod resource;

pub use envelope::ApiEnvelope;
pub use resource::{FieldSpec, Resource};
