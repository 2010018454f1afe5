// Domain Layer - Job description value objects

pub mod error;
pub mod location;
pub mod processor;
pub mod request;

// Re-exports
pub use error::DomainError;
pub use location::JobLocation;
pub use processor::{ProcessDescription, ProcessorIdentity};
pub use request::{ProcessRequest, ProcessRequestDraft};
