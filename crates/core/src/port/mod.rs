// Port Layer - Interfaces for external collaborators

pub mod process_executor;
pub mod processor_catalog;
pub mod time_provider; // For deterministic testing

// Re-exports
pub use process_executor::{ExecutionError, ProcessExecutor};
pub use processor_catalog::ProcessorCatalog;
pub use time_provider::TimeProvider;
