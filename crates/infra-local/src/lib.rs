// OCR-D Dispatch Infrastructure - Local Adapters
// Implements: ProcessExecutor (spool hand-off), ProcessorCatalog (ocrd-tool.json)

pub mod ocrd_tool_catalog;
pub mod spool_dispatcher;

pub use ocrd_tool_catalog::OcrdToolCatalog;
pub use spool_dispatcher::{SpoolDispatcher, SpoolEntry};
