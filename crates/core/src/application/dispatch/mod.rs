// Dispatch Service - use cases for submitting and describing processor jobs

pub mod describe;
pub mod submit;

#[cfg(test)]
mod submit_test;

use crate::domain::{ProcessDescription, ProcessRequest, ProcessRequestDraft, ProcessorIdentity};
use crate::error::Result;
use crate::port::{ProcessExecutor, ProcessorCatalog};
use std::sync::Arc;

/// Dispatch Service
pub struct DispatchService {
    executor: Arc<dyn ProcessExecutor>,
    catalog: Arc<dyn ProcessorCatalog>,
}

impl DispatchService {
    pub fn new(executor: Arc<dyn ProcessExecutor>, catalog: Arc<dyn ProcessorCatalog>) -> Self {
        Self { executor, catalog }
    }

    /// Validate and hand over a job
    pub async fn submit(&self, draft: ProcessRequestDraft) -> Result<ProcessRequest> {
        submit::execute(self.executor.as_ref(), draft).await
    }

    /// Look up what a processor does
    pub async fn describe(&self, identity: &ProcessorIdentity) -> Result<Option<ProcessDescription>> {
        describe::execute(self.catalog.as_ref(), identity).await
    }
}
