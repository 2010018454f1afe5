// Process Executor Port
// Abstraction for the collaborator that takes over a validated job

use crate::domain::{DomainError, ProcessRequest};
use async_trait::async_trait;
use thiserror::Error;

/// Execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Unknown processor: {0}")]
    UnknownProcessor(String),

    #[error("Duplicate job key: {0}")]
    DuplicateKey(String),

    #[error("{0}")]
    InvalidLocation(DomainError),

    #[error("Missing folder: {0}")]
    MissingFolder(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Process Executor trait
///
/// Implementations own the job from here on: path checks, hand-off to a
/// supervisor and the job's queued/running/finished states. A request is
/// consumed exactly once.
///
/// Implementations:
/// - SpoolDispatcher: writes accepted jobs into a spool directory
#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    /// Accept a job for execution
    ///
    /// # Errors
    /// - ExecutionError::DuplicateKey if a job with the same key is still pending
    /// - ExecutionError::InvalidLocation if folder/input/output escape the project
    /// - ExecutionError::UnknownProcessor if the processor cannot be resolved
    async fn dispatch(&self, request: ProcessRequest) -> Result<(), ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock executor behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Always accept
        Accept,
        /// Reject every job as a duplicate
        Duplicate,
        /// Reject every job with an unknown processor
        UnknownProcessor,
    }

    /// Mock Process Executor recording every accepted request
    pub struct MockProcessExecutor {
        behavior: MockBehavior,
        dispatched: Arc<Mutex<Vec<ProcessRequest>>>,
    }

    impl MockProcessExecutor {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                dispatched: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_accepting() -> Self {
            Self::new(MockBehavior::Accept)
        }

        pub fn dispatched(&self) -> Vec<ProcessRequest> {
            self.dispatched.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.dispatched.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ProcessExecutor for MockProcessExecutor {
        async fn dispatch(&self, request: ProcessRequest) -> Result<(), ExecutionError> {
            match self.behavior {
                MockBehavior::Accept => {
                    self.dispatched.lock().unwrap().push(request);
                    Ok(())
                }
                MockBehavior::Duplicate => {
                    Err(ExecutionError::DuplicateKey(request.key().to_string()))
                }
                MockBehavior::UnknownProcessor => Err(ExecutionError::UnknownProcessor(
                    request.processor().to_string(),
                )),
            }
        }
    }
}
