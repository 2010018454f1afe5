//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use ocrd_dispatch_core::domain::{ProcessDescription, ProcessRequest};
use serde::Serialize;

pub use ocrd_dispatch_core::domain::{
    ProcessRequestDraft as SubmitJobRequest, ProcessorIdentity as DescribeProcessorRequest,
};

/// Method names
pub mod method {
    pub const SUBMIT_JOB: &str = "job.submit.v1";
    pub const DESCRIBE_PROCESSOR: &str = "processor.describe.v1";
}

/// State reported for an accepted job
pub const STATE_ACCEPTED: &str = "ACCEPTED";

/// job.submit.v1 - result for an accepted job
#[derive(Debug, Clone, Serialize)]
pub struct SubmitJobResponse {
    pub key: String,
    pub processor: String,
    pub state: String,
    pub arguments: Vec<String>,
}

impl From<ProcessRequest> for SubmitJobResponse {
    fn from(request: ProcessRequest) -> Self {
        Self {
            key: request.key().to_string(),
            processor: request.processor().to_string(),
            state: STATE_ACCEPTED.to_string(),
            arguments: request.arguments().to_vec(),
        }
    }
}

/// processor.describe.v1 - result, `null` when nothing is known
#[derive(Debug, Clone, Serialize)]
pub struct DescriptionResponse {
    pub description: String,
}

impl From<ProcessDescription> for DescriptionResponse {
    fn from(description: ProcessDescription) -> Self {
        Self {
            description: description.description().to_string(),
        }
    }
}
