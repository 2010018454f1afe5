//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate.

use serde::{Deserialize, Serialize};

/// Request to submit a processor job
///
/// Blank fields and arguments are sent as given; the daemon normalizes and
/// validates them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmitJobRequest {
    pub key: String,
    pub processor: String,
    pub folder: String,
    pub input: String,
    pub output: String,
    pub arguments: Vec<String>,
}

impl SubmitJobRequest {
    pub fn new(
        key: impl Into<String>,
        processor: impl Into<String>,
        folder: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            processor: processor.into(),
            folder: folder.into(),
            input: input.into(),
            output: output.into(),
            arguments: Vec::new(),
        }
    }

    pub fn arg(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn args<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }
}

/// Response for an accepted job
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitJobResponse {
    pub key: String,
    pub processor: String,
    pub state: String,
    pub arguments: Vec<String>,
}

/// Request to describe a processor, `None` asks for the default one
#[derive(Debug, Clone, Default, Serialize)]
pub struct DescribeProcessorRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// Processor description
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DescriptionResponse {
    pub description: String,
}
