// Process Request Domain Model

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

pub const FIELD_KEY: &str = "key";
pub const FIELD_PROCESSOR: &str = "processor";
pub const FIELD_FOLDER: &str = "folder";
pub const FIELD_INPUT: &str = "input";
pub const FIELD_OUTPUT: &str = "output";

/// Unvalidated submission as it arrives on the wire.
///
/// Every field may be missing or `null`, including single argument entries.
/// The only way to get a [`ProcessRequest`] out of it is `TryFrom`, which
/// applies the same normalization as [`ProcessRequest::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessRequestDraft {
    pub key: Option<String>,
    pub processor: Option<String>,
    pub folder: Option<String>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub arguments: Option<Vec<Option<String>>>,
}

/// Validated job submission for one processor invocation.
///
/// Invariants once constructed:
/// - `key`, `processor`, `folder`, `input` and `output` are trimmed and non-blank
/// - `arguments` holds only trimmed, non-blank entries in submission order
///
/// `key` is an opaque correlation token and is never parsed. `folder` is
/// relative to a project root; `input` and `output` are relative to `folder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProcessRequestDraft")]
pub struct ProcessRequest {
    key: String,
    processor: String,
    folder: String,
    input: String,
    output: String,
    arguments: Vec<String>,
}

impl ProcessRequest {
    /// Create a validated process request
    ///
    /// # Arguments
    ///
    /// * `key` - Job key (correlation token)
    /// * `processor` - OCR-D processor executable name
    /// * `folder` - Working directory, relative to the project folder
    /// * `input` - Input sub-folder of `folder`
    /// * `output` - Output sub-folder of `folder`
    /// * `arguments` - Processor arguments; blank entries are dropped
    ///
    /// # Errors
    /// - DomainError::ValidationError naming the first blank required field
    pub fn new<I>(
        key: impl AsRef<str>,
        processor: impl AsRef<str>,
        folder: impl AsRef<str>,
        input: impl AsRef<str>,
        output: impl AsRef<str>,
        arguments: I,
    ) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Ok(Self {
            key: required(FIELD_KEY, Some(key.as_ref()))?,
            processor: required(FIELD_PROCESSOR, Some(processor.as_ref()))?,
            folder: required(FIELD_FOLDER, Some(folder.as_ref()))?,
            input: required(FIELD_INPUT, Some(input.as_ref()))?,
            output: required(FIELD_OUTPUT, Some(output.as_ref()))?,
            arguments: normalize_arguments(arguments),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn processor(&self) -> &str {
        &self.processor
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}

impl TryFrom<ProcessRequestDraft> for ProcessRequest {
    type Error = DomainError;

    fn try_from(draft: ProcessRequestDraft) -> Result<Self> {
        Ok(Self {
            key: required(FIELD_KEY, draft.key.as_deref())?,
            processor: required(FIELD_PROCESSOR, draft.processor.as_deref())?,
            folder: required(FIELD_FOLDER, draft.folder.as_deref())?,
            input: required(FIELD_INPUT, draft.input.as_deref())?,
            output: required(FIELD_OUTPUT, draft.output.as_deref())?,
            arguments: normalize_arguments(draft.arguments.unwrap_or_default().into_iter().flatten()),
        })
    }
}

impl From<ProcessRequest> for ProcessRequestDraft {
    fn from(request: ProcessRequest) -> Self {
        Self {
            key: Some(request.key),
            processor: Some(request.processor),
            folder: Some(request.folder),
            input: Some(request.input),
            output: Some(request.output),
            arguments: Some(request.arguments.into_iter().map(Some).collect()),
        }
    }
}

fn required(field: &'static str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(DomainError::blank(field)),
    }
}

fn normalize_arguments<I>(arguments: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    arguments
        .into_iter()
        .filter_map(|argument| {
            let trimmed = argument.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}
