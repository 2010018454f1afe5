// Processor catalog backed by OCR-D ocrd-tool.json files
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

use ocrd_dispatch_core::domain::{ProcessDescription, ProcessorIdentity};
use ocrd_dispatch_core::error::{AppError, Result};
use ocrd_dispatch_core::port::ProcessorCatalog;

/// Top level of an ocrd-tool.json
#[derive(Debug, Deserialize)]
struct OcrdToolFile {
    #[serde(default)]
    tools: BTreeMap<String, OcrdTool>,
}

#[derive(Debug, Deserialize)]
struct OcrdTool {
    executable: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    parameters: BTreeMap<String, OcrdToolParameter>,
}

#[derive(Debug, Deserialize)]
struct OcrdToolParameter {
    #[serde(rename = "type")]
    kind: Option<String>,
    default: Option<serde_json::Value>,
    description: Option<String>,
}

/// In-memory processor catalog
///
/// Descriptions are composed once at load time from the tool description and
/// its parameter list, keyed by executable name.
#[derive(Debug, Default)]
pub struct OcrdToolCatalog {
    descriptions: HashMap<String, String>,
    default_processor: Option<String>,
}

impl OcrdToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every tool of the given ocrd-tool.json files
    ///
    /// Later files override tools of the same name from earlier ones.
    pub async fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut catalog = Self::new();
        for path in paths {
            let path = path.as_ref();
            let content = tokio::fs::read_to_string(path).await?;
            let count = catalog.add_ocrd_tool_json(&content).map_err(|e| {
                AppError::Config(format!("Invalid ocrd-tool.json {}: {}", path.display(), e))
            })?;
            info!(path = %path.display(), tools = count, "Loaded ocrd-tool.json");
        }
        Ok(catalog)
    }

    /// Register the tools of one ocrd-tool.json document, returns how many
    pub fn add_ocrd_tool_json(&mut self, content: &str) -> serde_json::Result<usize> {
        let file: OcrdToolFile = serde_json::from_str(content)?;
        let count = file.tools.len();

        for (name, tool) in file.tools {
            let executable = tool.executable.clone().unwrap_or(name);
            debug!(processor = %executable, "Registered processor");
            self.descriptions.insert(executable, compose_description(&tool));
        }

        Ok(count)
    }

    /// Register a processor with a plain description
    pub fn register(mut self, processor: impl Into<String>, description: impl Into<String>) -> Self {
        self.descriptions.insert(processor.into(), description.into());
        self
    }

    /// Processor answering for an unspecified identity
    pub fn with_default(mut self, processor: impl Into<String>) -> Self {
        self.default_processor = Some(processor.into());
        self
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

#[async_trait]
impl ProcessorCatalog for OcrdToolCatalog {
    async fn describe(&self, identity: &ProcessorIdentity) -> Result<Option<ProcessDescription>> {
        let name = identity
            .identifier()
            .or(self.default_processor.as_deref());

        Ok(name
            .and_then(|name| self.descriptions.get(name))
            .map(ProcessDescription::new))
    }

    async fn contains(&self, processor: &str) -> bool {
        self.descriptions.contains_key(processor)
    }
}

fn compose_description(tool: &OcrdTool) -> String {
    let mut text = tool.description.trim().to_string();
    if tool.parameters.is_empty() {
        return text;
    }

    if !text.is_empty() {
        text.push_str("\n\n");
    }
    text.push_str("Parameters:");

    for (name, parameter) in &tool.parameters {
        text.push_str("\n  ");
        text.push_str(name);

        let mut details = Vec::new();
        if let Some(kind) = &parameter.kind {
            details.push(kind.clone());
        }
        if let Some(default) = &parameter.default {
            details.push(format!("default {}", default));
        }
        if !details.is_empty() {
            text.push_str(&format!(" ({})", details.join(", ")));
        }
        if let Some(description) = &parameter.description {
            text.push_str(": ");
            text.push_str(description.trim());
        }
    }

    text
}
