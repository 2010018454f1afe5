// Processor Catalog Port
// Registry of known processors, queried independently of any running job

use crate::domain::{ProcessDescription, ProcessorIdentity};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ProcessorCatalog: Send + Sync {
    /// Describe a processor
    ///
    /// An unspecified identity refers to the catalog's default processor.
    /// Returns `Ok(None)` when nothing is known about the processor.
    async fn describe(&self, identity: &ProcessorIdentity) -> Result<Option<ProcessDescription>>;

    /// Whether the catalog knows a processor by its executable name
    async fn contains(&self, processor: &str) -> bool {
        matches!(
            self.describe(&ProcessorIdentity::named(processor)).await,
            Ok(Some(_))
        )
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;

    /// Fixed in-memory catalog
    #[derive(Default)]
    pub struct MockProcessorCatalog {
        descriptions: HashMap<String, String>,
        default_processor: Option<String>,
    }

    impl MockProcessorCatalog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, processor: &str, description: &str) -> Self {
            self.descriptions
                .insert(processor.to_string(), description.to_string());
            self
        }

        pub fn with_default(mut self, processor: &str) -> Self {
            self.default_processor = Some(processor.to_string());
            self
        }
    }

    #[async_trait]
    impl ProcessorCatalog for MockProcessorCatalog {
        async fn describe(
            &self,
            identity: &ProcessorIdentity,
        ) -> Result<Option<ProcessDescription>> {
            let name = identity
                .identifier()
                .or(self.default_processor.as_deref());

            Ok(name
                .and_then(|name| self.descriptions.get(name))
                .map(ProcessDescription::new))
        }
    }
}
