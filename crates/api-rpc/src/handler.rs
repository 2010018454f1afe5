//! RPC Method Handlers
//!
//! Implements the business logic for each JSON-RPC method.

use crate::error::to_rpc_error;
use crate::types::{
    DescribeProcessorRequest, DescriptionResponse, SubmitJobRequest, SubmitJobResponse,
};
use jsonrpsee::types::ErrorObjectOwned;
use ocrd_dispatch_core::application::DispatchService;
use std::sync::Arc;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    service: Arc<DispatchService>,
}

impl RpcHandler {
    pub fn new(service: Arc<DispatchService>) -> Self {
        Self { service }
    }

    /// job.submit.v1
    pub async fn submit(
        &self,
        params: SubmitJobRequest,
    ) -> Result<SubmitJobResponse, ErrorObjectOwned> {
        let request = self.service.submit(params).await.map_err(to_rpc_error)?;
        Ok(SubmitJobResponse::from(request))
    }

    /// processor.describe.v1
    pub async fn describe(
        &self,
        params: DescribeProcessorRequest,
    ) -> Result<Option<DescriptionResponse>, ErrorObjectOwned> {
        let description = self
            .service
            .describe(&params)
            .await
            .map_err(to_rpc_error)?;

        Ok(description.map(DescriptionResponse::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::code;
    use ocrd_dispatch_core::domain::ProcessorIdentity;
    use ocrd_dispatch_core::port::process_executor::mocks::MockProcessExecutor;
    use ocrd_dispatch_core::port::processor_catalog::mocks::MockProcessorCatalog;

    fn handler() -> RpcHandler {
        let catalog = MockProcessorCatalog::new().with("ocrd-dummy", "Copy input to output");
        RpcHandler::new(Arc::new(DispatchService::new(
            Arc::new(MockProcessExecutor::new_accepting()),
            Arc::new(catalog),
        )))
    }

    #[tokio::test]
    async fn test_submit_accepted() {
        let params: SubmitJobRequest = serde_json::from_value(serde_json::json!({
            "key": "job-1",
            "processor": "ocrd-dummy",
            "folder": "book",
            "input": "OCR-D-IMG",
            "output": "OCR-D-COPY",
            "arguments": [" -I ", null]
        }))
        .unwrap();

        let response = handler().submit(params).await.unwrap();
        assert_eq!(response.key, "job-1");
        assert_eq!(response.state, "ACCEPTED");
        assert_eq!(response.arguments, vec!["-I"]);
    }

    #[tokio::test]
    async fn test_submit_blank_key_is_client_error() {
        let params = SubmitJobRequest {
            key: Some(" ".to_string()),
            ..Default::default()
        };

        let err = handler().submit(params).await.unwrap_err();
        assert_eq!(err.code(), code::VALIDATION_ERROR);
        assert!(err.message().contains("'key'"));
    }

    #[tokio::test]
    async fn test_describe_unknown_is_null() {
        let handler = handler();

        let known = handler
            .describe(ProcessorIdentity::named("ocrd-dummy"))
            .await
            .unwrap();
        assert_eq!(known.unwrap().description, "Copy input to output");

        let unknown = handler.describe(ProcessorIdentity::default()).await.unwrap();
        assert!(unknown.is_none());
    }
}
