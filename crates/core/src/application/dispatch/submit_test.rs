//! Unit tests for submit validation and describe lookups

use super::*;
use crate::domain::request::{FIELD_FOLDER, FIELD_KEY, FIELD_OUTPUT};
use crate::error::AppError;
use crate::port::process_executor::mocks::{MockBehavior, MockProcessExecutor};
use crate::port::processor_catalog::mocks::MockProcessorCatalog;
use serde_json::json;

fn draft(value: serde_json::Value) -> ProcessRequestDraft {
    serde_json::from_value(value).unwrap()
}

fn binarize_draft() -> ProcessRequestDraft {
    draft(json!({
        "key": " job-42 ",
        "processor": "ocrd-cis-ocropy-binarize",
        "folder": "book-1",
        "input": "OCR-D-IMG",
        "output": "OCR-D-BIN",
        "arguments": ["-P", "level-of-operation", " page ", null, ""]
    }))
}

fn service(executor: Arc<MockProcessExecutor>) -> DispatchService {
    let catalog = MockProcessorCatalog::new()
        .with("ocrd-cis-ocropy-binarize", "Binarize images with ocropy")
        .with_default("ocrd-cis-ocropy-binarize");
    DispatchService::new(executor, Arc::new(catalog))
}

#[tokio::test]
async fn test_submit_forwards_normalized_request() {
    let executor = Arc::new(MockProcessExecutor::new_accepting());
    let service = service(executor.clone());

    let request = service.submit(binarize_draft()).await.unwrap();

    assert_eq!(request.key(), "job-42");
    assert_eq!(request.arguments(), ["-P", "level-of-operation", "page"]);
    assert_eq!(executor.dispatched(), vec![request]);
}

#[tokio::test]
async fn test_submit_rejects_blank_fields_before_dispatch() {
    let executor = Arc::new(MockProcessExecutor::new_accepting());
    let service = service(executor.clone());

    for (field, value) in [
        (FIELD_KEY, json!({"key": "  ", "processor": "p", "folder": "f", "input": "i", "output": "o"})),
        (FIELD_FOLDER, json!({"key": "k", "processor": "p", "input": "i", "output": "o"})),
        (FIELD_OUTPUT, json!({"key": "k", "processor": "p", "folder": "f", "input": "i", "output": null})),
    ] {
        let err = service.submit(draft(value)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.field(), Some(field));
    }

    assert_eq!(executor.call_count(), 0);
}

#[tokio::test]
async fn test_submit_duplicate_maps_to_conflict() {
    let executor = Arc::new(MockProcessExecutor::new(MockBehavior::Duplicate));
    let service = service(executor);

    let err = service.submit(binarize_draft()).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(err.to_string().contains("job-42"));
}

#[tokio::test]
async fn test_submit_unknown_processor_maps_to_not_found() {
    let executor = Arc::new(MockProcessExecutor::new(MockBehavior::UnknownProcessor));
    let service = service(executor);

    let err = service.submit(binarize_draft()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_describe_named_default_and_unknown() {
    let service = service(Arc::new(MockProcessExecutor::new_accepting()));

    let named = service
        .describe(&ProcessorIdentity::named("ocrd-cis-ocropy-binarize"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(named.description(), "Binarize images with ocropy");

    let default = service.describe(&ProcessorIdentity::default()).await.unwrap();
    assert_eq!(default, Some(named));

    let unknown = service
        .describe(&ProcessorIdentity::named("ocrd-unknown"))
        .await
        .unwrap();
    assert!(unknown.is_none());

    let empty = service.describe(&ProcessorIdentity::named("")).await.unwrap();
    assert!(empty.is_none());
}
