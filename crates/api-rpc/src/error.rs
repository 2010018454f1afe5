//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes.

use jsonrpsee::types::error::INVALID_PARAMS_CODE;
use jsonrpsee::types::ErrorObjectOwned;
use ocrd_dispatch_core::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const NOT_FOUND: i32 = 4001;
    pub const CONFLICT: i32 = 4002;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SYSTEM_ERROR: i32 = 5002;
}

/// Convert AppError to JSON-RPC ErrorObject
///
/// Field-level failures carry `{"field": <name>}` as error data.
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    use ocrd_dispatch_core::port::ExecutionError;

    let data = err.field().map(|field| json!({ "field": field }));

    let code = match &err {
        AppError::Validation(_) => code::VALIDATION_ERROR,
        AppError::Execution(ExecutionError::InvalidLocation(_)) => code::VALIDATION_ERROR,
        AppError::Execution(ExecutionError::MissingFolder(_)) => code::VALIDATION_ERROR,
        AppError::NotFound(_) => code::NOT_FOUND,
        AppError::Conflict(_) => code::CONFLICT,
        AppError::Execution(_) => code::SYSTEM_ERROR,
        AppError::Io(_) => code::SYSTEM_ERROR,
        AppError::Config(_) => code::INTERNAL_ERROR,
    };

    ErrorObjectOwned::owned(code, err.to_string(), data)
}

/// Convert a params deserialization failure to a JSON-RPC ErrorObject
///
/// serde does not report which member had the wrong type, so each member of
/// an object payload is tried on its own. The first one that fails on its own
/// is reported like any other invalid field. Payloads that are not objects
/// stay plain invalid params.
pub fn params_error<T: DeserializeOwned>(value: &Value, err: serde_json::Error) -> ErrorObjectOwned {
    let field = value.as_object().and_then(|members| {
        members
            .iter()
            .find(|(name, member)| {
                serde_json::from_value::<T>(json!({ (name.as_str()): member })).is_err()
            })
            .map(|(name, _)| name.clone())
    });

    match field {
        Some(field) => ErrorObjectOwned::owned(
            code::VALIDATION_ERROR,
            format!("Invalid field '{}': {}", field, err),
            Some(json!({ "field": field })),
        ),
        None => ErrorObjectOwned::owned(INVALID_PARAMS_CODE, err.to_string(), None::<()>),
    }
}
