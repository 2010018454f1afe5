//! JSON-RPC API Layer
//!
//! Implements the JSON-RPC 2.0 server for OCR-D Dispatch: job submission and
//! processor descriptions.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig};
