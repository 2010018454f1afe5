//! OCR-D Dispatch SDK - Rust Client Library
//!
//! Submits processor jobs to an OCR-D Dispatch daemon and asks it what
//! processors do.
//!
//! # Example
//!
//! ```no_run
//! use ocrd_dispatch_sdk::{OcrdDispatchClient, SubmitJobRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OcrdDispatchClient::connect("http://127.0.0.1:9528").await?;
//!
//!     let response = client
//!         .submit(SubmitJobRequest::new(
//!             "job-1",
//!             "ocrd-cis-ocropy-binarize",
//!             "book-1",
//!             "OCR-D-IMG",
//!             "OCR-D-BIN",
//!         ))
//!         .await?;
//!
//!     println!("Job accepted: {}", response.key);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::OcrdDispatchClient;
pub use error::{Result, SdkError};
pub use types::{DescribeProcessorRequest, DescriptionResponse, SubmitJobRequest, SubmitJobResponse};
