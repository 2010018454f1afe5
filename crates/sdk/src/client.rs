//! OCR-D Dispatch Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    DescribeProcessorRequest, DescriptionResponse, SubmitJobRequest, SubmitJobResponse,
};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use std::time::Duration;

/// OCR-D Dispatch Client
///
/// # Example
///
/// ```no_run
/// use ocrd_dispatch_sdk::OcrdDispatchClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = OcrdDispatchClient::connect("http://127.0.0.1:9528").await?;
/// # Ok(())
/// # }
/// ```
pub struct OcrdDispatchClient {
    client: HttpClient,
}

impl OcrdDispatchClient {
    /// Connect to an OCR-D Dispatch daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9528`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Submit a processor job
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ocrd_dispatch_sdk::{OcrdDispatchClient, SubmitJobRequest};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = OcrdDispatchClient::connect("http://127.0.0.1:9528").await?;
    /// let request = SubmitJobRequest::new(
    ///     "job-1",
    ///     "ocrd-tesserocr-recognize",
    ///     "book-1",
    ///     "OCR-D-SEG",
    ///     "OCR-D-OCR",
    /// )
    /// .args(["-P", "model", "deu"]);
    ///
    /// match client.submit(request).await {
    ///     Ok(response) => println!("{} {}", response.key, response.state),
    ///     Err(e) if e.is_validation() => eprintln!("rejected field: {:?}", e.field()),
    ///     Err(e) => return Err(e.into()),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit(&self, request: SubmitJobRequest) -> Result<SubmitJobResponse> {
        let params = rpc_params![request];
        let response: SubmitJobResponse = self.client.request("job.submit.v1", params).await?;

        Ok(response)
    }

    /// Describe a processor
    ///
    /// `None` asks for the daemon's default processor. Returns `Ok(None)` when
    /// the daemon knows nothing about the processor.
    pub async fn describe(
        &self,
        identifier: Option<String>,
    ) -> Result<Option<DescriptionResponse>> {
        let request = DescribeProcessorRequest { identifier };
        let params = rpc_params![request];
        let response: Option<DescriptionResponse> = self
            .client
            .request("processor.describe.v1", params)
            .await?;

        Ok(response)
    }
}
