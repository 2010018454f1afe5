// Submit Use Case

use crate::domain::{ProcessRequest, ProcessRequestDraft};
use crate::error::Result;
use crate::port::ProcessExecutor;
use tracing::{info, warn};

/// Execute submit use case
///
/// Validation happens before the executor sees anything, so a malformed
/// draft never reaches the file system or a process.
///
/// # Arguments
///
/// * `executor` - Execution collaborator taking over the job
/// * `draft` - Unvalidated submission
pub async fn execute(
    executor: &dyn ProcessExecutor,
    draft: ProcessRequestDraft,
) -> Result<ProcessRequest> {
    let request = ProcessRequest::try_from(draft).map_err(|e| {
        warn!(field = e.field(), error = %e, "Rejected job submission");
        e
    })?;

    // The executor consumes its own copy; the caller keeps one for correlation
    executor.dispatch(request.clone()).await?;

    info!(
        key = %request.key(),
        processor = %request.processor(),
        folder = %request.folder(),
        arguments = ?request.arguments(),
        "Job dispatched"
    );

    Ok(request)
}
