// Describe Use Case

use crate::domain::{ProcessDescription, ProcessorIdentity};
use crate::error::Result;
use crate::port::ProcessorCatalog;
use tracing::debug;

pub async fn execute(
    catalog: &dyn ProcessorCatalog,
    identity: &ProcessorIdentity,
) -> Result<Option<ProcessDescription>> {
    let description = catalog.describe(identity).await?;

    debug!(
        processor = %identity,
        found = description.is_some(),
        "Processor description lookup"
    );

    Ok(description)
}
