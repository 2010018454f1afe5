// Job Location - resolves request folders against a project root

use crate::domain::error::{DomainError, Result};
use crate::domain::request::{ProcessRequest, FIELD_FOLDER, FIELD_INPUT, FIELD_OUTPUT};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Absolute locations of a job's working, input and output folders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobLocation {
    pub working_dir: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl JobLocation {
    /// Resolve `folder`, `input` and `output` of a request below `project_root`
    ///
    /// Pure path arithmetic, the file system is not touched.
    ///
    /// # Errors
    /// - DomainError::InvalidLocation if a field is absolute or contains `..`
    pub fn resolve(project_root: &Path, request: &ProcessRequest) -> Result<Self> {
        let folder = relative(FIELD_FOLDER, request.folder())?;
        let input = relative(FIELD_INPUT, request.input())?;
        let output = relative(FIELD_OUTPUT, request.output())?;

        let working_dir = project_root.join(folder);
        Ok(Self {
            input_dir: working_dir.join(input),
            output_dir: working_dir.join(output),
            working_dir,
        })
    }
}

fn relative<'a>(field: &'static str, value: &'a str) -> Result<&'a Path> {
    let path = Path::new(value);

    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(DomainError::InvalidLocation {
                    field,
                    reason: format!("must not traverse upwards: {}", value),
                })
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(DomainError::InvalidLocation {
                    field,
                    reason: format!("must be a relative path: {}", value),
                })
            }
        }
    }

    Ok(path)
}
