// Spool dispatcher implementation
// Hands validated jobs to an external process supervisor through a spool directory
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use ocrd_dispatch_core::domain::request::{FIELD_FOLDER, FIELD_INPUT};
use ocrd_dispatch_core::domain::{DomainError, JobLocation, ProcessRequest};
use ocrd_dispatch_core::port::process_executor::{ExecutionError, ProcessExecutor};
use ocrd_dispatch_core::port::{ProcessorCatalog, TimeProvider};

const SPOOL_EXTENSION: &str = "json";
// Leaves room for the extension below the usual 255-byte name limit
const MAX_STEM_LEN: usize = 200;

/// One accepted job as written to the spool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpoolEntry {
    pub request: ProcessRequest,
    pub location: JobLocation,
    pub submitted_at: i64, // epoch ms
}

/// Spool dispatcher
///
/// Each accepted job becomes `<spool_dir>/<key>.json`. The file is created
/// exclusively, so a key that is still spooled cannot be submitted twice.
/// Whoever runs the processors removes the file once the job is finished.
pub struct SpoolDispatcher {
    project_root: PathBuf,
    spool_dir: PathBuf,
    check_folders: bool,
    catalog: Option<Arc<dyn ProcessorCatalog>>,
    time_provider: Arc<dyn TimeProvider>,
}

impl SpoolDispatcher {
    /// Create a new spool dispatcher
    ///
    /// # Arguments
    /// * `project_root` - Folder all request folders are relative to
    /// * `spool_dir` - Hand-off directory, created on first dispatch
    /// * `time_provider` - Clock for `submitted_at`
    ///
    /// # Example
    /// ```ignore
    /// let dispatcher = SpoolDispatcher::new(
    ///     "/srv/ocr4all/data/projects",
    ///     "/var/spool/ocrd-dispatch",
    ///     Arc::new(SystemTimeProvider),
    /// )
    /// .with_catalog(catalog);
    /// ```
    pub fn new(
        project_root: impl Into<PathBuf>,
        spool_dir: impl Into<PathBuf>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            spool_dir: spool_dir.into(),
            check_folders: true,
            catalog: None,
            time_provider,
        }
    }

    /// Reject processors the catalog does not know
    pub fn with_catalog(mut self, catalog: Arc<dyn ProcessorCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Toggle the working/input folder existence check
    pub fn with_folder_checks(mut self, enabled: bool) -> Self {
        self.check_folders = enabled;
        self
    }

    /// Spool file of a job key
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.spool_dir
            .join(format!("{}.{}", spool_file_stem(key), SPOOL_EXTENSION))
    }

    /// Read a spooled job back, `None` if the key is not spooled
    pub async fn read_entry(&self, key: &str) -> Result<Option<SpoolEntry>, ExecutionError> {
        let bytes = match tokio::fs::read(self.entry_path(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ExecutionError::IoError(e.to_string())),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| ExecutionError::IoError(e.to_string()))
    }

    /// Working and input folders must exist; the processor creates the output
    ///
    /// Both are also resolved through symlinks and must stay below the
    /// project root.
    async fn verify_folders(&self, location: &JobLocation) -> Result<(), ExecutionError> {
        for dir in [&location.working_dir, &location.input_dir] {
            if !is_dir(dir).await {
                return Err(ExecutionError::MissingFolder(dir.display().to_string()));
            }
        }

        let root = tokio::fs::canonicalize(&self.project_root)
            .await
            .map_err(|e| ExecutionError::IoError(e.to_string()))?;
        for (field, dir) in [
            (FIELD_FOLDER, &location.working_dir),
            (FIELD_INPUT, &location.input_dir),
        ] {
            let real = tokio::fs::canonicalize(dir)
                .await
                .map_err(|e| ExecutionError::IoError(e.to_string()))?;
            if !real.starts_with(&root) {
                return Err(ExecutionError::InvalidLocation(DomainError::InvalidLocation {
                    field,
                    reason: format!("resolves outside the project root: {}", real.display()),
                }));
            }
        }
        Ok(())
    }

    async fn verify_processor(&self, processor: &str) -> Result<(), ExecutionError> {
        if let Some(catalog) = &self.catalog {
            if !catalog.contains(processor).await {
                return Err(ExecutionError::UnknownProcessor(processor.to_string()));
            }
        }
        Ok(())
    }

    /// Write the entry with create-new semantics
    async fn write_entry(&self, entry: &SpoolEntry) -> Result<PathBuf, ExecutionError> {
        let key = entry.request.key();
        let path = self.entry_path(key);

        let bytes = serde_json::to_vec_pretty(entry)
            .map_err(|e| ExecutionError::IoError(e.to_string()))?;

        tokio::fs::create_dir_all(&self.spool_dir)
            .await
            .map_err(|e| ExecutionError::IoError(e.to_string()))?;

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => ExecutionError::DuplicateKey(key.to_string()),
                _ => ExecutionError::IoError(e.to_string()),
            })?;

        if let Err(e) = write_all(&mut file, &bytes).await {
            // Never leave a half-written entry claiming the key
            warn!(key = %key, error = %e, "Spool write failed, removing partial entry");
            let _ = tokio::fs::remove_file(&path).await;
            return Err(ExecutionError::IoError(e.to_string()));
        }

        Ok(path)
    }
}

#[async_trait]
impl ProcessExecutor for SpoolDispatcher {
    async fn dispatch(&self, request: ProcessRequest) -> Result<(), ExecutionError> {
        let location = JobLocation::resolve(&self.project_root, &request)
            .map_err(ExecutionError::InvalidLocation)?;

        if self.check_folders {
            self.verify_folders(&location).await?;
        }
        self.verify_processor(request.processor()).await?;

        let entry = SpoolEntry {
            request,
            location,
            submitted_at: self.time_provider.now_millis(),
        };
        let path = self.write_entry(&entry).await?;

        info!(
            key = %entry.request.key(),
            processor = %entry.request.processor(),
            working_dir = %entry.location.working_dir.display(),
            spool_file = %path.display(),
            "Job spooled"
        );

        Ok(())
    }
}

async fn write_all(file: &mut tokio::fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

/// Keys are opaque; escape everything outside `[A-Za-z0-9._-]` byte-wise
///
/// Stems longer than `MAX_STEM_LEN` keep a prefix and end in `~` plus the
/// SHA-256 of the full key. `~` is always escaped in short stems, so the two
/// forms never collide.
fn spool_file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' => {
                stem.push(byte as char)
            }
            _ => stem.push_str(&format!("%{:02X}", byte)),
        }
    }

    if stem.len() <= MAX_STEM_LEN {
        return stem;
    }

    let digest = hex::encode(Sha256::digest(key.as_bytes()));
    // Stem is ASCII, any byte index is a char boundary
    stem.truncate(MAX_STEM_LEN - digest.len() - 1);
    stem.push('~');
    stem.push_str(&digest);
    stem
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocrd_dispatch_core::port::processor_catalog::mocks::MockProcessorCatalog;
    use ocrd_dispatch_core::port::time_provider::FixedTimeProvider;
    use tempfile::TempDir;

    const NOW: i64 = 1_710_000_000_000;

    struct Fixture {
        _root: TempDir,
        projects: PathBuf,
        spool: PathBuf,
    }

    fn fixture() -> Fixture {
        let root = TempDir::new().unwrap();
        let projects = root.path().join("projects");
        let spool = root.path().join("spool");
        std::fs::create_dir_all(projects.join("book-1").join("OCR-D-IMG")).unwrap();
        Fixture {
            _root: root,
            projects,
            spool,
        }
    }

    fn dispatcher(fixture: &Fixture) -> SpoolDispatcher {
        SpoolDispatcher::new(
            &fixture.projects,
            &fixture.spool,
            Arc::new(FixedTimeProvider(NOW)),
        )
    }

    fn request(key: &str, folder: &str, processor: &str) -> ProcessRequest {
        ProcessRequest::new(
            key,
            processor,
            folder,
            "OCR-D-IMG",
            "OCR-D-BIN",
            ["-P", "level-of-operation", "page"],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_writes_spool_entry() {
        let fixture = fixture();
        let dispatcher = dispatcher(&fixture);
        let request = request("job-1", "book-1", "ocrd-cis-ocropy-binarize");

        dispatcher.dispatch(request.clone()).await.unwrap();

        let entry = dispatcher.read_entry("job-1").await.unwrap().unwrap();
        assert_eq!(entry.request, request);
        assert_eq!(entry.submitted_at, NOW);
        assert_eq!(entry.location.working_dir, fixture.projects.join("book-1"));
        assert_eq!(
            entry.location.output_dir,
            fixture.projects.join("book-1").join("OCR-D-BIN")
        );
    }

    #[tokio::test]
    async fn test_duplicate_key_rejected() {
        let fixture = fixture();
        let dispatcher = dispatcher(&fixture);

        dispatcher
            .dispatch(request("job-1", "book-1", "ocrd-dummy"))
            .await
            .unwrap();
        let result = dispatcher
            .dispatch(request("job-1", "book-1", "ocrd-other"))
            .await;

        assert!(matches!(result, Err(ExecutionError::DuplicateKey(key)) if key == "job-1"));

        // First submission stays untouched
        let entry = dispatcher.read_entry("job-1").await.unwrap().unwrap();
        assert_eq!(entry.request.processor(), "ocrd-dummy");
    }

    #[tokio::test]
    async fn test_traversal_rejected_before_io() {
        let fixture = fixture();
        let dispatcher = dispatcher(&fixture);

        let result = dispatcher
            .dispatch(request("job-2", "../outside", "ocrd-dummy"))
            .await;

        assert!(matches!(result, Err(ExecutionError::InvalidLocation(e)) if e.field() == "folder"));
        assert!(!fixture.spool.exists());
    }

    #[tokio::test]
    async fn test_missing_folder_rejected() {
        let fixture = fixture();
        let dispatcher = dispatcher(&fixture);

        let result = dispatcher
            .dispatch(request("job-3", "book-2", "ocrd-dummy"))
            .await;
        assert!(matches!(result, Err(ExecutionError::MissingFolder(_))));

        let unchecked = dispatcher.with_folder_checks(false);
        unchecked
            .dispatch(request("job-3", "book-2", "ocrd-dummy"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_processor_rejected_with_catalog() {
        let fixture = fixture();
        let catalog = MockProcessorCatalog::new().with("ocrd-dummy", "Copies input to output");
        let dispatcher = dispatcher(&fixture).with_catalog(Arc::new(catalog));

        let result = dispatcher
            .dispatch(request("job-4", "book-1", "ocrd-missing"))
            .await;
        assert!(matches!(result, Err(ExecutionError::UnknownProcessor(name)) if name == "ocrd-missing"));

        dispatcher
            .dispatch(request("job-5", "book-1", "ocrd-dummy"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_read_entry_missing_key() {
        let fixture = fixture();
        let dispatcher = dispatcher(&fixture);
        assert!(dispatcher.read_entry("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_long_multibyte_key_spooled() {
        let fixture = fixture();
        let dispatcher = dispatcher(&fixture);
        let key = "ä".repeat(50);

        dispatcher
            .dispatch(request(&key, "book-1", "ocrd-dummy"))
            .await
            .unwrap();

        let entry = dispatcher.read_entry(&key).await.unwrap().unwrap();
        assert_eq!(entry.request.key(), key);

        let result = dispatcher.dispatch(request(&key, "book-1", "ocrd-dummy")).await;
        assert!(matches!(result, Err(ExecutionError::DuplicateKey(_))));

        // Same prefix, different key
        let other = format!("{}ö", key);
        dispatcher
            .dispatch(request(&other, "book-1", "ocrd-dummy"))
            .await
            .unwrap();
        assert!(dispatcher.read_entry(&other).await.unwrap().is_some());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_out_of_project_root_rejected() {
        let fixture = fixture();
        let outside = fixture._root.path().join("outside");
        std::fs::create_dir_all(outside.join("OCR-D-IMG")).unwrap();
        std::os::unix::fs::symlink(&outside, fixture.projects.join("escape")).unwrap();
        let dispatcher = dispatcher(&fixture);

        let result = dispatcher
            .dispatch(request("job-6", "escape", "ocrd-dummy"))
            .await;

        assert!(matches!(result, Err(ExecutionError::InvalidLocation(e)) if e.field() == "folder"));
        assert!(dispatcher.read_entry("job-6").await.unwrap().is_none());
    }

    #[test]
    fn test_long_stems_are_bounded() {
        let long = "a".repeat(500);
        let stem = spool_file_stem(&long);
        assert_eq!(stem.len(), MAX_STEM_LEN);
        assert!(stem.starts_with("aaaa"));
        assert_ne!(stem, spool_file_stem(&"a".repeat(501)));

        let short = "a".repeat(MAX_STEM_LEN);
        assert_eq!(spool_file_stem(&short), short);
        assert_eq!(spool_file_stem("~"), "%7E");
    }

    #[test]
    fn test_spool_file_stem_escaping() {
        assert_eq!(spool_file_stem("job-1_a.b"), "job-1_a.b");
        assert_eq!(spool_file_stem("../etc/passwd"), "..%2Fetc%2Fpasswd");
        assert_eq!(spool_file_stem("a b%"), "a%20b%25");
        assert_eq!(spool_file_stem("ä"), "%C3%A4");
    }
}
