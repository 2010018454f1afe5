//! Daemon configuration from environment variables

use std::path::PathBuf;
use tracing::warn;

const DEFAULT_PROJECT_ROOT: &str = "~/ocr4all/data/projects";
const DEFAULT_SPOOL_DIR: &str = "~/.ocrd-dispatch/spool";
const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9528;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    pub project_root: PathBuf,
    pub spool_dir: PathBuf,
    pub tool_files: Vec<PathBuf>,
    pub default_processor: Option<String>,
    pub rpc_host: String,
    pub rpc_port: u16,
    pub check_folders: bool,
}

impl DaemonConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source (tests pass a map)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let tool_files = var("OCRD_DISPATCH_TOOLS")
            .map(|list| {
                list.split(':')
                    .filter(|path| !path.trim().is_empty())
                    .map(expand_path)
                    .collect()
            })
            .unwrap_or_default();

        let rpc_port = match var("OCRD_DISPATCH_RPC_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid OCRD_DISPATCH_RPC_PORT, using default");
                DEFAULT_RPC_PORT
            }),
            None => DEFAULT_RPC_PORT,
        };

        let check_folders = match var("OCRD_DISPATCH_CHECK_FOLDERS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid OCRD_DISPATCH_CHECK_FOLDERS, using default");
                true
            }),
            None => true,
        };

        Self {
            project_root: expand_path(
                &var("OCRD_DISPATCH_PROJECT_ROOT").unwrap_or_else(|| DEFAULT_PROJECT_ROOT.into()),
            ),
            spool_dir: expand_path(
                &var("OCRD_DISPATCH_SPOOL_DIR").unwrap_or_else(|| DEFAULT_SPOOL_DIR.into()),
            ),
            tool_files,
            default_processor: var("OCRD_DISPATCH_DEFAULT_PROCESSOR")
                .map(|processor| processor.trim().to_string()),
            rpc_host: var("OCRD_DISPATCH_RPC_HOST").unwrap_or_else(|| DEFAULT_RPC_HOST.into()),
            rpc_port,
            check_folders,
        }
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())
}
