//! JSON-RPC Server
//!
//! Serves the dispatch API as JSON-RPC 2.0 over HTTP on localhost.

use crate::error::params_error;
use crate::handler::RpcHandler;
use crate::types::{method, DescribeProcessorRequest, SubmitJobRequest};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::types::{ErrorObjectOwned, Params};
use jsonrpsee::RpcModule;
use ocrd_dispatch_core::application::DispatchService;
use serde::de::DeserializeOwned;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9528;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16, // 0 picks a free port
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, service: Arc<DispatchService>) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(service)),
        }
    }

    /// Start the JSON-RPC server
    ///
    /// Returns the bound address together with the handle used to stop it.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;
        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let mut module = RpcModule::new(());

        // Register methods
        let handler = self.handler.clone();
        module
            .register_async_method(method::SUBMIT_JOB, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: SubmitJobRequest = parse_params(&params)?;
                    handler.submit(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method(method::DESCRIBE_PROCESSOR, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    // No params at all asks for the default processor
                    let req: DescribeProcessorRequest = match params.as_str() {
                        None => DescribeProcessorRequest::default(),
                        Some(_) => parse_params(&params)?,
                    };
                    handler.describe(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        info!(addr = %local_addr, "JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok((local_addr, handle))
    }
}

/// Accept both named params (`{...}`) and a single positional object (`[{...}]`)
fn parse_params<T: DeserializeOwned>(params: &Params<'_>) -> Result<T, ErrorObjectOwned> {
    let value: serde_json::Value = if params.is_object() {
        params.parse()?
    } else {
        params.one()?
    };

    serde_json::from_value(value.clone()).map_err(|e| params_error::<T>(&value, e))
}
