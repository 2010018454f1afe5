//! OCR-D Dispatch CLI - submit processor jobs and inspect processors

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use ocrd_dispatch_sdk::{OcrdDispatchClient, SdkError, SubmitJobRequest, SubmitJobResponse};
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9528";

#[derive(Parser)]
#[command(name = "ocrd-dispatch")]
#[command(about = "OCR-D Dispatch CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "OCRD_DISPATCH_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a processor job
    Submit {
        /// Job key (correlation token)
        #[arg(short, long)]
        key: String,

        /// OCR-D processor executable (e.g., ocrd-cis-ocropy-binarize)
        #[arg(short, long)]
        processor: String,

        /// Working directory, relative to the project folder
        #[arg(short, long)]
        folder: String,

        /// Input file group / sub-folder
        #[arg(short = 'I', long)]
        input: String,

        /// Output file group / sub-folder
        #[arg(short = 'O', long)]
        output: String,

        /// Processor arguments, after `--`
        #[arg(last = true, allow_hyphen_values = true)]
        arguments: Vec<String>,
    },

    /// Describe a processor (the daemon's default one if omitted)
    Describe {
        /// Processor identifier
        identifier: Option<String>,
    },
}

#[derive(Tabled)]
struct SubmitRow {
    key: String,
    processor: String,
    state: String,
    arguments: String,
}

impl From<SubmitJobResponse> for SubmitRow {
    fn from(response: SubmitJobResponse) -> Self {
        Self {
            key: response.key,
            processor: response.processor,
            state: response.state,
            arguments: response.arguments.join(" "),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = OcrdDispatchClient::connect(&cli.rpc_url)
        .await
        .with_context(|| format!("Failed to connect to {}", cli.rpc_url))?;

    match cli.command {
        Commands::Submit {
            key,
            processor,
            folder,
            input,
            output,
            arguments,
        } => {
            let request = SubmitJobRequest::new(key, processor, folder, input, output)
                .args(arguments);

            match client.submit(request).await {
                Ok(response) => {
                    println!("{}", "✓ Job submitted successfully".green().bold());
                    println!();
                    println!("{}", Table::new(vec![SubmitRow::from(response)]));
                }
                Err(SdkError::Rpc {
                    message,
                    field: Some(field),
                    ..
                }) => {
                    eprintln!("{} {}", format!("✗ Invalid '{}':", field).red().bold(), message);
                    std::process::exit(2);
                }
                Err(e) => return Err(e).context("Job submission failed"),
            }
        }

        Commands::Describe { identifier } => {
            let label = identifier.clone().unwrap_or_else(|| "default processor".to_string());

            match client
                .describe(identifier)
                .await
                .context("Processor lookup failed")?
            {
                Some(response) => {
                    println!("{}", label.cyan().bold());
                    println!();
                    println!("{}", response.description);
                }
                None => {
                    println!("{}", format!("No description for {}", label).yellow());
                }
            }
        }
    }

    Ok(())
}
