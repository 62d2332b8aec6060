//! Resolución CLI — command-line client for the resolution-processing API.
//!
//! Set RESOLUCION_API_URL (or API_BASE_URL); defaults to http://localhost:8000.
//! RESOLUCION_API_TOKEN, when set, is sent as a Bearer token.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use resolucion_api_client::{ApiClient, BearerAuth, DocumentService};
use resolucion_cli::{format_batch_table, init_tracing};
use resolucion_core::config::api_token_from_env;
use resolucion_core::{ClientConfig, UploadStatus};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "resolucion", about = "Resolution processing API CLI")]
struct Cli {
    /// Backend base URL (overrides RESOLUCION_API_URL / API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single resolution PDF
    Process {
        /// Path to the PDF
        file: PathBuf,
    },
    /// Process several PDFs as one batch
    Batch {
        /// Paths to the PDFs
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Check whether the backend is reachable
    Health,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn log_status<T, E: std::fmt::Display>(result: &Result<T, E>) {
    match result {
        Ok(_) => tracing::info!(status = %UploadStatus::Success, "Upload finished"),
        Err(e) => tracing::error!(status = %UploadStatus::Error, error = %e, "Upload failed"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match cli.base_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };

    let mut client = ApiClient::new(config).context("Failed to create API client")?;
    if let Some(token) = api_token_from_env() {
        client = client.with_request_middleware(BearerAuth::new(token));
    }
    tracing::debug!(base_url = %client.base_url(), "Using backend");

    let service = DocumentService::new(client);

    match cli.command {
        Commands::Process { file } => {
            tracing::info!(status = %UploadStatus::Uploading, file = %file.display(), "Uploading");
            let result = service.process_single_path(&file).await;
            log_status(&result);
            let response =
                result.with_context(|| format!("Failed to process {}", file.display()))?;
            print_json(&response)?;
        }
        Commands::Batch { files, format } => {
            tracing::info!(status = %UploadStatus::Uploading, files = files.len(), "Uploading");
            let result = service.process_batch_paths(files.as_slice()).await;
            log_status(&result);
            let batch = result.context("Failed to process batch")?;

            if !batch.is_consistent() {
                tracing::warn!(
                    total_procesados = batch.total_procesados,
                    resultados = batch.resultados.len(),
                    "Batch count does not match returned results"
                );
            }

            match format {
                OutputFormat::Json => print_json(&batch)?,
                OutputFormat::Table => print!("{}", format_batch_table(&batch)),
            }
        }
        Commands::Health => {
            let healthy = service.health_check().await;
            print_json(&serde_json::json!({ "healthy": healthy }))?;
            if !healthy {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
