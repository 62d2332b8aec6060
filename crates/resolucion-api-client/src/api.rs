//! Domain methods for the processing backend.
//!
//! Each operation is one request/response pair. Errors come back exactly as
//! the transport client classified them.

use std::path::Path;

use crate::upload::{DocumentFile, UploadForm};
use crate::{ApiClient, BatchResult, ResolutionResult, Result};

pub const PROCESS_SINGLE_PATH: &str = "/procesar-resolucion/";
pub const PROCESS_BATCH_PATH: &str = "/procesar-lote/";
pub const HEALTH_PATH: &str = "/health";

/// Stateless facade over the document endpoints.
#[derive(Clone, Debug)]
pub struct DocumentService {
    client: ApiClient,
}

impl DocumentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Process a single PDF.
    pub async fn process_single(&self, file: DocumentFile) -> Result<ResolutionResult> {
        tracing::info!(file = %file.file_name, bytes = file.len(), "Submitting resolution");

        let form = UploadForm::single(file).into_multipart()?;
        self.client.post_multipart(PROCESS_SINGLE_PATH, form).await
    }

    /// Process several PDFs as one batch. Either the whole batch succeeds or
    /// the call fails; there are no per-file errors at this layer.
    pub async fn process_batch(&self, files: Vec<DocumentFile>) -> Result<BatchResult> {
        let form = UploadForm::batch(files);
        tracing::info!(
            files = form.len(),
            bytes = form.payload_bytes(),
            "Submitting batch"
        );

        self.client
            .post_multipart(PROCESS_BATCH_PATH, form.into_multipart()?)
            .await
    }

    /// Read a PDF from disk and process it.
    pub async fn process_single_path(&self, path: impl AsRef<Path>) -> Result<ResolutionResult> {
        let file = DocumentFile::from_path(path).await?;
        self.process_single(file).await
    }

    /// Read PDFs from disk and process them as one batch.
    pub async fn process_batch_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<BatchResult> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(DocumentFile::from_path(path).await?);
        }
        self.process_batch(files).await
    }

    /// Liveness probe. Any error, network or HTTP, yields `false`.
    pub async fn health_check(&self) -> bool {
        match self.client.get(HEALTH_PATH).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Health check failed");
                false
            }
        }
    }
}
