//! Multipart upload payloads.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::error::{ClientError, Result};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Field name for single-file submissions.
pub const SINGLE_FIELD: &str = "file";
/// Field name repeated once per file in batch submissions.
pub const BATCH_FIELD: &str = "files";

/// A file held in memory, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: PDF_CONTENT_TYPE.to_string(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk. The part's file name is the last path component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf");

        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn into_part(self) -> Result<Part> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(ClientError::Multipart)
    }
}

/// Ordered multipart payload. Inspectable before it is turned into a
/// `reqwest` form, which is opaque once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    parts: Vec<(&'static str, DocumentFile)>,
}

impl UploadForm {
    /// One part named `file`.
    pub fn single(file: DocumentFile) -> Self {
        Self {
            parts: vec![(SINGLE_FIELD, file)],
        }
    }

    /// One part named `files` per input, in input order.
    pub fn batch(files: impl IntoIterator<Item = DocumentFile>) -> Self {
        Self {
            parts: files.into_iter().map(|f| (BATCH_FIELD, f)).collect(),
        }
    }

    pub fn parts(&self) -> &[(&'static str, DocumentFile)] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Total payload size in bytes, excluding multipart framing.
    pub fn payload_bytes(&self) -> usize {
        self.parts.iter().map(|(_, f)| f.len()).sum()
    }

    pub fn into_multipart(self) -> Result<Form> {
        self.parts
            .into_iter()
            .try_fold(Form::new(), |form, (field, file)| {
                Ok(form.part(field, file.into_part()?))
            })
    }
}
