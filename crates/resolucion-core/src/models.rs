//! Response models returned by the processing backend.
//!
//! Field names follow the backend's JSON schema verbatim.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metadata extracted from one processed resolution PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub titulo: String,
    pub nombre_norma: Option<String>,
    /// The backend schema is inconsistent about this field; it may be absent.
    #[serde(default)]
    pub descripcion: Option<String>,
    pub fecha_publicacion: String,
    pub publication_type_id: i64,
    pub category_id: i64,
    pub ocr_usado: bool,
    pub nombre_archivo_original: String,
    pub url_acceso_pdf: String,
}

impl ResolutionResult {
    /// Publication date parsed as `YYYY-MM-DD`, if the backend sent one.
    pub fn fecha_publicacion_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.fecha_publicacion.trim(), "%Y-%m-%d").ok()
    }
}

/// Aggregate result of a batch submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub total_procesados: u32,
    pub url_excel_consolidado: String,
    pub resultados: Vec<ResolutionResult>,
}

impl BatchResult {
    /// Whether the reported count matches the number of results returned.
    pub fn is_consistent(&self) -> bool {
        self.resultados.len() == self.total_procesados as usize
    }

    /// Number of documents that needed OCR fallback.
    pub fn ocr_count(&self) -> usize {
        self.resultados.iter().filter(|r| r.ocr_usado).count()
    }
}

/// Client-side upload state for consumers driving their own UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Idle => "idle",
            UploadStatus::Uploading => "uploading",
            UploadStatus::Success => "success",
            UploadStatus::Error => "error",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, UploadStatus::Success | UploadStatus::Error)
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
