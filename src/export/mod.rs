//! Report export
//!
//! Turns a [`SprintSnapshot`] into a downloadable artifact. The spreadsheet
//! and the PDF are both derived from the same snapshot; the host decides how
//! the bytes are delivered through a [`DownloadSink`].

pub mod document;
pub mod filename;
pub mod state;
pub mod tabular;

pub use document::DocumentRenderer;
pub use state::ExportPhase;
pub use tabular::TabularRenderer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ExportError;
use crate::models::SprintSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Multi-sheet spreadsheet (.xlsx)
    Tabular,
    /// Paginated report (.pdf)
    Document,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Tabular => "xlsx",
            ExportFormat::Document => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Tabular => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Document => "application/pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Tabular => "Excel Spreadsheet",
            ExportFormat::Document => "PDF Document",
        }
    }

    /// Parse a CLI-style name (`xlsx`, `excel`, `pdf`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "xlsx" | "excel" | "tabular" | "spreadsheet" => Some(ExportFormat::Tabular),
            "pdf" | "document" => Some(ExportFormat::Document),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Generated report ready for delivery
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Trait for report generators
pub trait ReportRenderer {
    const FORMAT: ExportFormat;

    fn render(snapshot: &SprintSnapshot, generated_at: DateTime<Utc>) -> Result<Vec<u8>, ExportError>;
}

/// Host-side delivery of an artifact (browser download, file write, ...)
pub trait DownloadSink {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<(), ExportError>;
}

/// Validate, name and render the artifact without delivering it.
pub fn build_artifact(
    snapshot: &SprintSnapshot,
    format: ExportFormat,
    generated_at: DateTime<Utc>,
) -> Result<ExportArtifact, ExportError> {
    snapshot.validate()?;

    let filename = filename::report_filename(&snapshot.sprint_name, format, generated_at);
    log::info!("exporting {} as {}", snapshot.sprint_name, filename);

    let bytes = match format {
        ExportFormat::Tabular => TabularRenderer::render(snapshot, generated_at)?,
        ExportFormat::Document => DocumentRenderer::render(snapshot, generated_at)?,
    };
    log::debug!("{} rendered, {} bytes", filename, bytes.len());

    Ok(ExportArtifact {
        filename,
        format,
        bytes,
    })
}

/// Build the artifact and hand it to `sink`. Returns the delivered filename.
pub fn export<S: DownloadSink + ?Sized>(
    snapshot: &SprintSnapshot,
    format: ExportFormat,
    generated_at: DateTime<Utc>,
    sink: &mut S,
) -> Result<String, ExportError> {
    let artifact = build_artifact(snapshot, format, generated_at)?;
    match sink.deliver(&artifact) {
        Ok(()) => {
            log::info!("delivered {}", artifact.filename);
            Ok(artifact.filename)
        }
        Err(e) => {
            log::warn!("delivery of {} failed: {}", artifact.filename, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SnapshotCatalog;
    use chrono::{NaiveDate, TimeZone};

    #[derive(Default)]
    struct MemorySink {
        delivered: Vec<ExportArtifact>,
    }

    impl DownloadSink for MemorySink {
        fn deliver(&mut self, artifact: &ExportArtifact) -> Result<(), ExportError> {
            self.delivered.push(artifact.clone());
            Ok(())
        }
    }

    struct RejectingSink;

    impl DownloadSink for RejectingSink {
        fn deliver(&mut self, artifact: &ExportArtifact) -> Result<(), ExportError> {
            Err(ExportError::DownloadRejected {
                filename: artifact.filename.clone(),
                reason: "user cancelled".to_string(),
            })
        }
    }

    fn snapshot() -> SprintSnapshot {
        let mut snap = SnapshotCatalog::authored(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap())
            .default_snapshot()
            .clone();
        snap.sprint_name = "Sprint 24.12 - Core Features".to_string();
        snap
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_tabular_export_end_to_end() {
        let mut sink = MemorySink::default();
        let name = export(&snapshot(), ExportFormat::Tabular, at(), &mut sink).unwrap();
        assert_eq!(name, "sprint_24_12___core_features_2025-12-01T10-00-00.xlsx");
        assert_eq!(sink.delivered.len(), 1);
        // xlsx is a zip container
        assert_eq!(&sink.delivered[0].bytes[..2], b"PK");
        assert_eq!(
            sink.delivered[0].mime_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[test]
    fn test_document_export_end_to_end() {
        let mut sink = MemorySink::default();
        let name = export(&snapshot(), ExportFormat::Document, at(), &mut sink).unwrap();
        assert_eq!(name, "sprint_24_12___core_features_2025-12-01T10-00-00.pdf");
        assert!(sink.delivered[0].bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_invalid_snapshot_fails_before_rendering() {
        let mut snap = snapshot();
        snap.sprint_name = String::new();
        let mut sink = MemorySink::default();
        let err = export(&snap, ExportFormat::Tabular, at(), &mut sink).unwrap_err();
        assert!(matches!(err, ExportError::InvalidSnapshot(_)));
        assert!(sink.delivered.is_empty());
    }

    #[test]
    fn test_rejected_download_is_reported() {
        let err = export(&snapshot(), ExportFormat::Document, at(), &mut RejectingSink).unwrap_err();
        match err {
            ExportError::DownloadRejected { filename, .. } => assert!(filename.ends_with(".pdf")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::from_name("XLSX"), Some(ExportFormat::Tabular));
        assert_eq!(ExportFormat::from_name("pdf"), Some(ExportFormat::Document));
        assert_eq!(ExportFormat::from_name("csv"), None);
        assert_eq!(ExportFormat::Document.to_string(), "pdf");
    }
}
