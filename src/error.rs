//! Export error taxonomy

use thiserror::Error;

use crate::export::ExportFormat;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The snapshot is missing a required field or breaks a model invariant.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// The workbook or PDF writer could not produce the artifact.
    #[error("failed to generate {format} report: {message}")]
    Generation {
        format: ExportFormat,
        message: String,
    },

    /// The host refused to save the artifact.
    #[error("download of {filename} was rejected: {reason}")]
    DownloadRejected { filename: String, reason: String },
}

impl ExportError {
    pub fn generation(format: ExportFormat, err: impl std::fmt::Display) -> Self {
        ExportError::Generation {
            format,
            message: err.to_string(),
        }
    }

    /// Short text suitable for the export dialog.
    pub fn user_message(&self) -> String {
        match self {
            ExportError::InvalidSnapshot(msg) => format!("This sprint cannot be exported: {}", msg),
            ExportError::Generation { format, .. } => {
                format!("The {} could not be generated. Please try again.", format.label())
            }
            ExportError::DownloadRejected { reason, .. } => format!("The download was blocked: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_message_names_format() {
        let err = ExportError::generation(ExportFormat::Document, "font table missing");
        assert_eq!(err.to_string(), "failed to generate pdf report: font table missing");
        assert!(err.user_message().contains("PDF Document"));
    }

    #[test]
    fn test_download_rejected_display() {
        let err = ExportError::DownloadRejected {
            filename: "a.xlsx".to_string(),
            reason: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("a.xlsx"));
        assert_eq!(err.user_message(), "The download was blocked: permission denied");
    }
}
