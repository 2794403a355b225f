//! Export dialog state machine
//!
//! `Idle -> Exporting(f) -> Completed(f) -> Idle`, or `Exporting(f) ->
//! Failed(f) -> Idle`. Kept free of any rendering so the dialog logic can be
//! exercised directly.

use super::ExportFormat;
use crate::error::ExportError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportPhase {
    #[default]
    Idle,
    Exporting(ExportFormat),
    /// Held for the completed-display delay, then back to idle
    Completed(ExportFormat),
    Failed { format: ExportFormat, message: String },
}

impl ExportPhase {
    /// Start an export. `None` while another export is in flight or its
    /// completion is still on screen.
    pub fn begin(&self, format: ExportFormat) -> Option<ExportPhase> {
        match self {
            ExportPhase::Idle | ExportPhase::Failed { .. } => Some(ExportPhase::Exporting(format)),
            ExportPhase::Exporting(_) | ExportPhase::Completed(_) => {
                log::warn!("export of {} ignored, dialog is {:?}", format, self);
                None
            }
        }
    }

    /// Record the outcome of the in-flight export.
    pub fn finish(&self, outcome: &Result<String, ExportError>) -> ExportPhase {
        match self {
            ExportPhase::Exporting(format) => match outcome {
                Ok(_) => ExportPhase::Completed(*format),
                Err(e) => ExportPhase::Failed {
                    format: *format,
                    message: e.user_message(),
                },
            },
            other => other.clone(),
        }
    }

    /// Timer expiry after completion or failure.
    pub fn settle(&self) -> ExportPhase {
        match self {
            ExportPhase::Completed(_) | ExportPhase::Failed { .. } => ExportPhase::Idle,
            other => other.clone(),
        }
    }

    /// Buttons are disabled while this holds.
    pub fn is_busy(&self) -> bool {
        matches!(self, ExportPhase::Exporting(_) | ExportPhase::Completed(_))
    }

    /// The dialog closes when a completed export settles.
    pub fn closes_dialog_on_settle(&self) -> bool {
        matches!(self, ExportPhase::Completed(_))
    }

    pub fn is_exporting(&self, format: ExportFormat) -> bool {
        *self == ExportPhase::Exporting(format)
    }

    pub fn is_completed(&self, format: ExportFormat) -> bool {
        *self == ExportPhase::Completed(format)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ExportPhase::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}
