//! Writes exported reports into a directory

use std::fs;
use std::path::{Path, PathBuf};

use sprint_pulse::export::DownloadSink;
use sprint_pulse::{ExportArtifact, ExportError};

pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far, in delivery order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&self, artifact: &ExportArtifact) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&artifact.filename);
        fs::write(&path, &artifact.bytes)?;
        Ok(path)
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<(), ExportError> {
        let path = self.write(artifact).map_err(|e| ExportError::DownloadRejected {
            filename: artifact.filename.clone(),
            reason: format!("{} ({})", e, display_dir(&self.dir)),
        })?;
        log::debug!("wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

fn display_dir(dir: &Path) -> String {
    if dir.as_os_str().is_empty() {
        ".".to_string()
    } else {
        dir.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprint_pulse::ExportFormat;

    fn artifact() -> ExportArtifact {
        ExportArtifact {
            filename: "sprint_report.pdf".to_string(),
            format: ExportFormat::Document,
            bytes: b"%PDF-1.3".to_vec(),
        }
    }

    #[test]
    fn test_writes_into_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("reports").join("dec");
        let mut sink = DirectorySink::new(&dir);

        sink.deliver(&artifact()).unwrap();

        let written = dir.join("sprint_report.pdf");
        assert_eq!(sink.written(), &[written.clone()]);
        assert_eq!(fs::read(written).unwrap(), b"%PDF-1.3");
    }

    #[test]
    fn test_unwritable_target_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        // A file where the directory should be
        let blocker = tmp.path().join("out");
        fs::write(&blocker, b"").unwrap();
        let mut sink = DirectorySink::new(&blocker);

        let err = sink.deliver(&artifact()).unwrap_err();
        assert!(matches!(err, ExportError::DownloadRejected { .. }));
        assert!(sink.written().is_empty());
    }
}
