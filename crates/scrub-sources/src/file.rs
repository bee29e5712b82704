use std::path::PathBuf;

use async_trait::async_trait;
use scrub_core::{Result, ScrubError};
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::handler::HistorySource;

/// Replays an export captured earlier, e.g. with
/// `git log --all --full-history -p -U0 > history.txt`.
///
/// The path `-` reads standard input.
pub struct ExportFileSource {
    path: PathBuf,
}

impl ExportFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

#[async_trait]
impl HistorySource for ExportFileSource {
    fn describe(&self) -> String {
        if self.is_stdin() {
            "export from stdin".to_string()
        } else {
            format!("export file {}", self.path.display())
        }
    }

    async fn export(&self) -> Result<String> {
        let bytes = if self.is_stdin() {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .map_err(|e| ScrubError::io(&self.path, e))?;
            buf
        } else {
            tokio::fs::read(&self.path)
                .await
                .map_err(|e| ScrubError::io(&self.path, e))?
        };

        info!("Read {} bytes from {}", bytes.len(), self.describe());
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_saved_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");
        std::fs::write(&path, "commit abc\n    message\n").unwrap();

        let source = ExportFileSource::new(&path);
        let export = source.export().await.unwrap();
        assert_eq!(export, "commit abc\n    message\n");
    }

    #[tokio::test]
    async fn test_missing_export_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = ExportFileSource::new(dir.path().join("missing.txt"));

        let err = source.export().await.unwrap_err();
        assert!(matches!(err, ScrubError::Io { .. }));
    }

    #[test]
    fn test_dash_means_stdin() {
        assert_eq!(ExportFileSource::new("-").describe(), "export from stdin");
        assert!(ExportFileSource::new("h.txt").describe().contains("h.txt"));
    }
}
