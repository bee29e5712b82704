use std::path::PathBuf;

use async_trait::async_trait;
use scrub_core::{Result, ScrubError};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::handler::HistorySource;

/// All refs, full history, patches with zero context lines
pub const DEFAULT_EXPORT_ARGS: &[&str] = &[
    "log",
    "--all",
    "--full-history",
    "-p",
    "-U0",
    "--no-color",
];

/// Runs `git log` in a repository and returns its output
pub struct GitLogSource {
    repo: PathBuf,
    binary: String,
    args: Vec<String>,
}

impl GitLogSource {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self {
            repo: repo.into(),
            binary: "git".to_string(),
            args: DEFAULT_EXPORT_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    fn command_line(&self) -> String {
        let mut parts = vec![self.binary.as_str()];
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }

    fn failure(&self, output: String, reason: impl Into<String>) -> ScrubError {
        ScrubError::ExternalCommand {
            command: self.command_line(),
            output,
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl HistorySource for GitLogSource {
    fn describe(&self) -> String {
        format!("`{}` in {}", self.command_line(), self.repo.display())
    }

    async fn export(&self) -> Result<String> {
        let binary = which::which(&self.binary)
            .map_err(|e| self.failure(String::new(), format!("{} not found: {}", self.binary, e)))?;

        debug!("Running {}", self.describe());

        let output = Command::new(&binary)
            .args(&self.args)
            .current_dir(&self.repo)
            .output()
            .await
            .map_err(|e| self.failure(String::new(), e.to_string()))?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(self.failure(combined, output.status.to_string()));
        }

        let export = match String::from_utf8(output.stdout) {
            Ok(text) => text,
            Err(e) => {
                warn!("History export is not valid UTF-8, decoding lossily");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        info!("Exported {} bytes of history", export.len());
        Ok(export)
    }
}
