use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrubError {
    /// No search term was supplied; raised before any export runs.
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The history export could not be spawned or exited non-zero.
    #[error("`{command}` failed: {reason}\n{output}")]
    ExternalCommand {
        command: String,
        output: String,
        reason: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrubError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_command_message_carries_output() {
        let err = ScrubError::ExternalCommand {
            command: "git log".to_string(),
            output: "fatal: not a git repository".to_string(),
            reason: "exit status: 128".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("git log"));
        assert!(message.contains("exit status: 128"));
        assert!(message.contains("fatal: not a git repository"));
    }

    #[test]
    fn test_io_message_names_path() {
        let err = ScrubError::io(
            "replacements.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        );

        assert!(err.to_string().contains("replacements.txt"));
        assert!(err.to_string().contains("No such file"));
    }
}
