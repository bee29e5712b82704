//! History source trait

use async_trait::async_trait;
use scrub_core::Result;

/// Anything that can hand back a complete history export as text
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Human-readable description for logs
    fn describe(&self) -> String;

    /// Produce the whole export, buffered in memory
    async fn export(&self) -> Result<String>;
}
