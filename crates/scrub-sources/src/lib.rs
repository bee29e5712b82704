//! History export sources
//!
//! A source produces the full text of a history export. The git source runs
//! the export command; the file source replays one captured earlier.

pub mod file;
pub mod git;
pub mod handler;

pub use file::ExportFileSource;
pub use git::GitLogSource;
pub use handler::HistorySource;
