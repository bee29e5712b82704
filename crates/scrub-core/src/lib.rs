//! Core scanning logic for scrub
//!
//! This crate contains:
//! - Term sets and the `OLD==>NEW` replacement-map format
//! - The history stream parser (commit/file context from line prefixes)
//! - Match aggregation, deletion classification and remediation planning

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod filter;
pub mod parser;
pub mod plan;
pub mod scan;
pub mod terms;

pub use aggregate::{Aggregation, MatchAggregator, MatchRecord, ScanOptions, aggregate};
pub use classify::FileClassification;
pub use error::{Result, ScrubError};
pub use filter::PathFilter;
pub use parser::{HistoryStream, LineRecord, ParseContext};
pub use plan::{DEFAULT_REWRITE_TOOL, EntityMatch, Planner, RemediationPlan, Rename};
pub use scan::{ScanReport, scan};
pub use terms::{TermSet, TermSource, parse_replacement_map};
