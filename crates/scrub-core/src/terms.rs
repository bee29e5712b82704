//! Search terms and the replacement-map file format
//!
//! A replacement map holds one `OLD==>NEW` entry per line, the same format
//! `git-filter-repo --replace-text` consumes. Lines without exactly one
//! separator are skipped without an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::{Result, ScrubError};

pub const SEPARATOR: &str = "==>";

/// Where the terms came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TermSource {
    /// A single `--lookup` term, replaced with nothing
    Lookup,
    /// A replacement-map file
    MapFile(PathBuf),
}

/// Search terms keyed by the string to find, each with its replacement
#[derive(Debug, Clone)]
pub struct TermSet {
    terms: BTreeMap<String, String>,
    source: TermSource,
}

impl TermSet {
    /// Pick the term source the way the CLI does: a map file wins over a lookup.
    pub fn resolve(map_file: Option<&Path>, lookup: &str) -> Result<Self> {
        match map_file {
            Some(path) => Self::load_map(path),
            None if !lookup.is_empty() => Ok(Self::from_lookup(lookup)),
            None => Err(ScrubError::Usage(
                "search term or replacement file not specified".to_string(),
            )),
        }
    }

    pub fn from_lookup(term: impl Into<String>) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(term.into(), String::new());
        Self {
            terms,
            source: TermSource::Lookup,
        }
    }

    /// Read and parse a replacement-map file
    pub fn load_map(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ScrubError::io(path, e))?;
        let (terms, skipped) = parse_replacement_map(&contents);

        debug!(
            "Loaded {} terms from {:?} ({} lines skipped)",
            terms.len(),
            path,
            skipped
        );

        Ok(Self {
            terms,
            source: TermSource::MapFile(path.to_path_buf()),
        })
    }

    pub fn from_map(terms: BTreeMap<String, String>, path: impl Into<PathBuf>) -> Self {
        Self {
            terms,
            source: TermSource::MapFile(path.into()),
        }
    }

    /// The map file to hand to the rewrite tool, if the terms carry replacements
    pub fn replacement_file(&self) -> Option<&Path> {
        match &self.source {
            TermSource::MapFile(path) => Some(path),
            TermSource::Lookup => None,
        }
    }

    pub fn replacement(&self, term: &str) -> Option<&str> {
        self.terms.get(term).map(String::as_str)
    }

    /// Terms in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Parse `OLD==>NEW` lines, returning the entries and the number of lines skipped.
///
/// Blank lines are ignored and not counted. A line whose `OLD` side is empty
/// would match every line of history, so it is skipped as well.
pub fn parse_replacement_map(contents: &str) -> (BTreeMap<String, String>, usize) {
    let mut terms = BTreeMap::new();
    let mut skipped = 0;

    for line in contents.lines() {
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split(SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(old), Some(new), None) if !old.is_empty() => {
                terms.insert(old.to_string(), new.to_string());
            }
            _ => skipped += 1,
        }
    }

    (terms, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_single_entry() {
        let (terms, skipped) = parse_replacement_map("foo==>bar");
        assert_eq!(terms.get("foo"), Some(&"bar".to_string()));
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let (terms, skipped) = parse_replacement_map("foo\na==>b==>c\n\nkeep==>kept\n");
        assert_eq!(terms.len(), 1);
        assert_eq!(terms.get("keep"), Some(&"kept".to_string()));
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_parse_allows_empty_replacement() {
        let (terms, _) = parse_replacement_map("password==>\n");
        assert_eq!(terms.get("password"), Some(&String::new()));
    }

    #[test]
    fn test_parse_skips_empty_term() {
        let (terms, skipped) = parse_replacement_map("==>bar\n");
        assert!(terms.is_empty());
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_parse_handles_crlf() {
        let (terms, _) = parse_replacement_map("foo==>bar\r\nbaz==>qux\r\n");
        assert_eq!(terms.get("foo"), Some(&"bar".to_string()));
        assert_eq!(terms.get("baz"), Some(&"qux".to_string()));
    }

    #[test]
    fn test_resolve_requires_a_term() {
        let err = TermSet::resolve(None, "").unwrap_err();
        assert!(matches!(err, ScrubError::Usage(_)));
    }

    #[test]
    fn test_resolve_lookup_has_no_replacements() {
        let terms = TermSet::resolve(None, "token").unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms.replacement("token"), Some(""));
        assert!(terms.replacement_file().is_none());
    }

    #[test]
    fn test_resolve_map_file_supersedes_lookup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "foo==>bar").unwrap();
        writeln!(file, "secret==>***").unwrap();

        let terms = TermSet::resolve(Some(file.path()), "ignored").unwrap();
        assert_eq!(terms.keys().collect::<Vec<_>>(), vec!["foo", "secret"]);
        assert_eq!(terms.replacement_file(), Some(file.path()));
        assert!(terms.replacement("ignored").is_none());
    }

    #[test]
    fn test_resolve_missing_map_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let err = TermSet::resolve(Some(&missing), "").unwrap_err();
        assert!(matches!(err, ScrubError::Io { .. }));
    }
}
