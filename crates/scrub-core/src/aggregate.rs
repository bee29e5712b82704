//! Match aggregation over a history stream
//!
//! Every line is tested against every term once, so a scan costs
//! O(lines × terms) and never looks back. Matches collapse into sets: a term
//! seen a thousand times in one file is recorded once for that file.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use crate::filter::PathFilter;
use crate::parser::{HistoryStream, LineRecord};
use crate::terms::TermSet;

/// Options that change how lines are matched
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub case_insensitive: bool,
    /// Files matching these globs are left out of the file mappings
    pub ignore: PathFilter,
}

/// Entity (file path or commit id) to the set of terms found for it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchRecord {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl MatchRecord {
    pub fn insert(&mut self, entity: &str, term: &str) {
        if let Some(terms) = self.entries.get_mut(entity) {
            if !terms.contains(term) {
                terms.insert(term.to_string());
            }
            return;
        }
        self.entries
            .entry(entity.to_string())
            .or_default()
            .insert(term.to_string());
    }

    pub fn terms(&self, entity: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(entity)
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.entries.contains_key(entity)
    }

    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of one pass over an export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    /// Terms found in diff bodies, keyed by file
    pub content: MatchRecord,
    /// Terms found in `diff --git` headers, keyed by file
    pub names: MatchRecord,
    /// Terms found in commit headers and messages, keyed by commit
    pub commits: MatchRecord,
    /// Number of lines read
    pub lines: usize,
}

impl Aggregation {
    /// Every file that appears in either file mapping
    pub fn files(&self) -> BTreeSet<&str> {
        self.content.entities().chain(self.names.entities()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.names.is_empty() && self.commits.is_empty()
    }
}

/// Substring matcher honoring the configured case mode
struct Matcher<'t> {
    /// (term as reported, term as compared)
    terms: Vec<(&'t str, Cow<'t, str>)>,
    case_insensitive: bool,
}

impl<'t> Matcher<'t> {
    fn new(terms: &'t TermSet, case_insensitive: bool) -> Self {
        let terms = terms
            .keys()
            .map(|term| {
                let needle = if case_insensitive {
                    Cow::Owned(term.to_lowercase())
                } else {
                    Cow::Borrowed(term)
                };
                (term, needle)
            })
            .collect();

        Self {
            terms,
            case_insensitive,
        }
    }

    fn matches<'l>(&'l self, line: &'l str) -> impl Iterator<Item = &'t str> + 'l {
        let haystack = if self.case_insensitive {
            Cow::Owned(line.to_lowercase())
        } else {
            Cow::Borrowed(line)
        };

        self.terms
            .iter()
            .filter(move |(_, needle)| haystack.contains(&**needle))
            .map(|(term, _)| *term)
    }
}

/// Accumulates matches from line records
pub struct MatchAggregator<'t> {
    matcher: Matcher<'t>,
    ignore: PathFilter,
    result: Aggregation,
}

impl<'t> MatchAggregator<'t> {
    pub fn new(terms: &'t TermSet, options: &ScanOptions) -> Self {
        Self {
            matcher: Matcher::new(terms, options.case_insensitive),
            ignore: options.ignore.clone(),
            result: Aggregation::default(),
        }
    }

    pub fn push(&mut self, record: &LineRecord<'_>) {
        self.result.lines += 1;

        if record.context.is_empty() {
            return;
        }

        let mut terms = self.matcher.matches(record.line).peekable();
        if terms.peek().is_none() {
            return;
        }

        let file = record
            .context
            .file()
            .filter(|path| !self.ignore.is_ignored(path));
        let commit = record.context.commit();

        for term in terms {
            if let Some(path) = file {
                if record.boundary {
                    self.result.names.insert(path, term);
                } else {
                    self.result.content.insert(path, term);
                }
            }
            if let Some(id) = commit {
                self.result.commits.insert(id, term);
            }
        }
    }

    pub fn finish(self) -> Aggregation {
        debug!(
            "Aggregated {} lines: {} content files, {} name files, {} commits",
            self.result.lines,
            self.result.content.len(),
            self.result.names.len(),
            self.result.commits.len()
        );
        self.result
    }
}

/// Parse an export and aggregate its matches in one pass
pub fn aggregate(export: &str, terms: &TermSet, options: &ScanOptions) -> Aggregation {
    let mut aggregator = MatchAggregator::new(terms, options);
    for record in HistoryStream::new(export) {
        aggregator.push(&record);
    }
    aggregator.finish()
}
