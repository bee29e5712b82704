//! History stream parser
//!
//! Walks the text of `git log --all --full-history -p -U0` one line at a time
//! and tags every line with the commit or file it belongs to. There is no
//! structure in the export beyond line prefixes, so the parser only knows two
//! markers:
//!
//! ```text
//! commit <hash>                      -> context becomes Commit(hash)
//! diff --git a/<old> b/<new>         -> context becomes File(new), boundary line
//! ```
//!
//! Every other line inherits the context of the line before it. Commit
//! headers, author lines and message bodies therefore belong to the commit;
//! hunks and their headers belong to the file.

use std::str::Lines;

pub const FILE_MARKER: &str = "diff --git";
pub const COMMIT_MARKER: &str = "commit ";
const NEW_SIDE_TAG: &str = "b/";

/// Which entity the current line belongs to.
///
/// Entering a file leaves the commit and entering a commit leaves the file,
/// so both can never be set at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseContext<'a> {
    #[default]
    None,
    Commit(&'a str),
    File(&'a str),
}

impl<'a> ParseContext<'a> {
    pub fn commit(&self) -> Option<&'a str> {
        match self {
            Self::Commit(id) => Some(id),
            _ => None,
        }
    }

    pub fn file(&self) -> Option<&'a str> {
        match self {
            Self::File(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// One line of the export with the context active at that line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRecord<'a> {
    pub line: &'a str,
    pub context: ParseContext<'a>,
    /// True for the `diff --git` line that opened the current file
    pub boundary: bool,
}

/// Lazy iterator of [`LineRecord`]s over a borrowed export
pub struct HistoryStream<'a> {
    lines: Lines<'a>,
    context: ParseContext<'a>,
}

impl<'a> HistoryStream<'a> {
    pub fn new(export: &'a str) -> Self {
        Self {
            lines: export.lines(),
            context: ParseContext::None,
        }
    }
}

impl<'a> Iterator for HistoryStream<'a> {
    type Item = LineRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        let mut boundary = false;

        if line.starts_with(FILE_MARKER) {
            self.context = match file_from_diff_header(line) {
                "" => ParseContext::None,
                path => ParseContext::File(path),
            };
            boundary = true;
        } else if let Some(rest) = line.strip_prefix(COMMIT_MARKER) {
            self.context = match rest.split_whitespace().next() {
                Some(hash) => ParseContext::Commit(hash),
                None => ParseContext::None,
            };
        }

        Some(LineRecord {
            line,
            context: self.context,
            boundary,
        })
    }
}

/// New-side path of a `diff --git a/<old> b/<new>` header.
fn file_from_diff_header(line: &str) -> &str {
    let last = line.split(' ').next_back().unwrap_or_default();
    last.strip_prefix(NEW_SIDE_TAG).unwrap_or(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
commit 1111111111111111111111111111111111111111
Author: Dev <dev@example.com>
Date:   Mon Jan 1 00:00:00 2024 +0000

    add secret file

diff --git a/secret.txt b/secret.txt
new file mode 100644
--- /dev/null
+++ b/secret.txt
@@ -0,0 +1 @@
+token=abc
commit 2222222222222222222222222222222222222222
Author: Dev <dev@example.com>
";

    #[test]
    fn test_preamble_has_empty_context() {
        let records: Vec<_> = HistoryStream::new("warning: something\n\ncommit abc\n").collect();
        assert!(records[0].context.is_empty());
        assert!(records[1].context.is_empty());
        assert_eq!(records[2].context, ParseContext::Commit("abc"));
    }

    #[test]
    fn test_commit_then_file_transitions() {
        let records: Vec<_> = HistoryStream::new(EXPORT).collect();

        let commit = "1111111111111111111111111111111111111111";
        assert_eq!(records[0].context, ParseContext::Commit(commit));
        assert_eq!(records[4].line, "    add secret file");
        assert_eq!(records[4].context, ParseContext::Commit(commit));

        let header = &records[6];
        assert!(header.boundary);
        assert_eq!(header.context, ParseContext::File("secret.txt"));

        let body = &records[11];
        assert_eq!(body.line, "+token=abc");
        assert!(!body.boundary);
        assert_eq!(body.context.file(), Some("secret.txt"));
        assert_eq!(body.context.commit(), None);

        assert_eq!(
            records[12].context.commit(),
            Some("2222222222222222222222222222222222222222")
        );
        assert_eq!(records[12].context.file(), None);
    }

    #[test]
    fn test_only_diff_headers_are_boundaries() {
        let boundaries: Vec<_> = HistoryStream::new(EXPORT)
            .filter(|r| r.boundary)
            .map(|r| r.line)
            .collect();
        assert_eq!(boundaries, vec!["diff --git a/secret.txt b/secret.txt"]);
    }

    #[test]
    fn test_commit_with_decoration_uses_hash() {
        let records: Vec<_> = HistoryStream::new("commit abc123 (HEAD -> main, origin/main)\n").collect();
        assert_eq!(records[0].context, ParseContext::Commit("abc123"));
    }

    #[test]
    fn test_renamed_file_uses_new_side() {
        let records: Vec<_> = HistoryStream::new("diff --git a/old/name.rs b/new/name.rs\n").collect();
        assert_eq!(records[0].context, ParseContext::File("new/name.rs"));
    }

    #[test]
    fn test_indented_commit_word_is_not_a_marker() {
        let records: Vec<_> =
            HistoryStream::new("commit abc\n    commit message mentions commit def\n").collect();
        assert_eq!(records[1].context, ParseContext::Commit("abc"));
    }

    #[test]
    fn test_restartable_per_input() {
        let first: Vec<_> = HistoryStream::new(EXPORT).collect();
        let second: Vec<_> = HistoryStream::new(EXPORT).collect();
        assert_eq!(first, second);
    }
}
