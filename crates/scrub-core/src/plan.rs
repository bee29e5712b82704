//! Remediation planner
//!
//! Turns matches into `git-filter-repo` invocations:
//!
//! - files whose *name* matched and still exist get `--path-rename`
//! - files gone from the working tree get `--invert-paths --path`
//! - files still present with content matches get `--replace-text`
//! - matching commits get `--replace-message`
//!
//! The last two need a replacement map; a lookup-only scan just lists them.
//! A lookup term has an empty replacement, so its renames strip the term.
//! Everything here is pure: no I/O, same input gives the same text.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::aggregate::Aggregation;
use crate::classify::FileClassification;
use crate::terms::TermSet;

pub const DEFAULT_REWRITE_TOOL: &str = "git-filter-repo";

/// `--path-rename FROM:TO`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// A file or commit with the sorted list of terms it matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityMatch {
    pub name: String,
    pub terms: Vec<String>,
}

impl EntityMatch {
    fn new<'a>(name: &str, terms: impl IntoIterator<Item = &'a String>) -> Self {
        let mut terms: Vec<String> = terms.into_iter().cloned().collect();
        terms.sort();
        terms.dedup();
        Self {
            name: name.to_string(),
            terms,
        }
    }

    /// Terms joined for display, e.g. `alpha, mid, zeta`
    pub fn terms_string(&self) -> String {
        self.terms.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationPlan {
    pub tool: String,
    pub renames: Vec<Rename>,
    /// Files missing from the working tree, dropped with `--invert-paths`
    pub deleted: Vec<EntityMatch>,
    /// Files still present whose contents matched
    pub surviving: Vec<EntityMatch>,
    pub commits: Vec<EntityMatch>,
    pub replace_text: Option<PathBuf>,
    pub replace_message: Option<PathBuf>,
}

impl RemediationPlan {
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
            && self.deleted.is_empty()
            && self.surviving.is_empty()
            && self.commits.is_empty()
    }
}

pub struct Planner {
    tool: String,
}

impl Planner {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    pub fn plan(
        &self,
        aggregation: &Aggregation,
        classification: &FileClassification,
        terms: &TermSet,
    ) -> RemediationPlan {
        let replacement_file = terms.replacement_file().map(|p| p.to_path_buf());

        let renames = aggregation
            .names
            .entities()
            .filter(|path| !classification.is_deleted(path))
            .filter_map(|path| rename_for(path, terms))
            .collect();

        let deleted = aggregation
            .files()
            .into_iter()
            .filter(|path| classification.is_deleted(path))
            .map(|path| {
                let terms: BTreeSet<&String> = aggregation
                    .content
                    .terms(path)
                    .into_iter()
                    .chain(aggregation.names.terms(path))
                    .flatten()
                    .collect();
                EntityMatch::new(path, terms)
            })
            .collect();

        let surviving: Vec<EntityMatch> = aggregation
            .content
            .iter()
            .filter(|(path, _)| !classification.is_deleted(path))
            .map(|(path, terms)| EntityMatch::new(path, terms))
            .collect();

        let commits: Vec<EntityMatch> = aggregation
            .commits
            .iter()
            .map(|(id, terms)| EntityMatch::new(id, terms))
            .collect();

        RemediationPlan {
            tool: self.tool.clone(),
            renames,
            deleted,
            replace_text: replacement_file.clone().filter(|_| !surviving.is_empty()),
            surviving,
            replace_message: replacement_file.filter(|_| !commits.is_empty()),
            commits,
        }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(DEFAULT_REWRITE_TOOL)
    }
}

/// Apply every term found in `path`, in term order.
fn rename_for(path: &str, terms: &TermSet) -> Option<Rename> {
    let mut candidate = path.to_string();
    for (old, new) in terms.iter() {
        if path.contains(old) {
            candidate = candidate.replace(old, new);
        }
    }

    (candidate != path).then(|| Rename {
        from: path.to_string(),
        to: candidate,
    })
}

/// Writes `head` and `args` as one shell command, one argument per line.
fn write_command(f: &mut fmt::Formatter<'_>, head: &str, args: &[String]) -> fmt::Result {
    if args.is_empty() {
        return writeln!(f, "{}", head);
    }
    writeln!(f, "{} \\", head)?;
    for (i, arg) in args.iter().enumerate() {
        if i + 1 < args.len() {
            writeln!(f, "  {} \\", arg)?;
        } else {
            writeln!(f, "  {}", arg)?;
        }
    }
    Ok(())
}

fn write_matches(f: &mut fmt::Formatter<'_>, header: &str, matches: &[EntityMatch]) -> fmt::Result {
    writeln!(f, "{}", header)?;
    for m in matches {
        writeln!(f, "  {} matches {}", m.name, m.terms_string())?;
    }
    Ok(())
}

impl fmt::Display for RemediationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.renames.is_empty() {
            let args: Vec<String> = self
                .renames
                .iter()
                .map(|r| format!("--path-rename {}:{}", r.from, r.to))
                .collect();
            write_command(f, &self.tool, &args)?;
        }

        if !self.deleted.is_empty() {
            write_matches(f, "Deleted files:", &self.deleted)?;
            let args: Vec<String> = self
                .deleted
                .iter()
                .map(|m| format!("--path {}", m.name))
                .collect();
            write_command(f, &format!("{} --invert-paths", self.tool), &args)?;
        }

        if !self.surviving.is_empty() {
            write_matches(f, "Not deleted files:", &self.surviving)?;
            if let Some(file) = &self.replace_text {
                writeln!(f, "{} --replace-text {}", self.tool, file.display())?;
            }
        }

        if !self.commits.is_empty() {
            write_matches(f, "Matching commits:", &self.commits)?;
            if let Some(file) = &self.replace_message {
                writeln!(f, "{} --replace-message {}", self.tool, file.display())?;
            }
        }

        Ok(())
    }
}
