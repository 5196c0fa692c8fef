//! Input discovery.
//!
//! Two strategies feed the same pipeline:
//!
//! - [`Discovery::Explicit`]: paths named on the command line. Directories
//!   expand to the Go files they directly contain.
//! - [`Discovery::DirectiveScan`]: a recursive walk that reads
//!   `//go:generate topb -in <path>` directives to learn which files to
//!   process.
//!
//! Both produce [`SourceInput`]s; parsing happens later, one file at a time,
//! through [`SourceUnit::load`](crate::ir::SourceUnit::load).

use crate::directive::{DirectiveLine, parse_directive};
use crate::error::{TopbError, TopbResult};
use crate::writer::is_generated;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// How inputs are located
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// Files or directories given explicitly
    Explicit(Vec<PathBuf>),

    /// Walk `root` and follow `go:generate` directives
    DirectiveScan { root: PathBuf },
}

/// One file to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    /// Go source file
    pub path: PathBuf,

    /// Wire import requested by a directive, overriding the configured one
    pub wire_import: Option<String>,
}

/// Inputs found by a discovery pass, plus per-file failures met on the way
#[derive(Debug, Default)]
pub struct Discovered {
    pub inputs: Vec<SourceInput>,
    pub errors: Vec<TopbError>,
}

impl SourceInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            wire_import: None,
        }
    }
}

impl Discovery {
    /// Enumerate inputs.
    ///
    /// Fails only when a scan root is unusable; problems with individual
    /// files are collected in [`Discovered::errors`].
    pub fn discover(&self) -> TopbResult<Discovered> {
        match self {
            Discovery::Explicit(paths) => Ok(discover_explicit(paths)),
            Discovery::DirectiveScan { root } => discover_directives(root),
        }
    }
}

fn discover_explicit(paths: &[PathBuf]) -> Discovered {
    let mut found = Discovered::default();
    let mut seen = BTreeSet::new();

    for path in paths {
        if !path.is_dir() {
            // Missing files fall through and fail with a read error on load
            seen.insert(normalize(path));
            continue;
        }

        match std::fs::read_dir(path) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let file = entry.path();
                    if file.is_file() && is_candidate_source(&file) {
                        seen.insert(normalize(&file));
                    }
                }
            }
            Err(source) => found.errors.push(TopbError::Read {
                path: path.clone(),
                source,
            }),
        }
    }

    found.inputs = seen.into_iter().map(SourceInput::new).collect();
    debug!(count = found.inputs.len(), "discovered explicit inputs");
    found
}

fn discover_directives(root: &Path) -> TopbResult<Discovered> {
    if !root.is_dir() {
        return Err(TopbError::Walk {
            path: root.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut found = Discovered::default();
    let mut targets: BTreeMap<PathBuf, Option<String>> = BTreeMap::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                found.errors.push(err.into());
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !is_go_file(path) || is_generated(path) {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) => {
                found.errors.push(TopbError::Read {
                    path: path.to_path_buf(),
                    source,
                });
                continue;
            }
        };

        let dir = path.parent().unwrap_or(root);
        for (index, line) in content.lines().enumerate() {
            match parse_directive(line) {
                DirectiveLine::Unrelated => {}
                DirectiveLine::Malformed(reason) => {
                    debug!(file = %path.display(), line = index + 1, %reason, "ignoring malformed directive");
                }
                DirectiveLine::Directive(directive) => {
                    let target = normalize(&dir.join(&directive.input));
                    match targets.entry(target) {
                        Entry::Vacant(slot) => {
                            debug!(file = %path.display(), input = %slot.key().display(), "found directive");
                            slot.insert(directive.wire_import);
                        }
                        Entry::Occupied(slot) => {
                            if directive.wire_import.is_some() && *slot.get() != directive.wire_import {
                                warn!(
                                    input = %slot.key().display(),
                                    "conflicting -pb values for the same input; keeping the first"
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    found.inputs = targets
        .into_iter()
        .map(|(path, wire_import)| SourceInput { path, wire_import })
        .collect();
    debug!(count = found.inputs.len(), "discovered directive inputs");
    Ok(found)
}

/// Drop interior `.` components so equivalent spellings dedupe
fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

fn is_go_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "go")
}

/// Go files that may carry annotated types when a directory is named
/// explicitly: no tests, no previous outputs
fn is_candidate_source(path: &Path) -> bool {
    is_go_file(path)
        && !is_generated(path)
        && !path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().ends_with("_test.go"))
}

/// Directories the go tool itself ignores, plus vendored code
fn is_ignored_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.starts_with('_') || name == "vendor" || name == "testdata"
}
