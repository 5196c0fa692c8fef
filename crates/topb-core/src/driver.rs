//! Per-file generation pipeline.
//!
//! Each input is loaded, matched, emitted and written independently; a
//! failure on one file is recorded in its [`FileReport`] and the run moves on
//! to the next.

use crate::config::GenerateConfig;
use crate::emitter::GeneratedArtifact;
use crate::error::{TopbError, TopbResult};
use crate::ir::{SourceUnit, TypeDeclaration};
use crate::loader::{Discovery, SourceInput};
use crate::matcher::is_eligible;
use crate::writer::{output_path, remove_stale, write_artifact};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Runs generation with one configuration
#[derive(Debug, Clone)]
pub struct Driver {
    config: GenerateConfig,
}

/// What happened to one input
#[derive(Debug)]
pub enum Outcome {
    /// Output written with `types` conversion methods
    Written { output: PathBuf, types: usize },

    /// No eligible types; nothing written
    NoEligibleTypes,

    /// No eligible types and the previous output was deleted
    Pruned { output: PathBuf },

    /// Processing failed; other inputs are unaffected
    Failed(TopbError),
}

/// Result for one input file
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: Outcome,
}

/// Results for a whole run, in processing order
#[derive(Debug, Default)]
pub struct RunReport {
    pub files: Vec<FileReport>,
}

impl Driver {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Discover inputs and process each of them.
    ///
    /// Only an unusable discovery root fails the run as a whole.
    pub fn run(&self, discovery: &Discovery) -> TopbResult<RunReport> {
        let discovered = discovery.discover()?;
        let mut report = RunReport::default();

        for err in discovered.errors {
            warn!(error = %err, "skipping unreadable input");
            report.files.push(FileReport {
                input: err.path().map(PathBuf::from).unwrap_or_default(),
                outcome: Outcome::Failed(err),
            });
        }

        for input in &discovered.inputs {
            report.files.push(self.process(input));
        }

        info!(
            files = report.files.len(),
            written = report.written(),
            failed = report.failed(),
            "generation finished"
        );
        Ok(report)
    }

    /// Generate output for a single input
    pub fn process(&self, input: &SourceInput) -> FileReport {
        let outcome = match self.generate(input) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(input = %input.path.display(), error = %err, "generation failed");
                Outcome::Failed(err)
            }
        };

        FileReport {
            input: input.path.clone(),
            outcome,
        }
    }

    fn generate(&self, input: &SourceInput) -> TopbResult<Outcome> {
        let unit = SourceUnit::load(&input.path)?;
        let output = output_path(&unit.path);

        let eligible: Vec<&TypeDeclaration> = unit
            .types
            .iter()
            .filter(|decl| is_eligible(decl, &self.config.marker))
            .collect();

        if eligible.is_empty() {
            debug!(input = %unit.path.display(), "no eligible types");
            if self.config.prune_stale && remove_stale(&output)? {
                info!(output = %output.display(), "removed stale output");
                return Ok(Outcome::Pruned { output });
            }
            return Ok(Outcome::NoEligibleTypes);
        }

        let wire_import = input
            .wire_import
            .as_deref()
            .or(self.config.wire_import.as_deref())
            .ok_or_else(|| TopbError::MissingWireImport {
                path: unit.path.clone(),
            })?;

        let artifact = GeneratedArtifact::build(&unit.package, &eligible, wire_import, &self.config)?;
        write_artifact(&output, &artifact.render())?;

        info!(
            input = %unit.path.display(),
            output = %output.display(),
            types = eligible.len(),
            "generated conversion methods"
        );
        Ok(Outcome::Written {
            output,
            types: eligible.len(),
        })
    }
}

impl RunReport {
    /// Number of outputs written
    pub fn written(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, Outcome::Written { .. }))
            .count()
    }

    /// Number of inputs that failed
    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, Outcome::Failed(_)))
            .count()
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Written { output, types } => {
                let noun = if *types == 1 { "type" } else { "types" };
                write!(f, "generated {} ({types} {noun})", output.display())
            }
            Outcome::NoEligibleTypes => {
                write!(f, "skipped {}: no eligible types", self.input.display())
            }
            Outcome::Pruned { output } => write!(f, "removed stale {}", output.display()),
            Outcome::Failed(err) => write!(f, "failed {}: {err}", self.input.display()),
        }
    }
}

#[cfg(test)]
#[path = "driver/driver_tests.rs"]
mod driver_tests;
