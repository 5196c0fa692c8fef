//! Argument handling and reporting for a generation run

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use topb_core::config::CONFIG_FILE_NAME;
use topb_core::{ConfigFile, Discovery, Driver, GenerateConfig};
use tracing::debug;

/// Long options that may also be spelled with a single dash, as Go's
/// `flag` package allows
pub const LONG_FLAGS: &[&str] = &[
    "in",
    "pb",
    "root",
    "config",
    "alias",
    "receiver",
    "method",
    "marker",
    "header",
    "no-header",
    "prune-stale",
];

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Go file or directory to process (repeatable). Without it, --root is
    /// scanned for go:generate directives
    #[arg(short = 'i', long = "in", value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Import path of the wire (protobuf) package
    #[arg(short = 'p', long = "pb", value_name = "IMPORT")]
    pub wire_import: Option<String>,

    /// Directory scanned for go:generate directives
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Config file (default: ./topb.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Package qualifier for wire types (default: pb)
    #[arg(long, value_name = "NAME")]
    pub alias: Option<String>,

    /// Receiver name of the generated method (default: m)
    #[arg(long, value_name = "NAME")]
    pub receiver: Option<String>,

    /// Name of the generated method (default: ToPb)
    #[arg(long, value_name = "NAME")]
    pub method: Option<String>,

    /// Documentation marker requesting generation (default: gen:topb)
    #[arg(long, value_name = "TOKEN")]
    pub marker: Option<String>,

    /// Write a "DO NOT EDIT" header (default in directive-scan mode)
    #[arg(long, overrides_with = "no_header")]
    pub header: bool,

    /// Omit the "DO NOT EDIT" header
    #[arg(long, overrides_with = "header")]
    pub no_header: bool,

    /// Delete a file's previous output when it has no marked types left
    #[arg(long)]
    pub prune_stale: bool,
}

impl GenerateArgs {
    /// Explicit inputs win; otherwise scan for directives
    pub fn discovery(&self) -> Discovery {
        if self.inputs.is_empty() {
            Discovery::DirectiveScan {
                root: self.root.clone(),
            }
        } else {
            Discovery::Explicit(self.inputs.clone())
        }
    }

    /// Defaults, then the config file, then flags
    pub fn resolve_config(&self, default_config_file: &Path) -> Result<GenerateConfig> {
        let mut config = GenerateConfig {
            header: self.inputs.is_empty(),
            ..GenerateConfig::default()
        };

        let file = match &self.config {
            Some(path) => Some(path.as_path()),
            None if default_config_file.is_file() => Some(default_config_file),
            None => None,
        };
        if let Some(path) = file {
            let file = ConfigFile::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            config = file.apply(config);
        }

        if let Some(import) = &self.wire_import {
            config.wire_import = Some(import.clone());
        }
        if let Some(alias) = &self.alias {
            config.wire_alias = alias.clone();
        }
        if let Some(receiver) = &self.receiver {
            config.receiver = receiver.clone();
        }
        if let Some(method) = &self.method {
            config.method_name = method.clone();
        }
        if let Some(marker) = &self.marker {
            config.marker = marker.clone();
        }
        if self.header {
            config.header = true;
        }
        if self.no_header {
            config.header = false;
        }
        if self.prune_stale {
            config.prune_stale = true;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// Run generation and print one line per input.
///
/// Per-file failures are printed and do not change the exit status.
pub fn run(args: &GenerateArgs) -> Result<()> {
    let config = args.resolve_config(Path::new(CONFIG_FILE_NAME))?;
    let discovery = args.discovery();
    debug!(?discovery, ?config, "starting generation");

    let report = Driver::new(config)
        .run(&discovery)
        .context("Failed to discover inputs")?;

    for file in &report.files {
        println!("{file}");
    }

    if report.files.is_empty() {
        println!("Nothing to generate");
    }

    Ok(())
}
