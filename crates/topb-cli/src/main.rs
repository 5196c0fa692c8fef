//! topb CLI - Generates ToPb conversion methods for annotated Go structs
//!
//! Modes:
//! - `topb -in models/order.go -pb example.com/shop/gen/pb` - process the named
//!   files or directories
//! - `topb` - scan the current tree for `//go:generate topb -in <file>`
//!   directives and process every file they name
//!
//! Go-style single-dash long flags (`-in`, `-pb`) are accepted so the binary
//! can be invoked directly from a `go:generate` line.

use clap::Parser;
use std::ffi::OsString;
use tracing_subscriber::EnvFilter;

mod generate;

#[derive(Parser)]
#[command(name = "topb")]
#[command(author, version, about = "Generate ToPb conversion methods for annotated Go structs", long_about = None)]
struct Cli {
    #[command(flatten)]
    generate: generate::GenerateArgs,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(go_style_args(std::env::args_os()));

    init_logging(cli.verbose);

    generate::run(&cli.generate)
}

/// Logs go to stderr; stdout carries the per-file report.
///
/// `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Rewrite Go-style `-flag` spellings of the long options to `--flag`
fn go_style_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(flag) = text.strip_prefix('-').filter(|f| !f.starts_with('-')) else {
                return arg;
            };
            let name = flag.split_once('=').map_or(flag, |(name, _)| name);
            if generate::LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}
