//! `//go:generate topb ...` directive parsing
//!
//! In directive-scan mode the generator learns its inputs from comments such
//! as
//!
//! ```go
//! //go:generate topb -in order.go -pb example.com/shop/gen/pb
//! ```
//!
//! Flags may be spelled `-in x`, `-in=x`, `--in x` or `--in=x`, matching Go's
//! `flag` package. The `-in` path is relative to the directory of the file
//! carrying the directive.

use std::path::Path;

const GENERATE_PREFIX: &str = "//go:generate";
const TOOL_NAME: &str = "topb";

/// A recognized generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Input file as written in the directive
    pub input: String,

    /// Wire package import path, if the directive names one
    pub wire_import: Option<String>,
}

/// Classification of one source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveLine {
    /// Not a `go:generate` line for this tool
    Unrelated,

    /// A `go:generate topb` line that cannot be used, with the reason
    Malformed(String),

    /// A usable directive
    Directive(Directive),
}

/// Classify a single line of Go source
pub fn parse_directive(line: &str) -> DirectiveLine {
    let Some(rest) = line.trim_end().strip_prefix(GENERATE_PREFIX) else {
        return DirectiveLine::Unrelated;
    };
    if !rest.starts_with([' ', '\t']) {
        return DirectiveLine::Unrelated;
    }

    let mut args = rest.split_whitespace().map(unquote);
    let is_topb = args
        .next()
        .is_some_and(|tool| Path::new(tool).file_name().is_some_and(|n| n == TOOL_NAME));
    if !is_topb {
        return DirectiveLine::Unrelated;
    }

    let mut input = None;
    let mut wire_import = None;

    while let Some(arg) = args.next() {
        let Some(flag) = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) else {
            return DirectiveLine::Malformed(format!("unexpected argument {arg:?}"));
        };

        let (name, value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, args.next()),
        };

        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return DirectiveLine::Malformed(format!("flag -{name} needs a value"));
        };

        match name {
            "in" => input = Some(value.to_string()),
            "pb" => wire_import = Some(value.to_string()),
            other => return DirectiveLine::Malformed(format!("unknown flag -{other}")),
        }
    }

    match input {
        Some(input) => DirectiveLine::Directive(Directive { input, wire_import }),
        None => DirectiveLine::Malformed("missing -in".to_string()),
    }
}

/// Strip one pair of surrounding double quotes
fn unquote(arg: &str) -> &str {
    arg.strip_prefix('"')
        .and_then(|a| a.strip_suffix('"'))
        .unwrap_or(arg)
}
