//! Output file naming and writing

use crate::error::{TopbError, TopbResult};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Prefix given to every generated file name
pub const OUTPUT_PREFIX: &str = "autogen_topb_";

/// Output path for an input file: `dir/Foo.go` becomes
/// `dir/autogen_topb_Foo.go`
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match input.extension() {
        Some(ext) => format!("{OUTPUT_PREFIX}{stem}.{}", ext.to_string_lossy()),
        None => format!("{OUTPUT_PREFIX}{stem}"),
    };

    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Whether `path` names a file this tool generated
pub fn is_generated(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with(OUTPUT_PREFIX))
}

/// Replace the contents of `path` with `contents`
pub fn write_artifact(path: &Path, contents: &str) -> TopbResult<()> {
    let to_write_error = |source| TopbError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(to_write_error)?;
    file.write_all(contents.as_bytes()).map_err(to_write_error)?;
    file.flush().map_err(to_write_error)?;

    Ok(())
}

/// Delete a previously generated output.
///
/// Returns `false` when there was nothing to delete.
pub fn remove_stale(path: &Path) -> TopbResult<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(TopbError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}
