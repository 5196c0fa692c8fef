//! Generator configuration
//!
//! Settings come from an optional `topb.toml` file and are then overridden
//! by command-line flags.

use crate::error::{TopbError, TopbResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "topb.toml";

/// Marker token that requests generation for a type
pub const DEFAULT_MARKER: &str = "gen:topb";

/// Settings shared by every unit processed in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Go import path of the wire (protobuf) package
    pub wire_import: Option<String>,

    /// Package qualifier used for wire types in generated code
    pub wire_alias: String,

    /// Receiver name of the generated method
    pub receiver: String,

    /// Name of the generated method
    pub method_name: String,

    /// Token searched for in type documentation
    pub marker: String,

    /// Emit a "Code generated ... DO NOT EDIT." header
    pub header: bool,

    /// Delete a unit's previous output when it no longer has eligible types
    pub prune_stale: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            wire_import: None,
            wire_alias: "pb".to_string(),
            receiver: "m".to_string(),
            method_name: "ToPb".to_string(),
            marker: DEFAULT_MARKER.to_string(),
            header: false,
            prune_stale: false,
        }
    }
}

/// Contents of a `topb.toml` file.
///
/// Every key is optional so a file can set only what differs from the
/// command-line defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub wire_import: Option<String>,
    pub wire_alias: Option<String>,
    pub receiver: Option<String>,
    pub method_name: Option<String>,
    pub marker: Option<String>,
    pub header: Option<bool>,
    pub prune_stale: Option<bool>,
}

impl ConfigFile {
    /// Load a config file from disk
    pub fn from_file(path: impl AsRef<Path>) -> TopbResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TopbError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        Self::from_str(&content)
    }

    /// Parse a config file from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> TopbResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply the file's values on top of `base`
    pub fn apply(&self, mut base: GenerateConfig) -> GenerateConfig {
        if let Some(import) = &self.wire_import {
            base.wire_import = Some(import.clone());
        }
        if let Some(alias) = &self.wire_alias {
            base.wire_alias = alias.clone();
        }
        if let Some(receiver) = &self.receiver {
            base.receiver = receiver.clone();
        }
        if let Some(method) = &self.method_name {
            base.method_name = method.clone();
        }
        if let Some(marker) = &self.marker {
            base.marker = marker.clone();
        }
        if let Some(header) = self.header {
            base.header = header;
        }
        if let Some(prune) = self.prune_stale {
            base.prune_stale = prune;
        }
        base
    }
}

impl GenerateConfig {
    /// Reject settings that would produce uncompilable output
    pub fn validate(&self) -> TopbResult<()> {
        for (key, value) in [
            ("wire_alias", &self.wire_alias),
            ("receiver", &self.receiver),
            ("method_name", &self.method_name),
        ] {
            if !is_go_identifier(value) {
                return Err(TopbError::Config(format!(
                    "{key} must be a Go identifier, got {value:?}"
                )));
            }
        }

        if self.marker.trim().is_empty() {
            return Err(TopbError::Config("marker cannot be empty".to_string()));
        }

        if let Some(import) = &self.wire_import {
            if import.is_empty() || import.contains(char::is_whitespace) || import.contains('"')
            {
                return Err(TopbError::Config(format!(
                    "wire_import is not a valid import path: {import:?}"
                )));
            }
        }

        Ok(())
    }
}

/// Check that `s` is a valid Go identifier
pub fn is_go_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}
