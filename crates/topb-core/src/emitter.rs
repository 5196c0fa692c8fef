//! Go source emission for conversion methods.
//!
//! For an eligible struct
//!
//! ```go
//! type Order struct {
//!     ID    int
//!     Total float64
//! }
//! ```
//!
//! the emitter produces
//!
//! ```go
//! func (m *Order) ToPb() *pb.Order {
//! 	return &pb.Order{
//! 		ID:    m.ID,
//! 		Total: m.Total,
//! 	}
//! }
//! ```
//!
//! Field values are aligned the way gofmt aligns composite literal keys, so
//! running gofmt over the output is a no-op for ordinary field names.
//! No type compatibility between the domain field and the wire field is
//! checked; mismatches surface when the generated file is compiled.

use crate::config::GenerateConfig;
use crate::error::{TopbError, TopbResult};
use crate::ir::{Field, TypeBody, TypeDeclaration};

/// First line of every file written in directive-scan mode
pub const GENERATED_HEADER: &str = "// Code generated by topb. DO NOT EDIT.";

/// Complete text of one output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Emit [`GENERATED_HEADER`] above the package clause
    pub header: bool,

    /// Package clause, copied from the input unit
    pub package: String,

    /// Import path of the wire package
    pub wire_import: String,

    /// Qualifier used for wire types
    pub wire_alias: String,

    /// One method per eligible type, in source order
    pub methods: Vec<String>,
}

impl GeneratedArtifact {
    /// Emit methods for `types` and collect them into one artifact
    pub fn build(
        package: &str,
        types: &[&TypeDeclaration],
        wire_import: &str,
        config: &GenerateConfig,
    ) -> TopbResult<Self> {
        let methods = types
            .iter()
            .map(|decl| emit_method(decl, config))
            .collect::<TopbResult<Vec<_>>>()?;

        Ok(GeneratedArtifact {
            header: config.header,
            package: package.to_string(),
            wire_import: wire_import.to_string(),
            wire_alias: config.wire_alias.clone(),
            methods,
        })
    }

    /// Render the artifact as Go source
    pub fn render(&self) -> String {
        let mut output = String::new();

        if self.header {
            output.push_str(GENERATED_HEADER);
            output.push_str("\n\n");
        }

        output.push_str(&format!("package {}\n\n", self.package));
        output.push_str(&import_line(&self.wire_import, &self.wire_alias));

        for method in &self.methods {
            output.push('\n');
            output.push_str(method);
        }

        output
    }
}

/// `import "path"`, or `import alias "path"` when the path's last element
/// differs from the alias
fn import_line(wire_import: &str, alias: &str) -> String {
    let last_segment = wire_import.rsplit('/').next().unwrap_or(wire_import);
    if last_segment == alias {
        format!("import \"{wire_import}\"\n")
    } else {
        format!("import {alias} \"{wire_import}\"\n")
    }
}

/// Emit the conversion method for one struct declaration
pub fn emit_method(decl: &TypeDeclaration, config: &GenerateConfig) -> TopbResult<String> {
    let TypeBody::Struct(fields) = &decl.body else {
        return Err(TopbError::NotAStruct {
            type_name: decl.name.clone(),
        });
    };

    if decl.has_type_params {
        return Err(TopbError::GenericType {
            type_name: decl.name.clone(),
        });
    }

    let names = copied_field_names(&decl.name, fields)?;

    Ok(render_method(
        &decl.name,
        &names,
        &config.receiver,
        &config.method_name,
        &config.wire_alias,
    ))
}

/// Names of fields to copy, in declaration order.
///
/// Blank `_` fields cannot be read and are skipped; embedded fields are
/// rejected.
fn copied_field_names<'a>(type_name: &str, fields: &'a [Field]) -> TopbResult<Vec<&'a str>> {
    let mut names = Vec::with_capacity(fields.len());
    for field in fields {
        match field.name.as_deref() {
            Some("_") => continue,
            Some(name) => names.push(name),
            None => {
                return Err(TopbError::EmbeddedField {
                    type_name: type_name.to_string(),
                    field_type: field.ty.clone(),
                });
            }
        }
    }
    Ok(names)
}

fn render_method(
    type_name: &str,
    fields: &[&str],
    receiver: &str,
    method_name: &str,
    wire_alias: &str,
) -> String {
    let mut output = format!(
        "func ({receiver} *{type_name}) {method_name}() *{wire_alias}.{type_name} {{\n"
    );

    if fields.is_empty() {
        output.push_str(&format!("\treturn &{wire_alias}.{type_name}{{}}\n"));
    } else {
        output.push_str(&format!("\treturn &{wire_alias}.{type_name}{{\n"));

        let width = fields.iter().map(|f| f.chars().count()).max().unwrap_or(0);
        for field in fields {
            let padding = " ".repeat(width - field.chars().count());
            output.push_str(&format!("\t\t{field}: {padding}{receiver}.{field},\n"));
        }

        output.push_str("\t}\n");
    }

    output.push_str("}\n");
    output
}

#[cfg(test)]
#[path = "emitter/emitter_tests.rs"]
mod emitter_tests;
