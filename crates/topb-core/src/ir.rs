//! Intermediate representation of Go type declarations.
//!
//! A Go file is parsed with [`tree_sitter_go`] and reduced to the handful of
//! facts the generator needs: the package name and, for every top-level
//! `type` declaration, its name, its fields (for structs) and the
//! documentation comments attached to it.
//!
//! # Documentation attachment
//!
//! Go attaches a doc comment to the outermost declaration it precedes:
//!
//! ```go
//! // gen:topb           <- doc of the `type` declaration (group_doc)
//! type Order struct{}
//!
//! // shared            <- doc of the `type ( ... )` group (group_doc)
//! type (
//!     // gen:topb       <- doc of the Item spec (doc)
//!     Item struct{}
//! )
//! ```
//!
//! [`TypeDeclaration::effective_doc`] prefers the spec's own comment and falls
//! back to the group's.

use crate::error::{TopbError, TopbResult};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};

/// One parsed input file
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Path the unit was loaded from
    pub path: PathBuf,

    /// Declared package name
    pub package: String,

    /// Top-level type declarations in source order
    pub types: Vec<TypeDeclaration>,
}

/// A named type declared at the top level of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// Type name
    pub name: String,

    /// What the name is bound to
    pub body: TypeBody,

    /// Whether the type declares type parameters (`type Page[T any] ...`)
    pub has_type_params: bool,

    /// Comment group directly above the type spec
    pub doc: Option<String>,

    /// Comment group above the enclosing `type` declaration
    pub group_doc: Option<String>,

    /// 1-based line of the type name
    pub line: usize,
}

/// The right-hand side of a type declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeBody {
    /// `struct { ... }` with its fields in declaration order
    Struct(Vec<Field>),

    /// `type A = B`
    Alias,

    /// Anything else, identified by its syntax node kind
    /// (`interface_type`, `type_identifier`, `function_type`, ...)
    Other(String),
}

/// A struct field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name, `None` for embedded fields
    pub name: Option<String>,

    /// Declared type as written in source
    pub ty: String,
}

impl TypeDeclaration {
    /// Type-level documentation if present, else the declaration group's
    pub fn effective_doc(&self) -> Option<&str> {
        self.doc.as_deref().or(self.group_doc.as_deref())
    }

    /// Struct fields, or `None` for non-struct types
    pub fn fields(&self) -> Option<&[Field]> {
        match &self.body {
            TypeBody::Struct(fields) => Some(fields),
            _ => None,
        }
    }
}

impl Field {
    /// Whether the field is embedded (declared by type only)
    pub fn is_embedded(&self) -> bool {
        self.name.is_none()
    }
}

impl SourceUnit {
    /// Read and parse a Go source file
    pub fn load(path: &Path) -> TopbResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| TopbError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path, &source)
    }

    /// Parse Go source text; `path` is only used for diagnostics
    pub fn parse(path: impl Into<PathBuf>, source: &str) -> TopbResult<Self> {
        let path = path.into();

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::language())
            .map_err(|e| TopbError::Language(e.to_string()))?;

        let Some(tree) = parser.parse(source, None) else {
            return Err(TopbError::Parse {
                path,
                line: 1,
                column: 1,
                message: "parser produced no syntax tree".to_string(),
            });
        };

        let root = tree.root_node();
        if root.has_error() {
            let node = first_error(root).unwrap_or(root);
            let position = node.start_position();
            let message = if node.is_missing() {
                format!("syntax error: missing {}", node.kind())
            } else {
                "syntax error".to_string()
            };
            return Err(TopbError::Parse {
                path,
                line: position.row + 1,
                column: position.column + 1,
                message,
            });
        }

        let src = source.as_bytes();
        let mut package = None;
        let mut types = Vec::new();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_clause" => package = package_name(child, src),
                "type_declaration" => collect_type_declaration(child, src, &mut types),
                _ => {}
            }
        }

        let Some(package) = package else {
            return Err(TopbError::Parse {
                path,
                line: 1,
                column: 1,
                message: "expected package clause".to_string(),
            });
        };

        Ok(SourceUnit {
            path,
            package,
            types,
        })
    }
}

fn node_text<'a>(node: Node<'_>, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or_default()
}

/// Depth-first search for the first ERROR or MISSING node
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}

fn package_name(clause: Node<'_>, src: &[u8]) -> Option<String> {
    let mut cursor = clause.walk();
    let name = clause
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_identifier")
        .map(|n| node_text(n, src).to_string());
    name
}

fn collect_type_declaration(decl: Node<'_>, src: &[u8], out: &mut Vec<TypeDeclaration>) {
    let group_doc = doc_comment(decl, src);

    let mut cursor = decl.walk();
    for spec in decl.named_children(&mut cursor) {
        let body = match spec.kind() {
            "type_spec" => match spec.child_by_field_name("type") {
                Some(ty) if ty.kind() == "struct_type" => TypeBody::Struct(struct_fields(ty, src)),
                Some(ty) => TypeBody::Other(ty.kind().to_string()),
                None => continue,
            },
            "type_alias" => TypeBody::Alias,
            _ => continue,
        };

        let Some(name_node) = spec.child_by_field_name("name") else {
            continue;
        };

        out.push(TypeDeclaration {
            name: node_text(name_node, src).to_string(),
            body,
            has_type_params: spec.child_by_field_name("type_parameters").is_some(),
            doc: doc_comment(spec, src),
            group_doc: group_doc.clone(),
            line: name_node.start_position().row + 1,
        });
    }
}

fn struct_fields(struct_type: Node<'_>, src: &[u8]) -> Vec<Field> {
    let mut fields = Vec::new();

    let mut cursor = struct_type.walk();
    let Some(list) = struct_type
        .named_children(&mut cursor)
        .find(|n| n.kind() == "field_declaration_list")
    else {
        return fields;
    };

    let mut list_cursor = list.walk();
    for decl in list.named_children(&mut list_cursor) {
        if decl.kind() != "field_declaration" {
            continue;
        }

        let mut ty = decl
            .child_by_field_name("type")
            .map(|n| node_text(n, src).to_string())
            .unwrap_or_default();

        let mut name_cursor = decl.walk();
        let names: Vec<String> = decl
            .children_by_field_name("name", &mut name_cursor)
            .map(|n| node_text(n, src).to_string())
            .collect();

        if names.is_empty() {
            // `*Base` embeds through a pointer; keep the star in the type text
            if decl.child(0).is_some_and(|n| n.kind() == "*") {
                ty.insert(0, '*');
            }
            fields.push(Field { name: None, ty });
        } else {
            fields.extend(names.into_iter().map(|name| Field {
                name: Some(name),
                ty: ty.clone(),
            }));
        }
    }

    fields
}

/// Comment group ending on the line directly above `node`.
///
/// A comment that trails code on its own line belongs to that code and
/// ends the group.
fn doc_comment(node: Node<'_>, src: &[u8]) -> Option<String> {
    let mut lines = Vec::new();
    let mut next_row = node.start_position().row;
    let mut current = node.prev_named_sibling();

    while let Some(comment) = current {
        if comment.kind() != "comment" || comment.end_position().row + 1 < next_row {
            break;
        }

        let previous = comment.prev_named_sibling();
        if let Some(prev) = previous {
            if prev.kind() != "comment" && prev.end_position().row == comment.start_position().row
            {
                break;
            }
        }

        lines.push(node_text(comment, src).to_string());
        next_row = comment.start_position().row;
        current = previous;
    }

    if lines.is_empty() {
        return None;
    }
    lines.reverse();
    Some(lines.join("\n"))
}
