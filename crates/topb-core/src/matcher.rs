//! Eligibility check for conversion-method generation

use crate::ir::{TypeBody, TypeDeclaration};

/// Whether `decl` requests a generated conversion method.
///
/// The type must be a struct and its effective documentation must contain
/// `marker` anywhere in its text.
pub fn is_eligible(decl: &TypeDeclaration, marker: &str) -> bool {
    if !matches!(decl.body, TypeBody::Struct(_)) {
        return false;
    }

    decl.effective_doc()
        .is_some_and(|doc| has_marker(doc, marker))
}

/// Substring match of the marker against raw comment text
pub fn has_marker(doc: &str, marker: &str) -> bool {
    !marker.is_empty() && doc.contains(marker)
}
