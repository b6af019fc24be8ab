//! Document outline built from the shared semantic token list.

use crate::semantic::{SemanticCategory, TokenList};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineKind {
    Class,
    Method,
    Field,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    pub name: String,
    pub kind: OutlineKind,
    pub line: u32,
    pub column: u32,
    pub length: u32,
    pub children: Vec<OutlineNode>,
}

/// Group method and field records under the most recent preceding class
/// record in document order. This is a flat "latest class so far" rule, not
/// scope nesting; records seen before any class stay at the top level.
pub fn build_outline(tokens: &TokenList) -> Vec<OutlineNode> {
    let mut roots: Vec<OutlineNode> = Vec::new();

    for record in &tokens.records {
        let kind = match record.category {
            SemanticCategory::Class => OutlineKind::Class,
            SemanticCategory::Method => OutlineKind::Method,
            SemanticCategory::Field => OutlineKind::Field,
            _ => continue,
        };
        let node = OutlineNode {
            name: record.text.clone(),
            kind,
            line: record.line,
            column: record.start,
            length: record.length,
            children: Vec::new(),
        };

        if kind == OutlineKind::Class {
            roots.push(node);
        } else {
            match roots.last_mut() {
                Some(parent) if parent.kind == OutlineKind::Class => parent.children.push(node),
                _ => roots.push(node),
            }
        }
    }

    roots
}
