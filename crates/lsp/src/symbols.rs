use fanls_core::outline::{build_outline, OutlineKind, OutlineNode};
use tower_lsp::lsp_types::*;

use crate::Backend;

pub async fn document_symbol(
    server: &Backend,
    params: DocumentSymbolParams,
) -> Option<DocumentSymbolResponse> {
    let uri = params.text_document.uri;
    let tokens = server.tokens.get(uri.as_str())?;
    if tokens.is_empty() {
        return Some(DocumentSymbolResponse::Nested(Vec::new()));
    }
    let outline = build_outline(&tokens);
    Some(DocumentSymbolResponse::Nested(
        outline.iter().map(to_document_symbol).collect(),
    ))
}

#[allow(deprecated)]
fn to_document_symbol(node: &OutlineNode) -> DocumentSymbol {
    let range = Range {
        start: Position::new(node.line, node.column),
        end: Position::new(node.line, node.column + node.length),
    };
    DocumentSymbol {
        name: node.name.clone(),
        detail: None,
        kind: outline_kind_to_symbol_kind(node.kind),
        tags: None,
        deprecated: None,
        range,
        selection_range: range,
        children: if node.children.is_empty() {
            None
        } else {
            Some(node.children.iter().map(to_document_symbol).collect())
        },
    }
}

fn outline_kind_to_symbol_kind(kind: OutlineKind) -> SymbolKind {
    match kind {
        OutlineKind::Class => SymbolKind::CLASS,
        OutlineKind::Method => SymbolKind::METHOD,
        OutlineKind::Field => SymbolKind::FIELD,
    }
}
