use std::collections::HashSet;

use fanls_core::docs::DocIndex;
use fanls_core::semantic::{SemanticCategory, TokenList};
use tower_lsp::lsp_types::*;

use crate::util::word_prefix_at;
use crate::Backend;

pub async fn completion(server: &Backend, params: CompletionParams) -> Option<CompletionResponse> {
    let uri = params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;

    let prefix = server
        .documents
        .get(&uri)
        .and_then(|doc| {
            word_prefix_at(
                &doc.content,
                position.line as usize,
                position.character as usize,
            )
        })
        .unwrap_or_default();

    let tokens = server.tokens.get(uri.as_str());
    let docs = server.docs.read().await.clone();

    let items = collect_items(tokens.as_deref(), docs.as_deref(), &prefix);
    Some(CompletionResponse::Array(items))
}

/// Candidates from the current document's token list plus types and slots
/// from the doc index, filtered by case-insensitive prefix and de-duplicated
/// by label and kind.
fn collect_items(
    tokens: Option<&TokenList>,
    docs: Option<&DocIndex>,
    prefix: &str,
) -> Vec<CompletionItem> {
    let mut seen: HashSet<(String, &'static str)> = HashSet::new();
    let mut items = Vec::new();

    let mut push = |label: &str, kind: CompletionItemKind, tag: &'static str, detail: Option<String>| {
        if !matches_prefix(label, prefix) {
            return;
        }
        if seen.insert((label.to_string(), tag)) {
            items.push(CompletionItem {
                label: label.to_string(),
                kind: Some(kind),
                detail,
                ..Default::default()
            });
        }
    };

    if let Some(tokens) = tokens {
        for record in &tokens.records {
            match record.category {
                SemanticCategory::Class => {
                    push(&record.text, CompletionItemKind::CLASS, "class", None)
                }
                SemanticCategory::Method => {
                    push(&record.text, CompletionItemKind::METHOD, "method", None)
                }
                SemanticCategory::Field => {
                    push(&record.text, CompletionItemKind::FIELD, "field", None)
                }
                _ => {}
            }
        }
    }

    if let Some(index) = docs {
        for pod in index.pods() {
            for class in &pod.classes {
                push(
                    &class.name,
                    CompletionItemKind::CLASS,
                    "class",
                    Some(pod.name.clone()),
                );
                for method in &class.methods {
                    push(
                        &method.name,
                        CompletionItemKind::METHOD,
                        "method",
                        Some(method.signature(&class.name)),
                    );
                }
                for field in &class.fields {
                    push(
                        &field.name,
                        CompletionItemKind::FIELD,
                        "field",
                        Some(format!("{} {}.{}", field.kind, class.name, field.name)),
                    );
                }
            }
        }
    }

    items
}

// Char-wise comparison: labels come from `\w`-based patterns, so they can
// hold non-ASCII word characters and must never be byte-sliced.
fn matches_prefix(label: &str, prefix: &str) -> bool {
    let mut label_chars = label.chars();
    prefix.chars().all(|p| {
        label_chars
            .next()
            .is_some_and(|l| l.eq_ignore_ascii_case(&p))
    })
}
