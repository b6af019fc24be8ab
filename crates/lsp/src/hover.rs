use fanls_core::docs::{DocIndex, SlotDoc};
use fanls_core::semantic::{SemanticCategory, SemanticRecord};
use tower_lsp::lsp_types::*;

use crate::{fandoc, Backend};

pub async fn hover(server: &Backend, params: HoverParams) -> Option<Hover> {
    let uri = params.text_document_position_params.text_document.uri;
    let position = params.text_document_position_params.position;

    let tokens = server.tokens.get(uri.as_str())?;
    let record = tokens.record_at(position.line, position.character)?.clone();

    let use_index = server.settings.read().await.fantom_docs;
    let mut text = None;

    if use_index {
        let docs = server.docs.read().await.clone();
        if let Some(index) = docs.as_deref() {
            text = index_hover(index, &record);
        }
    }

    if text.is_none() {
        let home = server.fantom_home.read().await.clone();
        // A home without a launcher is not an error; the source-comment
        // fallback below handles it.
        if let Some(home) = home.filter(|h| fandoc::launcher_exists(h)) {
            let cancel = server.cancel_token.child_token();
            match fandoc::lookup(&home, &record.text, &cancel).await {
                Ok(markdown) => text = Some(markdown),
                Err(e) => {
                    tracing::warn!("doc lookup for '{}' failed: {e}", record.text);
                    text = Some(format!("*Documentation lookup failed: {e}*"));
                }
            }
        }
    }

    let content = server
        .documents
        .get(&uri)
        .map(|doc| doc.content.clone())
        .unwrap_or_default();
    let text = text.unwrap_or_else(|| fallback_hover(&record, &content));

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: text,
        }),
        range: Some(Range {
            start: Position::new(record.line, record.start),
            end: Position::new(record.line, record.start + record.length),
        }),
    })
}

fn index_hover(index: &DocIndex, record: &SemanticRecord) -> Option<String> {
    match record.category {
        SemanticCategory::Class => index.find_class(&record.text).map(|(pod, class)| {
            let mut text = String::new();
            text.push_str(&format!("```fantom\n{} {}\n```\n", class.kind, class.name));
            text.push_str(&format!("Declared in `{}`\n\n", pod.name));
            if !class.facets.is_empty() {
                text.push_str(&format!("Facets: `{}`\n\n", class.facets.join("`, `")));
            }
            text.push_str(&format!(
                "*{} methods, {} fields*",
                class.methods.len(),
                class.fields.len()
            ));
            text
        }),
        SemanticCategory::Method | SemanticCategory::Field => {
            index.find_slot(&record.text).map(|found| {
                let mut text = String::new();
                match found.slot {
                    SlotDoc::Method(method) => {
                        text.push_str(&format!(
                            "```fantom\n{}\n```\n",
                            method.signature(&found.class.name)
                        ));
                    }
                    SlotDoc::Field(field) => {
                        text.push_str(&format!(
                            "```fantom\n{} {}.{}\n```\n",
                            field.kind, found.class.name, field.name
                        ));
                    }
                }
                text.push_str(&format!(
                    "Declared in `{}::{}`",
                    found.pod.name, found.class.name
                ));
                text
            })
        }
        _ => None,
    }
}

/// Hover text synthesized from the document itself when no documentation
/// source is available: the fandoc comment block right above the
/// declaration, if any, plus the token's kind.
fn fallback_hover(record: &SemanticRecord, content: &str) -> String {
    let label = match record.category {
        SemanticCategory::Class => "Class",
        SemanticCategory::Method => "Method",
        SemanticCategory::Field => "Field",
        SemanticCategory::Keyword => "Keyword",
        SemanticCategory::Variable => "Variable",
        SemanticCategory::String => "String",
    };
    let mut text = format!("**{}** `{}`", label, record.text);
    if let Some(comment) = doc_comment_above(content, record.line) {
        text.push_str("\n\n");
        text.push_str(&comment);
    } else {
        text.push_str("\n\n*No documentation found*");
    }
    text
}

/// Collect the contiguous `**` fandoc (or `//`) comment block ending on the
/// line above `line`.
fn doc_comment_above(content: &str, line: u32) -> Option<String> {
    let lines: Vec<&str> = content.lines().collect();
    let mut collected: Vec<&str> = Vec::new();
    let mut current = line as usize;

    while current > 0 {
        let candidate = lines.get(current - 1)?.trim();
        let stripped = candidate
            .strip_prefix("**")
            .or_else(|| candidate.strip_prefix("//"));
        match stripped {
            Some(body) => collected.push(body.trim()),
            None => break,
        }
        current -= 1;
    }

    if collected.is_empty() {
        None
    } else {
        collected.reverse();
        Some(collected.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanls_core::docs::PodDoc;
    use fanls_core::semantic::parse_document;

    fn sample_index() -> DocIndex {
        let pods: Vec<PodDoc> = serde_json::from_str(
            r#"[{
                "name": "sys",
                "type": "pod",
                "classes": [{
                    "name": "Str",
                    "type": "class",
                    "facets": [],
                    "methods": [{ "name": "upper", "type": "Str", "params": [] }],
                    "fields": []
                }]
            }]"#,
        )
        .expect("sample parses");
        DocIndex::from_pods(pods)
    }

    fn record(category: SemanticCategory, text: &str) -> SemanticRecord {
        SemanticRecord {
            line: 0,
            start: 0,
            length: text.len() as u32,
            category,
            text: text.to_string(),
        }
    }

    #[test]
    fn class_hover_comes_from_the_index() {
        let text = index_hover(&sample_index(), &record(SemanticCategory::Class, "str"))
            .expect("class found");
        assert!(text.contains("class Str"));
        assert!(text.contains("Declared in `sys`"));
    }

    #[test]
    fn method_hover_shows_the_signature() {
        let text = index_hover(&sample_index(), &record(SemanticCategory::Method, "upper"))
            .expect("method found");
        assert!(text.contains("Str Str.upper()"));
        assert!(text.contains("`sys::Str`"));
    }

    #[test]
    fn index_miss_gives_none() {
        assert!(index_hover(&sample_index(), &record(SemanticCategory::Class, "Missing")).is_none());
    }

    #[test]
    fn fallback_reads_the_comment_block_above() {
        let source = "class Test {\n  ** Renders the widget.\n  ** Depth-first.\n  Void render() {\n  }\n}";
        let list = parse_document(source, 1);
        let method = list
            .records
            .iter()
            .find(|r| r.text == "render")
            .expect("method record");
        let text = fallback_hover(method, source);
        assert!(text.contains("**Method** `render`"));
        assert!(text.contains("Renders the widget.\nDepth-first."));
    }

    #[test]
    fn fallback_without_comments_says_so() {
        let source = "class Test {\n}";
        let list = parse_document(source, 1);
        let text = fallback_hover(&list.records[0], source);
        assert!(text.contains("*No documentation found*"));
    }
}
