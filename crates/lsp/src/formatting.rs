//! Brace-driven re-indentation, emitted as one full-document edit.

use tower_lsp::lsp_types::*;

use crate::Backend;

pub async fn formatting(
    server: &Backend,
    params: DocumentFormattingParams,
) -> Option<Vec<TextEdit>> {
    let uri = params.text_document.uri;
    let doc = server.documents.get(&uri)?;
    let formatted = format_text(&doc.content, &params.options)?;

    // Full replacement is simpler and more reliable than incremental edits
    // for a line-based formatter.
    Some(vec![TextEdit {
        range: Range {
            start: Position::new(0, 0),
            end: end_position(&doc.content),
        },
        new_text: formatted,
    }])
}

/// Re-indent every line to its brace depth and strip trailing whitespace.
/// Returns `None` when the text is already formatted.
pub fn format_text(text: &str, options: &FormattingOptions) -> Option<String> {
    let unit = if options.insert_spaces {
        " ".repeat(options.tab_size as usize)
    } else {
        "\t".to_string()
    };

    let mut depth = 0usize;
    let mut out = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            // Closing braces at the start of a line de-indent that line.
            let leading_closers = trimmed.chars().take_while(|c| *c == '}').count();
            let level = depth.saturating_sub(leading_closers);
            for _ in 0..level {
                out.push_str(&unit);
            }
            out.push_str(trimmed);
        }
        out.push('\n');

        let opens = trimmed.matches('{').count();
        let closes = trimmed.matches('}').count();
        depth = (depth + opens).saturating_sub(closes);
    }

    if out == text {
        None
    } else {
        Some(out)
    }
}

fn end_position(text: &str) -> Position {
    let line_count = text.split('\n').count() as u32;
    let last_len = text.rsplit('\n').next().unwrap_or("").len() as u32;
    Position::new(line_count - 1, last_len)
}
