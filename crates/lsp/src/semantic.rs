//! Wire encoding of the shared token list for `textDocument/semanticTokens`.

use fanls_core::semantic::TokenList;
use tower_lsp::lsp_types::SemanticToken;

/// Delta-encode the typed records into the flat LSP stream. Records are
/// single-line and already sorted by (line, start), which is all the wire
/// format requires.
pub fn encode(list: &TokenList) -> Vec<SemanticToken> {
    let mut data = Vec::with_capacity(list.records.len());
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for record in &list.records {
        let delta_line = record.line - prev_line;
        let delta_start = if delta_line == 0 {
            record.start - prev_start
        } else {
            record.start
        };
        data.push(SemanticToken {
            delta_line,
            delta_start,
            length: record.length,
            token_type: record.category.legend_index(),
            token_modifiers_bitset: 0,
        });
        prev_line = record.line;
        prev_start = record.start;
    }

    data
}
