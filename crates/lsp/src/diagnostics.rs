//! Brace-balance lint. Malformed syntax never produces an error response;
//! the worst outcome of a broken document is a warning list.

use fanls_core::lexer::{self, ScopeKind};
use tower_lsp::lsp_types::*;

pub fn collect(text: &str) -> Vec<Diagnostic> {
    let output = lexer::tokenize(text);
    let mut diagnostics = Vec::new();

    for (line, column) in output.stray_closers {
        diagnostics.push(warning(line, column, "unmatched closing brace"));
    }

    for scope in output.open_scopes {
        let message = match scope.kind {
            ScopeKind::Class => "class body is never closed",
            ScopeKind::Method => "method body is never closed",
            ScopeKind::Block => "block is never closed",
        };
        diagnostics.push(warning(scope.start_line, 0, message));
    }

    diagnostics.sort_by_key(|d| (d.range.start.line, d.range.start.character));
    diagnostics
}

fn warning(line: u32, column: u32, message: &str) -> Diagnostic {
    Diagnostic {
        range: Range {
            start: Position::new(line, column),
            end: Position::new(line, column + 1),
        },
        severity: Some(DiagnosticSeverity::WARNING),
        source: Some("fanls".to_string()),
        message: message.to_string(),
        ..Default::default()
    }
}
