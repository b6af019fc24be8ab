//! Typed semantic token list shared by every downstream feature.
//!
//! One list is produced per document version and handed out by reference to
//! highlighting, outline, and hover, so the flat LSP integer encoding exists
//! in exactly one place (the wire layer) and legend indices cannot drift
//! between features.

use crate::lexer::{self, Token, TokenKind};

/// Semantic token legend advertised to the client. Editors cache the legend,
/// so the order here must never change within a session.
pub const LEGEND: [&str; 6] = ["class", "method", "field", "keyword", "variable", "string"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticCategory {
    Class,
    Method,
    Field,
    Keyword,
    Variable,
    String,
}

impl SemanticCategory {
    pub fn legend_index(self) -> u32 {
        match self {
            SemanticCategory::Class => 0,
            SemanticCategory::Method => 1,
            SemanticCategory::Field => 2,
            SemanticCategory::Keyword => 3,
            SemanticCategory::Variable => 4,
            SemanticCategory::String => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        LEGEND[self.legend_index() as usize]
    }
}

/// One classified source range. `start` and `length` are byte-based within
/// the line, matching the lexer's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticRecord {
    pub line: u32,
    pub start: u32,
    pub length: u32,
    pub category: SemanticCategory,
    pub text: String,
}

impl SemanticRecord {
    pub fn contains(&self, line: u32, character: u32) -> bool {
        self.line == line && self.start <= character && character < self.start + self.length
    }
}

/// The per-document token list, replaced wholesale on every re-tokenization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    pub version: i32,
    pub records: Vec<SemanticRecord>,
}

impl TokenList {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Linear scan for the record under the cursor; `None` when the cursor
    /// sits outside every classified range.
    pub fn record_at(&self, line: u32, character: u32) -> Option<&SemanticRecord> {
        self.records.iter().find(|r| r.contains(line, character))
    }
}

/// Tokenize a document and build its semantic token list in one pass.
pub fn parse_document(text: &str, version: i32) -> TokenList {
    let output = lexer::tokenize(text);
    build_token_list(&output.tokens, version)
}

/// Map lexer tokens onto semantic records. Braces drive the scope stack only
/// and never reach the visual buffer; constructors share the `method` legend
/// slot because no distinct constructor category exists downstream.
pub fn build_token_list(tokens: &[Token], version: i32) -> TokenList {
    let mut records: Vec<SemanticRecord> = tokens
        .iter()
        .filter_map(|token| {
            let category = match token.kind {
                TokenKind::Class => SemanticCategory::Class,
                TokenKind::Method | TokenKind::Constructor => SemanticCategory::Method,
                TokenKind::Field => SemanticCategory::Field,
                TokenKind::OpenBrace | TokenKind::CloseBrace => return None,
            };
            Some(SemanticRecord {
                line: token.line,
                start: token.column,
                length: token.value.len() as u32,
                category,
                text: token.value.clone(),
            })
        })
        .collect();
    records.sort_by_key(|r| (r.line, r.start));
    TokenList { version, records }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_order_is_stable() {
        assert_eq!(SemanticCategory::Class.legend_index(), 0);
        assert_eq!(SemanticCategory::Method.legend_index(), 1);
        assert_eq!(SemanticCategory::Field.legend_index(), 2);
        assert_eq!(SemanticCategory::String.as_str(), "string");
    }

    #[test]
    fn braces_never_become_records() {
        let list = parse_document("class Test {\n}", 1);
        assert_eq!(list.records.len(), 1);
        assert_eq!(list.records[0].category, SemanticCategory::Class);
        assert_eq!(list.records[0].text, "Test");
    }

    #[test]
    fn constructor_uses_the_method_slot() {
        let list = parse_document("class Test {\n  new make() {\n  }\n}", 1);
        let ctor = list
            .records
            .iter()
            .find(|r| r.text == "make")
            .expect("constructor record");
        assert_eq!(ctor.category, SemanticCategory::Method);
    }

    #[test]
    fn record_at_respects_half_open_range() {
        let list = parse_document("class Test {\n}", 1);
        // "Test" spans columns [6, 10)
        assert!(list.record_at(0, 6).is_some());
        assert!(list.record_at(0, 9).is_some());
        assert!(list.record_at(0, 10).is_none());
        assert!(list.record_at(0, 5).is_none());
        assert!(list.record_at(1, 6).is_none());
    }

    #[test]
    fn reparsing_yields_identical_lists() {
        let source = "class Test {\n  Int n := 1\n  Void m() {\n  }\n}";
        assert_eq!(parse_document(source, 3), parse_document(source, 3));
    }
}
