/// Token kinds produced by one pass over a Fantom source document.
///
/// Brace tokens carry no highlighting information of their own; they exist so
/// the scope stack can be driven in lockstep with the declaration tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Class,
    Method,
    Field,
    Constructor,
    OpenBrace,
    CloseBrace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// 0-based line within the document.
    pub line: u32,
    /// 0-based byte column within the line.
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            value: value.into(),
            line,
            column,
        }
    }
}
