/// Lightweight container for document state
pub struct Document {
    pub content: String,
    pub version: i32,
}

impl Document {
    pub fn new(content: String, version: i32) -> Self {
        Self { content, version }
    }
}

/// Prefix of the identifier up to the cursor, for completion filtering.
pub fn word_prefix_at(content: &str, line: usize, col: usize) -> Option<String> {
    let line_content = content.lines().nth(line)?;
    let col = col.min(line_content.len());
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';

    let start = line_content[..col]
        .rfind(|c| !is_ident(c))
        .map(|i| i + 1)
        .unwrap_or(0);

    if start < col {
        Some(line_content[start..col].to_string())
    } else {
        None
    }
}
