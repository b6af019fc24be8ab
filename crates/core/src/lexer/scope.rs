/// Kind of lexical region tracked while scanning a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Class,
    Method,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub kind: ScopeKind,
    pub start_line: u32,
}

/// Stack of open lexical scopes during a single tokenization pass.
///
/// The stack is owned by the pass and discarded with it: scopes left open by
/// unbalanced braces are reported to the caller, never carried across
/// documents.
#[derive(Debug, Default)]
pub struct ScopeHandler {
    stack: Vec<Scope>,
}

impl ScopeHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scope: Scope) {
        self.stack.push(scope);
    }

    /// Pop the top scope. Popping an empty stack is a no-op: the line scan
    /// must never abort on malformed input.
    pub fn pop(&mut self) -> Option<Scope> {
        self.stack.pop()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether `line` falls inside an open method body.
    ///
    /// Scans from the top of the stack downward and answers on the first
    /// method scope opened on an earlier line. A class scope encountered
    /// first blocks the search: a method scope belonging to an ancestor
    /// class is never visible through a nested class.
    pub fn is_in_method_scope(&self, line: u32) -> bool {
        for scope in self.stack.iter().rev() {
            match scope.kind {
                ScopeKind::Method if scope.start_line < line => return true,
                ScopeKind::Class => return false,
                _ => {}
            }
        }
        false
    }

    pub fn into_stack(self) -> Vec<Scope> {
        self.stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(kind: ScopeKind, start_line: u32) -> Scope {
        Scope { kind, start_line }
    }

    #[test]
    fn pop_on_empty_is_a_noop() {
        let mut scopes = ScopeHandler::new();
        assert!(scopes.pop().is_none());
        assert_eq!(scopes.depth(), 0);
    }

    #[test]
    fn method_scope_starts_after_declaration_line() {
        let mut scopes = ScopeHandler::new();
        scopes.push(scope(ScopeKind::Class, 0));
        scopes.push(scope(ScopeKind::Method, 2));

        assert!(!scopes.is_in_method_scope(1));
        assert!(!scopes.is_in_method_scope(2));
        assert!(scopes.is_in_method_scope(3));
    }

    #[test]
    fn class_scope_blocks_outer_method() {
        let mut scopes = ScopeHandler::new();
        scopes.push(scope(ScopeKind::Method, 1));
        scopes.push(scope(ScopeKind::Class, 4));

        // The nested class hides the enclosing method body.
        assert!(!scopes.is_in_method_scope(6));
    }

    #[test]
    fn block_scopes_are_transparent() {
        let mut scopes = ScopeHandler::new();
        scopes.push(scope(ScopeKind::Class, 0));
        scopes.push(scope(ScopeKind::Method, 1));
        scopes.push(scope(ScopeKind::Block, 3));

        assert!(scopes.is_in_method_scope(4));
    }

    #[test]
    fn popping_the_method_closes_its_body() {
        let mut scopes = ScopeHandler::new();
        scopes.push(scope(ScopeKind::Class, 0));
        scopes.push(scope(ScopeKind::Method, 1));
        assert!(scopes.is_in_method_scope(2));

        scopes.pop();
        assert!(!scopes.is_in_method_scope(2));
    }
}
