use crate::semantic::TokenList;
use dashmap::DashMap;
use std::sync::Arc;

/// Per-document token cache, keyed by document URI.
///
/// Each re-tokenization fully replaces the entry (last-write-wins); closing
/// a document removes it. The store is owned by the server process and
/// injected into features rather than living as module-level state. Document
/// events are serialized by the protocol layer, so there is never a
/// concurrent writer for one URI.
#[derive(Debug, Default)]
pub struct TokenStore {
    entries: DashMap<String, Arc<TokenList>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, uri: impl Into<String>, list: Arc<TokenList>) {
        self.entries.insert(uri.into(), list);
    }

    pub fn get(&self, uri: &str) -> Option<Arc<TokenList>> {
        self.entries.get(uri).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, uri: &str) {
        self.entries.remove(uri);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
