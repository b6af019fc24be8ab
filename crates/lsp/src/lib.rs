pub mod capabilities;
pub mod completion;
pub mod diagnostics;
pub mod fandoc;
pub mod formatting;
pub mod hover;
pub mod loader;
pub mod semantic;
pub mod symbols;
pub mod util;

use crate::util::Document;
use dashmap::DashMap;
use fanls_core::config::Settings;
use fanls_core::docs::DocIndex;
use fanls_core::semantic::parse_document;
use fanls_core::store::TokenStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

pub struct Backend {
    client: Client,
    pub documents: DashMap<Url, Arc<Document>>,
    pub tokens: TokenStore,
    pub settings: RwLock<Settings>,
    pub docs: Arc<RwLock<Option<Arc<DocIndex>>>>,
    pub fantom_home: RwLock<Option<PathBuf>>,
    workspace_root: RwLock<Option<PathBuf>>,
    pub cancel_token: CancellationToken,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: DashMap::new(),
            tokens: TokenStore::new(),
            settings: RwLock::new(Settings::default()),
            docs: Arc::new(RwLock::new(None)),
            fantom_home: RwLock::new(None),
            workspace_root: RwLock::new(None),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Replace the document, re-tokenize it, and re-lint it. Every text event
    /// funnels through here so the token store can never lag the buffer.
    async fn update_document(&self, uri: Url, content: String, version: i32) {
        let list = parse_document(&content, version);
        self.tokens.set(uri.as_str(), Arc::new(list));
        self.documents
            .insert(uri.clone(), Arc::new(Document::new(content, version)));
        self.lint(&uri, Some(version)).await;
    }

    /// Publish brace-balance diagnostics for one open document, or clear them
    /// when linting is switched off.
    async fn lint(&self, uri: &Url, version: Option<i32>) {
        let diagnostics = if self.settings.read().await.linting {
            match self.documents.get(uri) {
                Some(doc) => diagnostics::collect(&doc.content),
                None => return,
            }
        } else {
            Vec::new()
        };
        self.client
            .publish_diagnostics(uri.clone(), diagnostics, version)
            .await;
    }

    /// Per-request log line in the client's output panel, emitted only at
    /// the `verbose` debug level.
    async fn trace_request(&self, message: String) {
        if self.settings.read().await.debug.logs_requests() {
            self.client.log_message(MessageType::LOG, message).await;
        }
    }

    /// Re-resolve the Fantom installation from the current settings and kick
    /// off a documentation index load when one is found.
    async fn refresh_home(&self) {
        let settings = self.settings.read().await.clone();
        let root = self.workspace_root.read().await.clone();
        let home = settings.resolve_home(root.as_deref());

        if let Some(home) = &home {
            tracing::info!("fantom home resolved to {}", home.display());
            if settings.fantom_docs {
                loader::spawn_docs_loader(home.clone(), self.client.clone(), self.docs.clone());
            }
        } else {
            tracing::warn!("no fantom installation found; documentation lookup disabled");
            self.client
                .log_message(
                    MessageType::WARNING,
                    "fanls: no Fantom installation found; hover falls back to source comments",
                )
                .await;
        }

        *self.fantom_home.write().await = home;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(options) = &params.initialization_options {
            let mut settings = self.settings.write().await;
            if let Err(e) = settings.merge_value(options) {
                // A bad home mode means the user's workspace configuration is
                // broken; refuse to start rather than run half-configured.
                return Err(tower_lsp::jsonrpc::Error::invalid_params(e.to_string()));
            }
        }

        let root = params
            .root_uri
            .as_ref()
            .and_then(|uri| uri.to_file_path().ok());
        *self.workspace_root.write().await = root;

        self.refresh_home().await;

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "fanls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        if self.settings.read().await.debug.logs_lifecycle() {
            self.client
                .log_message(MessageType::INFO, "fanls: server initialized")
                .await;
        }
    }

    async fn shutdown(&self) -> Result<()> {
        self.cancel_token.cancel();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        tracing::debug!("did_open {}", doc.uri);
        self.update_document(doc.uri, doc.text, doc.version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // Sync is FULL, so the last change carries the whole buffer.
        if let Some(change) = params.content_changes.into_iter().last() {
            self.update_document(uri, change.text, version).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::debug!("did_close {}", uri);
        self.documents.remove(&uri);
        self.tokens.remove(uri.as_str());
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        {
            let mut settings = self.settings.write().await;
            if let Err(e) = settings.merge_value(&params.settings) {
                tracing::warn!("rejected configuration update: {e}");
                self.client
                    .log_message(MessageType::ERROR, format!("fanls: {e}"))
                    .await;
                return;
            }
        }

        self.refresh_home().await;

        let open: Vec<Url> = self.documents.iter().map(|e| e.key().clone()).collect();
        for uri in open {
            self.lint(&uri, None).await;
        }
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        if !self.settings.read().await.syntax_highlighting {
            return Ok(None);
        }
        let uri = params.text_document.uri;
        let Some(list) = self.tokens.get(uri.as_str()) else {
            return Ok(None);
        };
        let data = semantic::encode(&list);
        self.trace_request(format!("semanticTokens/full {}: {} tokens", uri, data.len()))
            .await;
        Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
            result_id: None,
            data,
        })))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        if !self.settings.read().await.code_outline {
            return Ok(None);
        }
        Ok(symbols::document_symbol(self, params).await)
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        if !self.settings.read().await.hover_docs {
            return Ok(None);
        }
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = params.text_document_position_params.position;
        self.trace_request(format!("hover {} at {}:{}", uri, pos.line, pos.character))
            .await;
        Ok(hover::hover(self, params).await)
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        if !self.settings.read().await.autocompletion {
            return Ok(None);
        }
        Ok(completion::completion(self, params).await)
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        if !self.settings.read().await.formatting {
            return Ok(None);
        }
        Ok(formatting::formatting(self, params).await)
    }
}

pub async fn run_server() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = tower_lsp::LspService::new(Backend::new);
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;
}
