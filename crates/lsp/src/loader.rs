use fanls_core::docs::DocIndex;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::MessageType;
use tower_lsp::Client;

/// Load the pre-built documentation index in the background. A missing or
/// malformed index degrades hover and completion to document-local results;
/// it never fails the server.
pub fn spawn_docs_loader(
    home: PathBuf,
    client: Client,
    slot: Arc<RwLock<Option<Arc<DocIndex>>>>,
) {
    tokio::spawn(async move {
        let dir = home.join("doc-index");
        let loaded = tokio::task::spawn_blocking(move || DocIndex::load(&dir)).await;

        match loaded {
            Ok(Ok(index)) => {
                let pods = index.pods().len();
                *slot.write().await = Some(Arc::new(index));
                client
                    .log_message(
                        MessageType::INFO,
                        format!("fanls: documentation index loaded ({pods} pods)"),
                    )
                    .await;
            }
            Ok(Err(e)) => {
                tracing::warn!("documentation index unavailable: {e}");
                client
                    .log_message(
                        MessageType::WARNING,
                        format!("fanls: documentation index unavailable: {e}"),
                    )
                    .await;
            }
            Err(e) => {
                tracing::error!("documentation index loader failed: {e}");
            }
        }
    });
}
