use std::sync::Arc;

use dashmap::DashMap;
use ropey::Rope;
use tower_lsp::lsp_types::Url;
use tower_lsp::Client;

use dialplan_core::DialplanAnalyzer;

/// In-memory copy of one open dialplan document.
#[derive(Debug, Default)]
pub(crate) struct Document {
    pub(crate) content: Rope,
    pub(crate) version: i32,
}

/// Primary LSP server state shared across handlers.
///
/// The analyzer is stateless (the documentation table inside it is loaded
/// once and immutable), so handlers call it without locking.
pub(crate) struct DialplanLanguageServer {
    pub(crate) client: Client,
    pub(crate) documents: Arc<DashMap<Url, Document>>,
    pub(crate) analyzer: DialplanAnalyzer,
}

impl DialplanLanguageServer {
    pub(crate) fn new(client: Client, analyzer: DialplanAnalyzer) -> Self {
        Self {
            client,
            documents: Arc::new(DashMap::new()),
            analyzer,
        }
    }
}
