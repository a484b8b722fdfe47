use tower_lsp::lsp_types::{Diagnostic, Url};

use super::convert::to_lsp_diagnostic;
use super::state::DialplanLanguageServer;

impl DialplanLanguageServer {
    /// Full recompute for one document. The result unconditionally replaces
    /// any previously published set.
    pub(crate) fn compute_diagnostics(&self, uri: &Url) -> Vec<Diagnostic> {
        let content = match self.documents.get(uri) {
            Some(doc) => doc.content.to_string(),
            None => return Vec::new(),
        };
        let lines: Vec<&str> = content.lines().collect();
        self.analyzer
            .analyze(&content)
            .diagnostics
            .iter()
            .map(|d| to_lsp_diagnostic(&lines, d))
            .collect()
    }

    pub(crate) async fn publish_diagnostics_for(&self, uri: Url, version: i32) {
        let diagnostics = self.compute_diagnostics(&uri);
        self.client.publish_diagnostics(uri, diagnostics, Some(version)).await;
    }
}
