use ropey::Rope;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::LanguageServer;
use tracing::info;

use super::convert::{to_document_symbols, to_lsp_range};
use super::state::{DialplanLanguageServer, Document};
use super::text::word_at_position;

#[tower_lsp::async_trait]
impl LanguageServer for DialplanLanguageServer {
    async fn initialize(&self, _params: InitializeParams) -> Result<InitializeResult> {
        info!("Dialplan Language Server initializing");

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                // Documents are small config files; full sync keeps the
                // scan passes trivially consistent with the editor buffer.
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                definition_provider: Some(OneOf::Left(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                diagnostic_provider: Some(DiagnosticServerCapabilities::Options(DiagnosticOptions {
                    identifier: Some("dialplan".to_string()),
                    inter_file_dependencies: false,
                    workspace_diagnostics: false,
                    work_done_progress_options: Default::default(),
                })),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "Dialplan Language Server".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!(
            "Dialplan Language Server initialized (hover documentation: {})",
            if self.analyzer.has_docs() { "enabled" } else { "disabled" }
        );
        let _ = self
            .client
            .log_message(MessageType::INFO, "Dialplan Language Server started")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Dialplan Language Server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        self.documents.insert(
            uri.clone(),
            Document {
                content: Rope::from_str(&params.text_document.text),
                version,
            },
        );
        self.publish_diagnostics_for(uri, version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // Full sync: the last change event carries the whole new text.
        if let Some(change) = params.content_changes.into_iter().next_back() {
            let mut entry = self.documents.entry(uri.clone()).or_default();
            entry.content = Rope::from_str(&change.text);
            entry.version = version;
        }

        self.publish_diagnostics_for(uri, version).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.remove(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(doc) = self.documents.get(uri) else {
            return Ok(None);
        };
        let Some((word, range)) = word_at_position(&doc.content, position) else {
            return Ok(None);
        };
        drop(doc);

        Ok(self.analyzer.lookup_hover(&word).map(|markdown| Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: markdown,
            }),
            range: Some(range),
        }))
    }

    async fn goto_definition(&self, params: GotoDefinitionParams) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let (word, content) = {
            let Some(doc) = self.documents.get(&uri) else {
                return Ok(None);
            };
            let Some((word, _)) = word_at_position(&doc.content, position) else {
                return Ok(None);
            };
            (word, doc.content.to_string())
        };

        let Some(span) = self.analyzer.lookup_definition(&content, &word) else {
            return Ok(None);
        };
        let lines: Vec<&str> = content.lines().collect();
        Ok(Some(GotoDefinitionResponse::Scalar(Location::new(
            uri,
            to_lsp_range(&lines, span),
        ))))
    }

    async fn document_symbol(&self, params: DocumentSymbolParams) -> Result<Option<DocumentSymbolResponse>> {
        let uri = &params.text_document.uri;
        let Some(doc) = self.documents.get(uri) else {
            return Ok(None);
        };
        let content = doc.content.to_string();
        drop(doc);

        let lines: Vec<&str> = content.lines().collect();
        let symbols = to_document_symbols(&lines, &self.analyzer.analyze(&content).symbols);
        if symbols.is_empty() {
            return Ok(None);
        }
        Ok(Some(DocumentSymbolResponse::Nested(symbols)))
    }

    async fn diagnostic(&self, params: DocumentDiagnosticParams) -> Result<DocumentDiagnosticReportResult> {
        let diagnostics = self.compute_diagnostics(&params.text_document.uri);

        Ok(DocumentDiagnosticReportResult::Report(DocumentDiagnosticReport::Full(
            RelatedFullDocumentDiagnosticReport {
                related_documents: None,
                full_document_diagnostic_report: FullDocumentDiagnosticReport {
                    result_id: None,
                    items: diagnostics,
                },
            },
        )))
    }
}
