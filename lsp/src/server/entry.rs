use std::sync::Arc;

use tower_lsp::{LspService, Server};
use tracing::error;

use dialplan_core::{docs::DocTable, DialplanAnalyzer};

use super::cli::{functions_path, try_cli_analyze};
use super::state::DialplanLanguageServer;

pub async fn run() {
    if let Some(output) = try_cli_analyze().unwrap_or_else(|e| {
        eprintln!("dialplan-lsp analyze error: {e}");
        std::process::exit(2);
    }) {
        println!("{}", output);
        return;
    }

    // Stdout carries the LSP transport; logs go to stderr.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // A missing or malformed documentation table disables hover only; the
    // bracket, symbol, and definition providers do not depend on it.
    let docs = match DocTable::load(&functions_path()) {
        Ok(table) => Some(Arc::new(table)),
        Err(err) => {
            error!("documentation table unavailable, hover disabled: {err:#}");
            None
        }
    };
    let analyzer = DialplanAnalyzer::new(docs);

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(move |client| DialplanLanguageServer::new(client, analyzer.clone()));
    Server::new(stdin, stdout, socket).serve(service).await;
}
