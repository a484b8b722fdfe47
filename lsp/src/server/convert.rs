//! Mapping from core analysis types to LSP protocol types.
//!
//! Core spans carry char-count columns; the protocol wants UTF-16 code
//! units, so every outbound range is converted against the line it sits on.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, DocumentSymbol, Position, Range, SymbolKind};

use dialplan_core::span::{Diagnostic as CoreDiagnostic, Span};
use dialplan_core::structure::{ContextSymbol, ExtenSymbol, Symbol};

use super::text::utf16_column;

fn to_lsp_position(lines: &[&str], line: u32, char_column: u32) -> Position {
    let column = match lines.get(line as usize) {
        Some(text) => {
            let chars: Vec<char> = text.chars().collect();
            utf16_column(&chars, char_column as usize)
        }
        None => char_column,
    };
    Position::new(line, column)
}

pub(crate) fn to_lsp_range(lines: &[&str], span: Span) -> Range {
    Range::new(
        to_lsp_position(lines, span.start.line, span.start.column),
        to_lsp_position(lines, span.end.line, span.end.column),
    )
}

pub(crate) fn to_lsp_diagnostic(lines: &[&str], diagnostic: &CoreDiagnostic) -> Diagnostic {
    Diagnostic {
        range: to_lsp_range(lines, diagnostic.span),
        severity: Some(DiagnosticSeverity::ERROR),
        source: Some("dialplan".to_string()),
        message: diagnostic.message.clone(),
        ..Default::default()
    }
}

pub(crate) fn to_document_symbols(lines: &[&str], symbols: &[Symbol]) -> Vec<DocumentSymbol> {
    symbols
        .iter()
        .map(|symbol| match symbol {
            Symbol::Context(ctx) => context_symbol(lines, ctx),
            Symbol::Exten(exten) => exten_symbol(lines, exten),
        })
        .collect()
}

fn context_symbol(lines: &[&str], ctx: &ContextSymbol) -> DocumentSymbol {
    let range = to_lsp_range(lines, ctx.span);
    #[allow(deprecated)]
    DocumentSymbol {
        name: ctx.name.clone(),
        detail: Some("context".to_string()),
        kind: SymbolKind::NAMESPACE,
        tags: None,
        deprecated: None,
        range,
        selection_range: range,
        children: Some(ctx.children.iter().map(|e| exten_symbol(lines, e)).collect()),
    }
}

fn exten_symbol(lines: &[&str], exten: &ExtenSymbol) -> DocumentSymbol {
    let range = to_lsp_range(lines, exten.span);
    #[allow(deprecated)]
    DocumentSymbol {
        name: exten.name.clone(),
        detail: Some("extension".to_string()),
        kind: SymbolKind::FUNCTION,
        tags: None,
        deprecated: None,
        range,
        selection_range: range,
        children: None,
    }
}
