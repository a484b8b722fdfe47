pub mod definition;
pub mod docs;
pub mod scan;
pub mod span;
pub mod structure;

use std::sync::Arc;

use serde::Serialize;

use crate::docs::DocTable;
use crate::span::{Diagnostic, Span};
use crate::structure::Symbol;

/// Result of analyzing one dialplan document.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub diagnostics: Vec<Diagnostic>,
    pub symbols: Vec<Symbol>,
}

/// Facade over the scanning and lookup passes. The documentation table is
/// injected once at construction; everything else is a pure function of the
/// document text.
#[derive(Debug, Clone, Default)]
pub struct DialplanAnalyzer {
    docs: Option<Arc<DocTable>>,
}

impl DialplanAnalyzer {
    pub fn new(docs: Option<Arc<DocTable>>) -> Self {
        Self { docs }
    }

    pub fn has_docs(&self) -> bool {
        self.docs.is_some()
    }

    /// Full scan: bracket diagnostics, duplicate step labels, and the
    /// outline tree. Replaces any previous result wholesale.
    pub fn analyze(&self, content: &str) -> AnalysisResult {
        let mut diagnostics = scan::scan_document(content);
        diagnostics.extend(structure::duplicate_step_diagnostics(content));
        AnalysisResult {
            diagnostics,
            symbols: structure::build_symbols(content),
        }
    }

    /// Span of the first `same => n(word)` line, if any.
    pub fn lookup_definition(&self, content: &str, word: &str) -> Option<Span> {
        definition::find_step_definition(content, word)
    }

    /// Rendered Markdown for the word under the cursor, if the
    /// documentation table knows it.
    pub fn lookup_hover(&self, word: &str) -> Option<String> {
        let docs = self.docs.as_ref()?;
        let entry = docs.get(word)?;
        Some(docs::render_hover(word, entry))
    }
}
