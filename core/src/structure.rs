//! Structural recognizer for dialplan documents.
//!
//! Two independent passes over the raw lines: one tracks the active
//! (context, extension) scope and flags duplicate step labels, the other
//! builds the context/extension outline tree.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::span::{Diagnostic, Position, Span};

/// `[name]` at line start; the name runs up to the first `]`.
static CONTEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([^\]]*)\]").unwrap());
/// `exten => name` with the name terminated by `,` or whitespace.
static EXTEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^exten\s*=>\s*([^,\s]+)").unwrap());
/// `same => n(label)` step-label declaration.
static STEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^same\s*=>\s*n\s*\(\s*([^)\s]+)\s*\)").unwrap());

/// One `exten =>` block: first-seen declaration of a distinct name within
/// its context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtenSymbol {
    pub name: String,
    pub span: Span,
}

/// One `[name]` context header and the extensions declared under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextSymbol {
    pub name: String,
    pub span: Span,
    pub children: Vec<ExtenSymbol>,
}

/// Outline entry. An extension that appears before any context header
/// surfaces at the top level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Symbol {
    Context(ContextSymbol),
    Exten(ExtenSymbol),
}

pub fn context_header_name(line: &str) -> Option<&str> {
    CONTEXT_RE.captures(line).map(|c| c.get(1).unwrap().as_str())
}

pub fn exten_decl_name(line: &str) -> Option<&str> {
    EXTEN_RE.captures(line).map(|c| c.get(1).unwrap().as_str())
}

pub fn step_label(line: &str) -> Option<&str> {
    STEP_RE.captures(line).map(|c| c.get(1).unwrap().as_str())
}

/// Flag step labels declared twice within the same (context, extension)
/// scope. A new context header or a new extension name resets the scope.
pub fn duplicate_step_diagnostics(content: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut current_context = String::new();
    let mut current_exten = String::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, line) in content.lines().enumerate() {
        if let Some(name) = context_header_name(line) {
            current_context = name.to_string();
            seen.clear();
        } else if let Some(name) = exten_decl_name(line) {
            if name != current_exten {
                current_exten = name.to_string();
                seen.clear();
            }
        } else if let Some(label) = step_label(line) {
            if !seen.insert(label.to_string()) {
                diagnostics.push(Diagnostic::error(
                    Span::line(index as u32, line.chars().count() as u32),
                    format!(
                        "Duplicate function name: {} in context '{}' and extension '{}'",
                        label, current_context, current_exten
                    ),
                ));
            }
        }
    }

    diagnostics
}

struct OpenContext {
    name: String,
    start_line: u32,
    children: Vec<ExtenSymbol>,
}

/// Span from the start of `start_line` to the end of `end_line`.
fn span_lines(lines: &[&str], start_line: u32, end_line: u32) -> Span {
    let end_len = lines
        .get(end_line as usize)
        .map(|l| l.chars().count() as u32)
        .unwrap_or(0);
    Span::new(Position::new(start_line, 0), Position::new(end_line, end_len))
}

/// Attach a finished extension to the open context, or surface it at the
/// top level when no context header has been seen yet.
fn close_exten(
    lines: &[&str],
    open: Option<(String, u32)>,
    end_line: u32,
    context: &mut Option<OpenContext>,
    out: &mut Vec<Symbol>,
) {
    if let Some((name, start)) = open {
        let symbol = ExtenSymbol {
            name,
            span: span_lines(lines, start, end_line),
        };
        match context {
            Some(ctx) => ctx.children.push(symbol),
            None => out.push(Symbol::Exten(symbol)),
        }
    }
}

fn close_context(lines: &[&str], open: Option<OpenContext>, end_line: u32, out: &mut Vec<Symbol>) {
    if let Some(ctx) = open {
        out.push(Symbol::Context(ContextSymbol {
            name: ctx.name,
            span: span_lines(lines, ctx.start_line, end_line),
            children: ctx.children,
        }));
    }
}

/// Build the nested outline tree. Each symbol spans from its declaration
/// line to the line before the next structural marker, or the last line of
/// the file. Siblings keep file order.
pub fn build_symbols(content: &str) -> Vec<Symbol> {
    let lines: Vec<&str> = content.lines().collect();
    let mut symbols = Vec::new();
    let mut open_context: Option<OpenContext> = None;
    let mut open_exten: Option<(String, u32)> = None;

    for (index, &line) in lines.iter().enumerate() {
        let index = index as u32;
        if let Some(name) = context_header_name(line) {
            let prev_end = index.saturating_sub(1);
            close_exten(&lines, open_exten.take(), prev_end, &mut open_context, &mut symbols);
            close_context(&lines, open_context.take(), prev_end, &mut symbols);
            open_context = Some(OpenContext {
                name: name.to_string(),
                start_line: index,
                children: Vec::new(),
            });
        } else if let Some(name) = exten_decl_name(line) {
            let is_new = open_exten.as_ref().map(|(n, _)| n != name).unwrap_or(true);
            if is_new {
                close_exten(
                    &lines,
                    open_exten.take(),
                    index.saturating_sub(1),
                    &mut open_context,
                    &mut symbols,
                );
                open_exten = Some((name.to_string(), index));
            }
        }
    }

    let last_line = (lines.len() as u32).saturating_sub(1);
    close_exten(&lines, open_exten.take(), last_line, &mut open_context, &mut symbols);
    close_context(&lines, open_context.take(), last_line, &mut symbols);

    symbols
}
