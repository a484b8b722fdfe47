//! Line-oriented lexical scanner and bracket matcher.
//!
//! Each line is scanned once, left to right. Characters inside string
//! literals are inert, `;` outside a string ends the line, and bracket
//! frames never survive past the end of the line.

use crate::span::{Diagnostic, Span};

/// Scanner state for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    /// Inside a string literal opened with the given delimiter.
    InString(char),
    /// A `;` was seen outside a string; the rest of the line is comment.
    LineDone,
}

#[derive(Debug, Clone, Copy)]
struct BracketFrame {
    open: char,
}

fn opener_for(close: char) -> char {
    match close {
        '}' => '{',
        ']' => '[',
        ')' => '(',
        _ => unreachable!("not a closing bracket: {close}"),
    }
}

fn closer_for(open: char) -> char {
    match open {
        '{' => '}',
        '[' => ']',
        '(' => ')',
        _ => unreachable!("not an opening bracket: {open}"),
    }
}

/// Scan a single line for bracket errors. Leaves no state behind for the
/// next line.
pub fn scan_line(line_index: u32, line: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut stack: Vec<BracketFrame> = Vec::new();
    let mut state = ScanState::Normal;
    let mut prev: Option<char> = None;
    let line_len = line.chars().count() as u32;
    let span = Span::line(line_index, line_len);

    for ch in line.chars() {
        match state {
            ScanState::LineDone => break,
            ScanState::InString(delim) => {
                // Single-lookback escape rule: a backslash right before the
                // delimiter keeps the string open.
                if ch == delim && prev != Some('\\') {
                    state = ScanState::Normal;
                }
            }
            ScanState::Normal => match ch {
                ';' => state = ScanState::LineDone,
                '"' | '\'' => state = ScanState::InString(ch),
                '{' | '[' | '(' => stack.push(BracketFrame { open: ch }),
                '}' | ']' | ')' => match stack.pop() {
                    None => {
                        diagnostics.push(Diagnostic::error(span, format!("Unmatched closing bracket: {ch}")));
                    }
                    Some(frame) if frame.open != opener_for(ch) => {
                        diagnostics.push(Diagnostic::error(
                            span,
                            format!("Mismatched closing bracket: {ch}, expected {}", closer_for(frame.open)),
                        ));
                    }
                    Some(_) => {}
                },
                _ => {}
            },
        }
        prev = Some(ch);
    }

    while let Some(frame) = stack.pop() {
        diagnostics.push(Diagnostic::error(
            span,
            format!("Unmatched opening bracket: {}, expected {}", frame.open, closer_for(frame.open)),
        ));
    }

    diagnostics
}

/// Scan every line of a document. The result replaces any previous
/// diagnostic list wholesale.
pub fn scan_document(content: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for (index, line) in content.lines().enumerate() {
        diagnostics.extend(scan_line(index as u32, line));
    }
    diagnostics
}
