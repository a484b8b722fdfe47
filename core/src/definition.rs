//! Go-to-definition for step labels.
//!
//! A label used anywhere in the document resolves to the first
//! `same => n(label)` line, searched over the whole document with no
//! context scoping.

use regex::Regex;

use crate::span::{Position, Span};

/// Find the first `same => n(word)` declaration and return its span, or
/// `None` when the document declares no such step.
pub fn find_step_definition(content: &str, word: &str) -> Option<Span> {
    if word.is_empty() {
        return None;
    }
    let pattern = format!(r"(?m)^same\s*=>\s*n\s*\(\s*{}\s*\)", regex::escape(word));
    let re = Regex::new(&pattern).ok()?;
    let found = re.find(content)?;

    let line = content[..found.start()].matches('\n').count() as u32;
    // The pattern is anchored at a line start and cannot span lines.
    let len = content[found.start()..found.end()].chars().count() as u32;
    Some(Span::new(Position::new(line, 0), Position::new(line, len)))
}
