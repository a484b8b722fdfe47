//! Documentation table for dialplan applications and functions.
//!
//! Loaded once from a static JSON file at startup and immutable afterwards.
//! The table key is the case-sensitive application name; values carry the
//! synopsis/description/syntax/arguments/link scraped offline from the
//! upstream documentation site.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentDoc {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub sub_arguments: Vec<ArgumentDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocEntry {
    pub synopsis: String,
    pub description: String,
    pub syntax: String,
    #[serde(default)]
    pub arguments: Vec<ArgumentDoc>,
    pub link: String,
}

/// Immutable lookup table keyed by application name.
#[derive(Debug, Clone, Default)]
pub struct DocTable {
    entries: HashMap<String, DocEntry>,
}

impl DocTable {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read documentation file '{}'", path.display()))?;
        let entries: HashMap<String, DocEntry> = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed documentation file '{}'", path.display()))?;
        Ok(Self { entries })
    }

    pub fn from_entries(entries: HashMap<String, DocEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&DocEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Render the fixed hover template for one entry.
pub fn render_hover(name: &str, entry: &DocEntry) -> String {
    let mut out = String::new();
    out.push_str(&format!("**{}**\n\n", name));
    out.push_str(&format!("*Synopsis:* {}\n\n", entry.synopsis));
    out.push_str(&format!("*Description:* {}\n\n", entry.description));
    out.push_str(&format!("*Syntax:* `{}`\n\n", entry.syntax));

    if !entry.arguments.is_empty() {
        out.push_str("*Arguments:*\n\n");
        for argument in &entry.arguments {
            out.push_str(&format!("- `{}` - {}\n", argument.name, argument.description));
        }
        out.push('\n');
    }

    out.push_str(&format!("[See more]({})", entry.link));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(arguments: Vec<ArgumentDoc>) -> DocEntry {
        DocEntry {
            synopsis: "Answer a channel if ringing.".to_string(),
            description: "If the call has not been answered, this application will answer it.".to_string(),
            syntax: "Answer([delay])".to_string(),
            arguments,
            link: "https://docs.asterisk.org/".to_string(),
        }
    }

    #[test]
    fn hover_renders_all_fields() {
        let rendered = render_hover(
            "Answer",
            &entry(vec![ArgumentDoc {
                name: "delay".to_string(),
                description: "Milliseconds to wait before answering.".to_string(),
                required: false,
                sub_arguments: Vec::new(),
            }]),
        );
        assert!(rendered.starts_with("**Answer**\n\n"));
        assert!(rendered.contains("*Synopsis:* Answer a channel if ringing."));
        assert!(rendered.contains("*Description:*"));
        assert!(rendered.contains("*Syntax:* `Answer([delay])`"));
        assert!(rendered.contains("*Arguments:*\n\n- `delay` - Milliseconds to wait before answering."));
        assert!(rendered.ends_with("[See more](https://docs.asterisk.org/)"));
    }

    #[test]
    fn hover_omits_argument_section_when_empty() {
        let rendered = render_hover("Answer", &entry(Vec::new()));
        assert!(!rendered.contains("*Arguments:*"));
        assert!(rendered.contains("*Syntax:*"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut entries = HashMap::new();
        entries.insert("Answer".to_string(), entry(Vec::new()));
        let table = DocTable::from_entries(entries);
        assert!(table.get("Answer").is_some());
        assert!(table.get("answer").is_none());
    }

    #[test]
    fn sub_arguments_deserialize_from_camel_case() {
        let raw = r#"{
            "synopsis": "s", "description": "d", "syntax": "AGI(command)",
            "arguments": [
                {"name": "args", "description": "arguments", "required": false,
                 "subArguments": [{"name": "arg1", "description": "first", "required": true}]}
            ],
            "link": "https://docs.asterisk.org/"
        }"#;
        let entry: DocEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.arguments[0].sub_arguments.len(), 1);
        assert!(entry.arguments[0].sub_arguments[0].required);
    }
}
