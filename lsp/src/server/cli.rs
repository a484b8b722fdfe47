use std::path::{Component, Path, PathBuf};

use anyhow::Context;

use dialplan_core::{AnalysisResult, DialplanAnalyzer};

const DEFAULT_FUNCTIONS_PATH: &str = "functions/functions-16.json";

/// Documentation table location: `--functions <path>` wins, then the
/// `DIALPLAN_FUNCTIONS` environment variable, then the default.
pub(crate) fn functions_path() -> PathBuf {
    let args: Vec<String> = std::env::args().collect();
    if let Some(i) = args.iter().position(|a| a == "--functions") {
        if let Some(path) = args.get(i + 1) {
            return PathBuf::from(path);
        }
    }
    if let Ok(path) = std::env::var("DIALPLAN_FUNCTIONS") {
        return PathBuf::from(path);
    }
    default_functions_path()
}

/// The default table ships next to the installed binary. Editors launch the
/// server from arbitrary working directories, so a cwd-relative lookup only
/// serves as the development fallback.
fn default_functions_path() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(DEFAULT_FUNCTIONS_PATH);
            if candidate.exists() {
                return candidate;
            }
        }
    }
    PathBuf::from(DEFAULT_FUNCTIONS_PATH)
}

/// One line per diagnostic, 1-based `Line l:c: message` display coordinates.
pub(crate) fn render_errors_only(analysis: &AnalysisResult) -> String {
    if analysis.diagnostics.is_empty() {
        return "No errors found".to_string();
    }
    analysis
        .diagnostics
        .iter()
        .map(|d| {
            format!(
                "Line {}:{}: {}",
                d.span.start.line + 1,
                d.span.start.column + 1,
                d.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn render_json(analysis: &AnalysisResult) -> anyhow::Result<String> {
    let output = serde_json::json!({
        "diagnostics": analysis.diagnostics,
        "symbols": analysis.symbols,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

pub(crate) fn try_cli_analyze() -> anyhow::Result<Option<String>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() <= 1 {
        return Ok(None);
    }

    if let Some(i) = args.iter().position(|a| a == "--analyze") {
        let mut path_index = i + 1;
        while path_index < args.len() && args[path_index].starts_with("--") {
            if args[path_index] == "--functions" {
                path_index += 1;
            }
            path_index += 1;
        }

        let path = args.get(path_index).cloned().ok_or_else(|| {
            anyhow::anyhow!(
                "Usage: dialplan-lsp --analyze [--errors-only] <relative-file-path>\n  --analyze <file>     : Full analysis with JSON output\n  --errors-only        : Show only errors in simple format"
            )
        })?;

        let errors_only = args.iter().any(|a| a == "--errors-only");
        let content = read_file_content(&path)?;

        let analyzer = DialplanAnalyzer::default();
        let analysis = analyzer.analyze(&content);

        if errors_only {
            return Ok(Some(render_errors_only(&analysis)));
        }
        return Ok(Some(render_json(&analysis)?));
    }

    Ok(None)
}

pub(crate) fn is_safe_path(path: &str) -> bool {
    let path = Path::new(path);

    if path.as_os_str().is_empty() {
        return false;
    }
    if path.is_absolute() {
        return false;
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return false;
    }

    let s = path.to_string_lossy();
    let suspicious = ['\0', '\n', '\r', '\t'];
    if s.chars().any(|c| suspicious.contains(&c)) {
        return false;
    }
    if s.len() >= 2 {
        let bytes = s.as_bytes();
        if bytes[1] == b':' {
            return false;
        }
    }
    true
}

pub(crate) fn read_file_content(path: &str) -> anyhow::Result<String> {
    if !is_safe_path(path) {
        return Err(anyhow::anyhow!("Unsafe file path: {}", path));
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file '{}'", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_traversal_and_absolute_paths() {
        assert!(!is_safe_path("/etc/passwd"));
        assert!(!is_safe_path("../secrets.conf"));
        assert!(!is_safe_path("a/../../b"));
        assert!(!is_safe_path(""));
        assert!(!is_safe_path("C:evil"));
        assert!(is_safe_path("extensions.conf"));
        assert!(is_safe_path("plans/extensions.conf"));
    }

    #[test]
    fn errors_only_output_uses_one_based_coordinates() {
        let analysis = DialplanAnalyzer::default().analyze("(\n[ok]\n)");
        let rendered = render_errors_only(&analysis);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Line 1:1: Unmatched opening bracket: (, expected )",
                "Line 3:1: Unmatched closing bracket: )",
            ]
        );
    }

    #[test]
    fn errors_only_output_for_clean_file() {
        let analysis = DialplanAnalyzer::default().analyze("[default]\nexten => 100,1,Answer()\n");
        assert_eq!(render_errors_only(&analysis), "No errors found");
    }

    #[test]
    fn json_output_carries_diagnostics_and_symbols() {
        let analysis = DialplanAnalyzer::default().analyze("[default]\nexten => 100,1,Answer(\n");
        let rendered = render_json(&analysis).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["diagnostics"].as_array().unwrap().len(), 1);
        assert_eq!(value["symbols"][0]["name"], "default");
        assert_eq!(value["symbols"][0]["kind"], "context");
    }

    #[test]
    fn default_functions_path_ends_with_data_file() {
        assert!(default_functions_path().ends_with("functions/functions-16.json"));
    }
}
