//! Best-effort JSON recovery from free-form model output.
//!
//! Order of attempts: direct parse, the largest `{...}` span, the largest `[...]`
//! span, then each span again with trailing commas removed.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::LlmError;

const PREVIEW_CHARS: usize = 200;

static RE_TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*([}\]])").unwrap());

pub fn extract_json(raw: &str) -> Result<Value, LlmError> {
    let text = strip_json_fences(raw);

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }

    let spans: Vec<&str> = [span_between(text, '{', '}'), span_between(text, '[', ']')]
        .into_iter()
        .flatten()
        .collect();

    for span in &spans {
        if let Ok(value) = serde_json::from_str::<Value>(span) {
            return Ok(value);
        }
    }

    for span in &spans {
        let repaired = RE_TRAILING_COMMA.replace_all(span, "$1");
        if let Ok(value) = serde_json::from_str::<Value>(&repaired) {
            return Ok(value);
        }
    }

    Err(LlmError::JsonExtraction {
        preview: preview(raw),
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences, including fences that
/// appear after some leading prose.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(start) = text.find("```") else {
        return text;
    };

    let after_open = &text[start + 3..];
    let body = after_open.strip_prefix("json").unwrap_or(after_open);
    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// From the first `open` to the last `close`, inclusive.
fn span_between(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

fn preview(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}...")
}
