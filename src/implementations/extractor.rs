use log::{ debug, warn };
use regex::Regex;
use serde_json::{ Map, Value };
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").expect("fenced block pattern is valid")
});

static OBJECT_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[\s\S]*\}").expect("object span pattern is valid")
});

/// Recover a JSON object from free-form model output.
///
/// Looks inside the first fenced code block when there is one, then narrows to
/// the span between the first `{` and the last `}`. Anything that does not
/// parse as a JSON object yields an empty map; callers fall back to defaults.
pub fn extract(raw_text: &str) -> Map<String, Value> {
    debug!("Parsing JSON from model response, {} characters", raw_text.len());

    let mut candidate = raw_text;

    if let Some(inner) = FENCED_BLOCK.captures(candidate).and_then(|c| c.get(1)) {
        candidate = inner.as_str();
        debug!("JSON found in markdown block");
    }

    if let Some(span) = OBJECT_SPAN.find(candidate) {
        candidate = span.as_str();
        debug!("JSON object span extracted");
    }

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => {
            debug!("JSON parsed, {} keys", map.len());
            map
        }
        Ok(other) => {
            warn!("Model response is JSON but not an object ({}), ignoring it", kind_of(&other));
            Map::new()
        }
        Err(e) => {
            warn!("Failed to parse JSON from model response: {}", e);
            debug!("Offending content: {}", preview(candidate, 200));
            Map::new()
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// First `limit` characters of `text`, for logs
pub(crate) fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
