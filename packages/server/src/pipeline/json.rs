//! Robust JSON extraction from model output.
//!
//! Model responses arrive wrapped in prose, markdown fences, or truncated
//! mid-object. This module recovers a parseable JSON value when possible:
//! strip fences, locate the first balanced object or array, and close
//! dangling strings/brackets on truncated output before parsing.

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;

/// Extract and deserialize the first JSON value found in `text`.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    let candidate =
        extract_json_str(text).ok_or_else(|| anyhow!("no JSON value found in response"))?;
    serde_json::from_str(&candidate).map_err(|e| anyhow!("failed to parse extracted JSON: {}", e))
}

/// Locate the first JSON object or array in `text`, repairing truncation.
///
/// Returns the candidate JSON string, or `None` when there is no opening
/// brace/bracket at all.
pub fn extract_json_str(text: &str) -> Option<String> {
    let stripped = strip_fences(text);
    let start = stripped.find(['{', '['])?;
    let body = &stripped[start..];

    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                // Mismatched closer: give up on repair, cut here
                if stack.pop() != Some(c) {
                    return Some(body[..i].to_string());
                }
                if stack.is_empty() {
                    return Some(body[..=i].to_string());
                }
            }
            _ => {}
        }
    }

    // Ran out of input with the value still open: repair
    let mut repaired = body.trim_end().to_string();
    if in_string {
        repaired.push('"');
    }
    // A dangling comma or colon would still defeat the parse
    while repaired.ends_with(',') || repaired.ends_with(':') {
        repaired.pop();
        let trimmed = repaired.trim_end().len();
        repaired.truncate(trimmed);
    }
    while let Some(closer) = stack.pop() {
        repaired.push(closer);
    }
    Some(repaired)
}

fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn parses_plain_object() {
        let v: Value = extract_json(r#"{"a": 1}"#).unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn strips_markdown_fences() {
        let v: Value = extract_json("```json\n{\"a\": [1, 2]}\n```").unwrap();
        assert_eq!(v["a"][1], 2);
    }

    #[test]
    fn skips_leading_prose() {
        let text = "Here is the plan you asked for:\n{\"strategy\": \"grow\"}";
        let v: Value = extract_json(text).unwrap();
        assert_eq!(v["strategy"], "grow");
    }

    #[test]
    fn ignores_braces_inside_strings() {
        let v: Value = extract_json(r#"{"a": "curly } brace", "b": 2}"#).unwrap();
        assert_eq!(v["b"], 2);
    }

    #[test]
    fn repairs_truncated_object() {
        let text = r#"{"weeks": [{"week": 1, "theme": "Setup"#;
        let v: Value = extract_json(text).unwrap();
        assert_eq!(v["weeks"][0]["week"], 1);
        assert_eq!(v["weeks"][0]["theme"], "Setup");
    }

    #[test]
    fn repairs_truncation_after_comma() {
        let text = r#"{"items": ["a", "b","#;
        let v: Value = extract_json(text).unwrap();
        assert_eq!(v["items"][1], "b");
    }

    #[test]
    fn no_json_is_an_error() {
        let result: Result<Value> = extract_json("I could not produce a plan.");
        assert!(result.is_err());
    }

    #[test]
    fn first_value_wins() {
        let text = r#"{"first": true} {"second": true}"#;
        let v: Value = extract_json(text).unwrap();
        assert_eq!(v["first"], true);
        assert!(v.get("second").is_none());
    }
}
