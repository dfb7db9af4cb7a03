//! Lenient parsing of Sui object responses into [`RawMessage`] records.
//!
//! Move object fields arrive as loosely typed JSON: numbers may be JSON
//! numbers, decimal strings or `0x` hex strings, and any field may be missing.
//! Missing or mistyped fields fall back to defaults so one bad record never
//! fails a page.

use serde_json::Value;

use super::types::{MessageStatus, RawMessage};

/// Coerce a JSON value into an unsigned integer, defaulting to 0.
pub(crate) fn to_number(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex) => leading_digits(hex, 16),
                None => leading_digits(s, 10),
            }
        }
        _ => 0,
    }
}

/// Parse the leading run of digits in `radix`, so "42abc" reads as 42 and
/// hex "1fzz" as 31.
fn leading_digits(s: &str, radix: u32) -> u64 {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(idx, _)| idx)
        .unwrap_or(s.len());
    u64::from_str_radix(&s[..end], radix).unwrap_or(0)
}

fn string_field(fields: &Value, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Keep string and scalar tag entries, dropping empties and nested values.
pub(crate) fn parse_tags(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Extract the message object id from a dynamic field's `name.value`.
///
/// The value is either the id string itself or a struct carrying it under
/// `id` or `fields.id`.
pub(crate) fn extract_message_id(field: &Value) -> Option<String> {
    let raw = field.get("name")?.get("value")?;
    match raw {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(_) => raw
            .get("id")
            .and_then(Value::as_str)
            .or_else(|| raw.get("fields").and_then(|f| f.get("id")).and_then(Value::as_str))
            .filter(|id| !id.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// Parse one entry of a `sui_multiGetObjects` response.
///
/// Returns `None` for objects that are missing, not Move objects, or carry no
/// field map; those are skipped rather than defaulted.
pub(crate) fn parse_message_object(object: &Value) -> Option<RawMessage> {
    let data = object.get("data").filter(|d| !d.is_null())?;
    let content = data.get("content").filter(|c| !c.is_null())?;
    if content.get("dataType").and_then(Value::as_str) != Some("moveObject") {
        return None;
    }
    let fields = content.get("fields").filter(|f| f.is_object())?;

    let status_raw = fields.get("status").map(to_number).unwrap_or(0);
    let number = |key: &str| fields.get(key).map(to_number).unwrap_or(0);

    Some(RawMessage {
        object_id: data
            .get("objectId")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        author: string_field(fields, "author"),
        title_hash: string_field(fields, "title_hash"),
        content_hash: string_field(fields, "content_hash"),
        tags: parse_tags(fields.get("tags")),
        likes: number("likes"),
        alerts: number("alerts"),
        status: MessageStatus::from_code(status_raw),
        status_raw,
        created_epoch: number("created_at"),
        updated_epoch: number("updated_at"),
    })
}
