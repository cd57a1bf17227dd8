//! Request parameter handling.
//!
//! Providers accept nested key/value structures but speak flat
//! `application/x-www-form-urlencoded` on the wire: a nested mapping under
//! key `k` with inner key `i` is sent as a parameter named `k[i]`. Flattening
//! is recursive, so deeper nestings produce `k[i][j]` and so on.

use serde_json::Value;
use url::form_urlencoded;

/// Flatten a JSON object into wire-ready key/value pairs.
///
/// The result is a parameter *set*: pair order follows the source map's
/// iteration order and carries no meaning.
pub fn flatten(params: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Value::Object(map) = params {
        for (key, value) in map {
            push_pairs(key, value, &mut pairs);
        }
    }
    pairs
}

fn push_pairs(key: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (inner_key, inner_value) in map {
                push_pairs(&format!("{}[{}]", key, inner_key), inner_value, pairs);
            }
        }
        other => pairs.push((key.to_string(), scalar_to_string(other))),
    }
}

/// String leaves pass through unquoted; everything else uses its compact
/// JSON form.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// URL-encode pairs into a form body
pub fn form_encode(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

/// Append pairs to a URL as a query string, respecting an existing query
pub fn url_concat(url: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return url.to_string();
    }

    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, form_encode(pairs))
}
