use crate::{BodySnippetConfig, SecretString};
use http::HeaderMap;
use serde_json::Value;

use super::redact::{redact_text, truncate_utf8};

pub(crate) fn request_id(headers: &HeaderMap) -> Option<Box<str>> {
    for name in ["x-request-id", "x-correlation-id", "x-runtime-request-id"] {
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string().into_boxed_str());
            }
        }
    }
    None
}

/// Pull the API-reported message out of a decoded body.
///
/// Gumroad reports failures as `{"success": false, "error": {"message": ".."}}`;
/// a flat `message` or `error` string is accepted as well.
pub(crate) fn message_from_value(value: &Value) -> Option<Box<str>> {
    let nested = value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str);
    let flat = value.get("message").and_then(Value::as_str);
    let bare = value.get("error").and_then(Value::as_str);

    [nested, flat, bare]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(|msg| msg.to_string().into_boxed_str())
}

pub(crate) fn extract_message(body: &[u8]) -> Option<Box<str>> {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return None;
    };
    message_from_value(&value)
}

pub(crate) fn body_snippet(
    body: &[u8],
    config: BodySnippetConfig,
    token: Option<&SecretString>,
) -> Option<Box<str>> {
    if !config.enabled {
        return None;
    }

    let body = String::from_utf8_lossy(body);
    let snippet = truncate_utf8(&body, config.max_bytes).to_string();
    Some(redact_text(snippet, token).into_boxed_str())
}
