//! Lenient decoding of success payloads.
//!
//! Upstreams sometimes double-encode JSON as a JSON string, and some return plain text. The
//! pipeline is: unquote → parse object → wrap, each stage falling back to the next.

use serde_json::{Map, Value as JsonValue};

pub const FALLBACK_FIELD: &str = "result";

/// Which text the parse stage worked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Unquoted,
    Raw,
}

/// Where the rendering context came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextSource {
    Parsed,
    Wrapped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPayload {
    pub text: String,
    pub text_source: TextSource,
    pub context: JsonValue,
    pub context_source: ContextSource,
}

/// Stage 1: decode `raw` as a quoted JSON string literal.
pub fn unquote_payload(raw: &str) -> Option<String> {
    serde_json::from_str::<String>(raw).ok()
}

/// Stage 2: parse `text` as a JSON object. Arrays and scalars do not count.
pub fn parse_object(text: &str) -> Option<Map<String, JsonValue>> {
    serde_json::from_str::<Map<String, JsonValue>>(text).ok()
}

/// Stage 3: a single-field object so templates always see the same shape.
pub fn wrap_fallback(text: &str) -> JsonValue {
    let mut map = Map::new();
    map.insert(FALLBACK_FIELD.to_string(), JsonValue::String(text.to_string()));
    JsonValue::Object(map)
}

pub fn decode_success_payload(raw: &str) -> DecodedPayload {
    let (text, text_source) = match unquote_payload(raw) {
        Some(unquoted) => (unquoted, TextSource::Unquoted),
        None => (raw.to_string(), TextSource::Raw),
    };
    let (context, context_source) = match parse_object(&text) {
        Some(obj) => (JsonValue::Object(obj), ContextSource::Parsed),
        None => (wrap_fallback(&text), ContextSource::Wrapped),
    };
    DecodedPayload {
        text,
        text_source,
        context,
        context_source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unquote_only_accepts_string_literals() {
        assert_eq!(unquote_payload(r#""hi""#).as_deref(), Some("hi"));
        assert_eq!(unquote_payload(r#"{"a":1}"#), None);
        assert_eq!(unquote_payload("plain"), None);
    }

    #[test]
    fn parse_object_rejects_arrays_and_scalars() {
        assert!(parse_object(r#"{"a":1}"#).is_some());
        assert!(parse_object("[1,2]").is_none());
        assert!(parse_object("42").is_none());
    }

    #[test]
    fn wrap_uses_the_result_field() {
        assert_eq!(wrap_fallback("plain text"), json!({"result": "plain text"}));
    }

    #[test]
    fn pipeline_reports_each_stage() {
        let d = decode_success_payload(r#""{\"n\":1}""#);
        assert_eq!(d.text_source, TextSource::Unquoted);
        assert_eq!(d.context_source, ContextSource::Parsed);
        assert_eq!(d.context, json!({"n": 1}));

        let d = decode_success_payload(r#""just words""#);
        assert_eq!(d.text_source, TextSource::Unquoted);
        assert_eq!(d.context, json!({"result": "just words"}));

        let d = decode_success_payload("plain text");
        assert_eq!(d.text_source, TextSource::Raw);
        assert_eq!(d.context_source, ContextSource::Wrapped);
    }
}
