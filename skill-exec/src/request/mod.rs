use std::collections::BTreeMap;

use serde_json::{Number, Value as JsonValue};
use skill_core::ActionDefinition;
use tracing::debug;

use crate::binder::BoundArguments;
use crate::credentials::{redact_headers, AuthHeader};

pub const CONTENT_TYPE: &str = "content-type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A fully formed outbound request.
#[derive(Clone, PartialEq)]
pub struct BoundRequest {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
    /// Name of the header carrying the credential, kept for redaction.
    pub auth_header: Option<String>,
}

impl BoundRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_json(&self) -> Option<JsonValue> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }

    pub fn redacted_headers(&self) -> BTreeMap<String, String> {
        redact_headers(&self.headers, self.auth_header.as_deref())
    }
}

impl std::fmt::Debug for BoundRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.redacted_headers())
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to serialize request body: {0}")]
    Body(#[from] serde_json::Error),
}

/// Turn bound arguments into a request for `def`.
///
/// Static headers go in first; `content-type` and the auth header are set last and replace
/// any same-named static header.
pub fn build_request(
    def: &ActionDefinition,
    bound: &BoundArguments,
    auth: Option<&AuthHeader>,
) -> Result<BoundRequest, BuildError> {
    let mut url = substitute_path(&def.base_url, &bound.path);
    let query = encode_query(&bound.query);
    if !query.is_empty() {
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&query);
    }

    let body = encode_body(bound)?;

    let mut headers = def.headers.clone();
    set_header(&mut headers, CONTENT_TYPE, JSON_CONTENT_TYPE);
    if let Some(auth) = auth {
        set_header(&mut headers, &auth.name, auth.value.expose());
    }

    Ok(BoundRequest {
        method: def.http_method(),
        url,
        headers,
        body,
        auth_header: auth.map(|a| a.name.clone()),
    })
}

/// Replace every `{name}` with the value's string form. No URL escaping is applied.
pub fn substitute_path(template: &str, path: &[(String, JsonValue)]) -> String {
    let mut url = template.to_string();
    for (name, value) in path {
        url = url.replace(&format!("{{{name}}}"), &format_scalar(value));
    }
    url
}

/// `application/x-www-form-urlencoded` query string; arrays repeat the key per element.
pub fn encode_query(query: &[(String, JsonValue)]) -> String {
    let mut ser = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in query {
        match value {
            JsonValue::Array(items) => {
                for item in items {
                    ser.append_pair(name, &format_scalar(item));
                }
            }
            other => {
                ser.append_pair(name, &format_scalar(other));
            }
        }
    }
    ser.finish()
}

fn encode_body(bound: &BoundArguments) -> Result<Option<Vec<u8>>, BuildError> {
    if let Some(items) = &bound.root_body {
        if !bound.body.is_empty() {
            let dropped: Vec<&String> = bound.body.keys().collect();
            debug!(?dropped, "root body replaces the remaining body parameters");
        }
        return Ok(Some(serde_json::to_vec(items)?));
    }
    if bound.body.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_vec(&bound.body)?))
}

fn set_header(headers: &mut BTreeMap<String, String>, name: &str, value: &str) {
    headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value.to_string());
}

/// Generic string form used for path segments and query values.
pub fn format_scalar(v: &JsonValue) -> String {
    match v {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => format_number(n),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// Integral doubles print without the trailing `.0`.
fn format_number(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
        }
    }
    n.to_string()
}
