use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{AuthScheme, ParamLocation, ParameterSpec};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("valid"));

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResponseTemplate {
    #[serde(default)]
    pub success: String,
    #[serde(default)]
    pub failure: String,
}

impl ResponseTemplate {
    pub fn new(success: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            success: success.into(),
            failure: failure.into(),
        }
    }
}

/// One declarative outbound HTTP call.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActionDefinition {
    #[serde(default)]
    pub name: String,

    #[serde(
        default,
        rename(serialize = "description", deserialize = "desc"),
        alias = "description"
    )]
    pub description: String,

    pub method: String,

    #[serde(rename = "base_url", alias = "baseUrl")]
    pub base_url: String,

    #[serde(default)]
    pub params: Vec<ParameterSpec>,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default, rename = "response_template", alias = "responseTemplate")]
    pub response_template: ResponseTemplate,

    /// Overrides the engine-wide auth scheme for this action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthScheme>,
}

impl ActionDefinition {
    pub fn new(name: impl Into<String>, method: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            method: method.into(),
            base_url: base_url.into(),
            params: Vec::new(),
            headers: BTreeMap::new(),
            response_template: ResponseTemplate::default(),
            auth: None,
        }
    }

    pub fn with_param(mut self, param: ParameterSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_templates(mut self, templates: ResponseTemplate) -> Self {
        self.response_template = templates;
        self
    }

    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Upper-cased HTTP method.
    pub fn http_method(&self) -> String {
        self.method.trim().to_ascii_uppercase()
    }

    /// `{name}` tokens in the base URL, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        PLACEHOLDER_RE
            .captures_iter(&self.base_url)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }

    pub fn params_in(&self, location: ParamLocation) -> impl Iterator<Item = &ParameterSpec> {
        self.params
            .iter()
            .filter(move |p| p.location == Some(location))
    }

    pub fn root_body_param(&self) -> Option<&ParameterSpec> {
        self.params.iter().find(|p| p.is_root_body())
    }
}
