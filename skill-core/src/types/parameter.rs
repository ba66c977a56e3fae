use std::str::FromStr;

use crate::types::AnyValue;

/// Where a bound parameter value is placed in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Body,
}

impl ParamLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Body => "body",
        }
    }
}

impl std::fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parameter location '{0}' (expected path, query or body)")]
pub struct UnknownLocation(pub String);

impl FromStr for ParamLocation {
    type Err = UnknownLocation;

    // Manifests in the wild use "Query", "BODY" and friends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("path") {
            Ok(ParamLocation::Path)
        } else if t.eq_ignore_ascii_case("query") {
            Ok(ParamLocation::Query)
        } else if t.eq_ignore_ascii_case("body") {
            Ok(ParamLocation::Body)
        } else {
            Err(UnknownLocation(s.to_string()))
        }
    }
}

impl<'de> serde::Deserialize<'de> for ParamLocation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }

    /// Top-level shape check only; nested `properties`/`items` are never consulted.
    ///
    /// `integer` accepts any number without a fractional part because transports commonly carry
    /// every number as a double.
    pub fn accepts(&self, value: &AnyValue) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Integer => match value {
                AnyValue::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
                }
                _ => false,
            },
            ParamType::Number => value.is_number(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::Array => value.is_array(),
            ParamType::Object => value.is_object(),
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, ParamType::Array | ParamType::Object)
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parameter type '{0}' (expected string, integer, number, boolean, array or object)")]
pub struct UnknownType(pub String);

impl FromStr for ParamType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [ParamType; 6] = [
            ParamType::String,
            ParamType::Integer,
            ParamType::Number,
            ParamType::Boolean,
            ParamType::Array,
            ParamType::Object,
        ];
        let t = s.trim();
        ALL.into_iter()
            .find(|ty| t.eq_ignore_ascii_case(ty.as_str()))
            .ok_or_else(|| UnknownType(s.to_string()))
    }
}

impl<'de> serde::Deserialize<'de> for ParamType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A declared action parameter.
///
/// The `properties` and `items` children form a schema tree that is exposed to callers as-is.
/// Nested entries usually omit `in`, which is why `location` is optional; the validator requires
/// it on top-level parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterSpec {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub param_type: ParamType,

    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ParamLocation>,

    #[serde(
        default,
        rename(serialize = "description", deserialize = "desc"),
        alias = "description"
    )]
    pub description: String,

    #[serde(default)]
    pub required: bool,

    /// The value of this parameter becomes the whole request body.
    #[serde(default, rename = "root_body", alias = "rootBody", skip_serializing_if = "is_false")]
    pub root_body: bool,

    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<AnyValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<ParameterSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ParameterSpec>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, param_type: ParamType, location: ParamLocation) -> Self {
        Self {
            name: name.into(),
            param_type,
            location: Some(location),
            description: String::new(),
            required: false,
            root_body: false,
            enum_values: Vec::new(),
            properties: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn root_body(mut self) -> Self {
        self.root_body = true;
        self
    }

    pub fn with_enum(mut self, values: Vec<AnyValue>) -> Self {
        self.enum_values = values;
        self
    }

    pub fn is_root_body(&self) -> bool {
        self.root_body && self.location == Some(ParamLocation::Body)
    }

    /// Whether `value` is one of the declared enum members. An empty enum allows anything.
    ///
    /// Members are compared by value first and then by string form, so `"1"` matches `1`.
    pub fn allows(&self, value: &AnyValue) -> bool {
        if self.enum_values.is_empty() {
            return true;
        }
        self.enum_values.iter().any(|allowed| {
            allowed == value || scalar_text(allowed).is_some_and(|a| Some(a) == scalar_text(value))
        })
    }
}

fn scalar_text(v: &AnyValue) -> Option<String> {
    match v {
        AnyValue::String(s) => Some(s.clone()),
        AnyValue::Number(n) => Some(n.to_string()),
        AnyValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
