use serde_json::{Map, Value as JsonValue};
use skill_core::{ActionDefinition, ParamLocation, ParamType};
use tracing::debug;

pub type JsonMap = Map<String, JsonValue>;

/// Per-invocation arguments, one bag per parameter location.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArgumentBag {
    #[serde(default)]
    pub path: JsonMap,
    #[serde(default)]
    pub query: JsonMap,
    #[serde(default)]
    pub body: JsonMap,
}

impl ArgumentBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.path.insert(name.into(), value);
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.query.insert(name.into(), value);
        self
    }

    pub fn with_body(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.body.insert(name.into(), value);
        self
    }

    pub fn bag(&self, location: ParamLocation) -> &JsonMap {
        match location {
            ParamLocation::Path => &self.path,
            ParamLocation::Query => &self.query,
            ParamLocation::Body => &self.body,
        }
    }

    pub fn bag_mut(&mut self, location: ParamLocation) -> &mut JsonMap {
        match location {
            ParamLocation::Path => &mut self.path,
            ParamLocation::Query => &mut self.query,
            ParamLocation::Body => &mut self.body,
        }
    }
}

/// Arguments resolved against an action's declared parameters.
///
/// `path` and `query` keep declaration order; that order becomes the query string order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    pub path: Vec<(String, JsonValue)>,
    pub query: Vec<(String, JsonValue)>,
    pub body: JsonMap,
    /// Replaces the whole request body when present.
    pub root_body: Option<Vec<JsonValue>>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindingError {
    #[error("missing required {location} param '{name}'")]
    MissingRequiredParameter { location: ParamLocation, name: String },
    #[error("root body param '{name}' must be an array, got {found}")]
    InvalidRootBodyType { name: String, found: &'static str },
    #[error("{location} param '{name}' must be of type {expected}, got {found}")]
    TypeMismatch {
        location: ParamLocation,
        name: String,
        expected: ParamType,
        found: &'static str,
    },
    #[error("{location} param '{name}' value {value} is not one of the allowed values")]
    NotInEnum {
        location: ParamLocation,
        name: String,
        value: String,
    },
}

/// Resolve `args` against the parameters declared on `def`, in declaration order.
///
/// Fails on the first problem; nothing partially bound escapes. `null` counts as absent.
/// Only the top level is checked: `properties` and `items` describe the shape to callers and
/// are not validated here.
pub fn bind(def: &ActionDefinition, args: &ArgumentBag) -> Result<BoundArguments, BindingError> {
    let mut bound = BoundArguments::default();

    for spec in &def.params {
        let Some(location) = spec.location else {
            continue;
        };
        let value = args
            .bag(location)
            .get(&spec.name)
            .filter(|v| !v.is_null());

        let Some(value) = value else {
            if spec.required {
                return Err(BindingError::MissingRequiredParameter {
                    location,
                    name: spec.name.clone(),
                });
            }
            continue;
        };

        if spec.is_root_body() {
            let JsonValue::Array(items) = value else {
                return Err(BindingError::InvalidRootBodyType {
                    name: spec.name.clone(),
                    found: json_kind(value),
                });
            };
            bound.root_body = Some(items.clone());
            continue;
        }

        if !spec.param_type.accepts(value) {
            return Err(BindingError::TypeMismatch {
                location,
                name: spec.name.clone(),
                expected: spec.param_type,
                found: json_kind(value),
            });
        }
        if !spec.allows(value) {
            return Err(BindingError::NotInEnum {
                location,
                name: spec.name.clone(),
                value: value.to_string(),
            });
        }

        match location {
            ParamLocation::Path => bound.path.push((spec.name.clone(), value.clone())),
            ParamLocation::Query => bound.query.push((spec.name.clone(), value.clone())),
            ParamLocation::Body => {
                bound.body.insert(spec.name.clone(), value.clone());
            }
        }
    }

    log_undeclared(def, args);
    Ok(bound)
}

fn log_undeclared(def: &ActionDefinition, args: &ArgumentBag) {
    for location in [ParamLocation::Path, ParamLocation::Query, ParamLocation::Body] {
        for name in args.bag(location).keys() {
            if !def.params_in(location).any(|p| &p.name == name) {
                debug!(action = %def.name, %location, param = %name, "ignoring undeclared argument");
            }
        }
    }
}

pub(crate) fn json_kind(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
