mod action;
mod auth;
mod manifest;
mod parameter;

pub use action::{ActionDefinition, ResponseTemplate};
pub use auth::{AuthScheme, DEFAULT_API_KEY_HEADER};
pub use manifest::SkillManifest;
pub use parameter::{ParamLocation, ParamType, ParameterSpec, UnknownLocation, UnknownType};

pub type AnyValue = serde_json::Value;
