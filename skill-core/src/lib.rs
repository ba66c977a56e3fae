#![forbid(unsafe_code)]

//! Skill manifest model, parser, and validator.
//!
//! Execution of actions lives in `skill-exec`; this crate only knows how a manifest looks.

pub mod error;
pub mod parser;
pub mod types;
pub mod validate;

pub use crate::error::{ManifestError, ParseError, ValidationError, Violation};
pub use crate::parser::{load_manifest_str, parse_manifest_str, ManifestFormat, ParsedManifest};
pub use crate::types::{
    ActionDefinition, AuthScheme, ParamLocation, ParamType, ParameterSpec, ResponseTemplate,
    SkillManifest, DEFAULT_API_KEY_HEADER,
};
pub use crate::validate::{validate_manifest, Validate};
