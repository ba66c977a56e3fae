mod rules;
mod validator;

use crate::error::ValidationError;
use crate::types::SkillManifest;
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for SkillManifest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_manifest(self)
    }
}

pub fn validate_manifest(manifest: &SkillManifest) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_manifest(manifest);
    v.finish()
}
