use std::collections::BTreeMap;

use crate::types::ActionDefinition;

/// Top-level structure of a skill manifest file.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SkillManifest {
    #[serde(default)]
    pub name: String,

    #[serde(
        default,
        rename(serialize = "description", deserialize = "desc"),
        alias = "description"
    )]
    pub description: String,

    #[serde(default)]
    pub actions: BTreeMap<String, ActionDefinition>,
}

impl SkillManifest {
    /// The map key is the canonical action name; fill it into definitions that omit `name`.
    pub fn normalize(&mut self) {
        for (key, action) in self.actions.iter_mut() {
            if action.name.trim().is_empty() {
                action.name = key.clone();
            }
        }
    }
}
