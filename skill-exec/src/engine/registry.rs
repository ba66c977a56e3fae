use std::collections::BTreeMap;

use serde::Serialize;
use skill_core::{ActionDefinition, ParameterSpec, SkillManifest};

/// Read-only projection of one registered action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionSummary {
    pub name: String,
    pub description: String,
    pub method: String,
    pub base_url: String,
    pub params: Vec<ParameterSpec>,
    pub headers: BTreeMap<String, String>,
}

/// Action name → definition. Built once and only ever read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, ActionDefinition>,
}

impl ActionRegistry {
    pub fn from_manifest(manifest: SkillManifest) -> Self {
        Self {
            actions: manifest.actions,
        }
    }

    /// Later definitions with the same name replace earlier ones.
    pub fn from_actions(actions: impl IntoIterator<Item = ActionDefinition>) -> Self {
        Self {
            actions: actions.into_iter().map(|a| (a.name.clone(), a)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ActionDefinition> {
        self.actions.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ActionDefinition)> {
        self.actions.iter()
    }

    /// One summary per action, sorted by name.
    pub fn summaries(&self) -> Vec<ActionSummary> {
        self.actions
            .iter()
            .map(|(name, def)| ActionSummary {
                name: name.clone(),
                description: def.description.clone(),
                method: def.http_method(),
                base_url: def.base_url.clone(),
                params: def.params.clone(),
                headers: def.headers.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
