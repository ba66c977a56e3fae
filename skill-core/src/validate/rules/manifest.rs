use crate::types::SkillManifest;
use crate::validate::rules::action;
use crate::validate::validator::{Validator, ACTION_NAME_RE};

pub(crate) fn validate_manifest(v: &mut Validator, manifest: &SkillManifest) {
    if manifest.actions.is_empty() {
        v.push("$.actions", "must have at least one entry");
    }

    for (key, def) in &manifest.actions {
        let path = format!("$.actions.{key}");
        if !ACTION_NAME_RE.is_match(key) {
            v.push(&path, "action key must match regex [A-Za-z0-9_\\-\\.]+");
        }
        if def.name != *key {
            v.push(format!("{path}.name"), "must match the action key");
        }
        action::validate_action(v, def, &path);
    }
}
