use std::collections::HashSet;

use crate::types::{ParamLocation, ParamType, ParameterSpec};
use crate::validate::validator::Validator;

pub(crate) fn validate_parameter_list(v: &mut Validator, path: &str, params: &[ParameterSpec]) {
    let mut seen = HashSet::<(String, Option<ParamLocation>)>::new();
    let mut root_bodies = 0usize;

    for (idx, p) in params.iter().enumerate() {
        let ipath = format!("{path}[{idx}]");
        if p.name.trim().is_empty() {
            v.push(format!("{ipath}.name"), "must not be empty");
        }
        if p.location.is_none() {
            v.push(format!("{ipath}.in"), "must be one of path, query, body");
        }
        if !seen.insert((p.name.clone(), p.location)) {
            v.push(&ipath, "duplicate parameter (unique by name + in)");
        }
        if p.location == Some(ParamLocation::Path) && !p.param_type.is_scalar() {
            v.push(format!("{ipath}.type"), "path parameters must be scalar");
        }
        if p.root_body {
            root_bodies += 1;
            if p.location != Some(ParamLocation::Body) {
                v.push(format!("{ipath}.root_body"), "only allowed on body parameters");
            }
            if p.param_type != ParamType::Array {
                v.push(format!("{ipath}.type"), "root_body parameters must be arrays");
            }
        }
        validate_schema_node(v, &ipath, p);
    }

    if root_bodies > 1 {
        v.push(path, "at most one parameter may be marked root_body");
    }
}

// Nested schema entries are descriptive only; check that the tree is well formed.
fn validate_schema_node(v: &mut Validator, path: &str, p: &ParameterSpec) {
    if !p.enum_values.is_empty() && !p.param_type.is_scalar() {
        v.push(format!("{path}.enum"), "enum is only allowed on scalar types");
    }
    if !p.properties.is_empty() && p.param_type != ParamType::Object {
        v.push(format!("{path}.properties"), "only allowed on object parameters");
    }
    if !p.items.is_empty() && p.param_type != ParamType::Array {
        v.push(format!("{path}.items"), "only allowed on array parameters");
    }
    for (idx, child) in p.properties.iter().enumerate() {
        let cpath = format!("{path}.properties[{idx}]");
        if child.name.trim().is_empty() {
            v.push(format!("{cpath}.name"), "must not be empty");
        }
        if child.root_body {
            v.push(format!("{cpath}.root_body"), "not allowed on nested parameters");
        }
        validate_schema_node(v, &cpath, child);
    }
    for (idx, child) in p.items.iter().enumerate() {
        let cpath = format!("{path}.items[{idx}]");
        if child.root_body {
            v.push(format!("{cpath}.root_body"), "not allowed on nested parameters");
        }
        validate_schema_node(v, &cpath, child);
    }
}
