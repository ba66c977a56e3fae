use std::collections::BTreeSet;

use crate::types::{ActionDefinition, AuthScheme, ParamLocation};
use crate::validate::rules::parameters;
use crate::validate::validator::{Validator, HTTP_METHODS};

pub(crate) fn validate_action(v: &mut Validator, def: &ActionDefinition, path: &str) {
    if !HTTP_METHODS.contains(&def.http_method().as_str()) {
        v.push(
            format!("{path}.method"),
            format!("unsupported HTTP method '{}'", def.method),
        );
    }

    if def.base_url.trim().is_empty() {
        v.push(format!("{path}.base_url"), "must not be empty");
    }

    for name in def.headers.keys() {
        if name.trim().is_empty() {
            v.push(format!("{path}.headers"), "header names must not be empty");
        }
    }

    if let Some(AuthScheme::ApiKey { header }) = &def.auth {
        if header.trim().is_empty() {
            v.push(format!("{path}.auth.header"), "must not be empty");
        }
    }

    parameters::validate_parameter_list(v, &format!("{path}.params"), &def.params);

    let placeholders: BTreeSet<&str> = def.placeholders().into_iter().collect();
    let path_params: BTreeSet<&str> = def
        .params_in(ParamLocation::Path)
        .map(|p| p.name.as_str())
        .collect();
    for name in path_params.difference(&placeholders) {
        v.push(
            format!("{path}.params"),
            format!("path parameter '{name}' has no {{{name}}} placeholder in base_url"),
        );
    }
    for name in placeholders.difference(&path_params) {
        v.push(
            format!("{path}.base_url"),
            format!("placeholder {{{name}}} has no matching path parameter"),
        );
    }
}
