use std::path::Path;
use std::time::Duration;

use serde_json::Value as JsonValue;
use skill_core::{
    load_manifest_str, AuthScheme, ManifestError, ParamLocation, SkillManifest,
    DEFAULT_API_KEY_HEADER,
};
use skill_exec::{ArgumentBag, Credential, EngineConfig};

use crate::exit_codes;
use crate::output::print_error;
use crate::{ArgumentArgs, AuthArgs, AuthSchemeArg, OutputArgs, RunArgs};

pub fn read_file(path: &Path, output: &OutputArgs) -> Result<String, i32> {
    std::fs::read_to_string(path).map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to read {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })
}

/// Read, parse, and validate a manifest; on failure returns the exit code to use.
pub fn load_manifest(path: &Path, output: &OutputArgs) -> Result<SkillManifest, i32> {
    let content = read_file(path, output)?;
    match load_manifest_str(&content) {
        Ok(m) => Ok(m),
        Err(ManifestError::Validation(err)) => {
            let details: Vec<String> = err.violations.iter().map(|v| v.to_string()).collect();
            print_error(
                output.format,
                output.quiet,
                &format!("invalid manifest: {}", details.join("; ")),
            );
            Err(exit_codes::VALIDATION_FAILED)
        }
        Err(e) => {
            print_error(output.format, output.quiet, &format!("{e}"));
            Err(exit_codes::VALIDATION_FAILED)
        }
    }
}

/// Arguments from `--args FILE` first, then `--path/--query/--body` on top.
pub fn load_arguments(args: &ArgumentArgs, output: &OutputArgs) -> Result<ArgumentBag, i32> {
    let mut bag = match &args.args_file {
        Some(path) => {
            let content = read_file(path, output)?;
            parse_argument_file(&content).ok_or_else(|| {
                print_error(
                    output.format,
                    output.quiet,
                    "arguments file is neither valid JSON nor YAML",
                );
                exit_codes::VALIDATION_FAILED
            })?
        }
        None => ArgumentBag::new(),
    };

    let sets = [
        (ParamLocation::Path, &args.path_args),
        (ParamLocation::Query, &args.query_args),
        (ParamLocation::Body, &args.body_args),
    ];
    for (location, pairs) in sets {
        for s in pairs {
            let Some((k, v)) = parse_kv(s) else {
                print_error(
                    output.format,
                    output.quiet,
                    &format!("expected KEY=VALUE, got '{s}'"),
                );
                return Err(exit_codes::VALIDATION_FAILED);
            };
            bag.bag_mut(location).insert(k, v);
        }
    }
    Ok(bag)
}

fn parse_argument_file(content: &str) -> Option<ArgumentBag> {
    if let Ok(v) = serde_json::from_str(content) {
        return Some(v);
    }
    serde_yaml::from_str(content).ok()
}

/// `KEY=VALUE`; the value is taken as JSON when it parses, otherwise as a plain string.
pub fn parse_kv(s: &str) -> Option<(String, JsonValue)> {
    let (k, v) = s.split_once('=')?;
    let k = k.trim();
    if k.is_empty() {
        return None;
    }
    let value = serde_json::from_str(v).unwrap_or_else(|_| JsonValue::String(v.to_string()));
    Some((k.to_string(), value))
}

pub fn build_engine_config(auth: &AuthArgs, run: &RunArgs) -> EngineConfig {
    let scheme = match auth.auth_scheme {
        AuthSchemeArg::ApiKey => AuthScheme::api_key(
            auth.auth_header
                .clone()
                .unwrap_or_else(|| DEFAULT_API_KEY_HEADER.to_string()),
        ),
        AuthSchemeArg::Bearer => AuthScheme::Bearer,
        AuthSchemeArg::None => AuthScheme::None,
    };

    let mut config = EngineConfig::default()
        .with_auth(scheme)
        .with_strict_templates(run.strict_templates);
    config.timeout = Duration::from_millis(run.timeout_ms);
    if let Some(key) = auth.skill_key.as_deref().filter(|k| !k.trim().is_empty()) {
        config = config.with_credential(Credential::new(key));
    }
    config
}
