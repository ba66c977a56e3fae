use crate::error::{ManifestError, ParseError};
use crate::types::SkillManifest;
use crate::validate::validate_manifest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedManifest {
    pub manifest: SkillManifest,
    pub format: ManifestFormat,
}

pub fn parse_manifest_str(input: &str, format: ManifestFormat) -> Result<ParsedManifest, ParseError> {
    let mut parsed = match format {
        ManifestFormat::Json => ParsedManifest {
            manifest: serde_json::from_str::<SkillManifest>(input)?,
            format,
        },
        ManifestFormat::Yaml => ParsedManifest {
            manifest: serde_yaml::from_str::<SkillManifest>(input)?,
            format,
        },
        ManifestFormat::Auto => parse_manifest_auto(input)?,
    };
    parsed.manifest.normalize();
    Ok(parsed)
}

/// Parse (format auto-detected) and validate in one go.
pub fn load_manifest_str(input: &str) -> Result<SkillManifest, ManifestError> {
    let parsed = parse_manifest_str(input, ManifestFormat::Auto)?;
    validate_manifest(&parsed.manifest)?;
    Ok(parsed.manifest)
}

fn parse_manifest_auto(input: &str) -> Result<ParsedManifest, ParseError> {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return Err(ParseError::UnknownFormat);
    }

    // JSON always starts with `{` or `[` after trimming.
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<SkillManifest>(input) {
            Ok(manifest) => Ok(ParsedManifest {
                manifest,
                format: ManifestFormat::Json,
            }),
            // Flow-style YAML also starts with `{`.
            Err(e) => match serde_yaml::from_str::<SkillManifest>(input) {
                Ok(manifest) => Ok(ParsedManifest {
                    manifest,
                    format: ManifestFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<SkillManifest>(input) {
        Ok(manifest) => Ok(ParsedManifest {
            manifest,
            format: ManifestFormat::Yaml,
        }),
        Err(e) => {
            if let Ok(manifest) = serde_json::from_str::<SkillManifest>(input) {
                return Ok(ParsedManifest {
                    manifest,
                    format: ManifestFormat::Json,
                });
            }
            Err(ParseError::Yaml(e))
        }
    }
}
