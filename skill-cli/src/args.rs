use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AuthSchemeArg {
    ApiKey,
    Bearer,
    None,
}

#[derive(Debug, Args, Clone)]
pub struct AuthArgs {
    /// Credential attached to every call.
    #[arg(long, env = "SKILL_KEY", hide_env_values = true)]
    pub skill_key: Option<String>,
    /// Default scheme for actions that do not declare `auth`.
    #[arg(long, value_enum, default_value_t = AuthSchemeArg::ApiKey)]
    pub auth_scheme: AuthSchemeArg,
    /// Header name for the api-key scheme.
    #[arg(long)]
    pub auth_header: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ArgumentArgs {
    #[arg(long = "path", value_name = "KEY=VALUE")]
    pub path_args: Vec<String>,
    #[arg(long = "query", value_name = "KEY=VALUE")]
    pub query_args: Vec<String>,
    #[arg(long = "body", value_name = "KEY=VALUE")]
    pub body_args: Vec<String>,
    /// JSON or YAML file shaped `{path: {}, query: {}, body: {}}`.
    #[arg(long = "args", value_name = "FILE")]
    pub args_file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Give up waiting after this many milliseconds.
    #[arg(long)]
    pub deadline_ms: Option<u64>,
    /// Per-request transport timeout.
    #[arg(long, default_value_t = 15000)]
    pub timeout_ms: u64,
    #[arg(long)]
    pub strict_templates: bool,
}
