use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse and validate a manifest.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the actions a manifest declares.
    Actions {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run one action and print the rendered response.
    Exec {
        path: PathBuf,
        action: String,
        #[command(flatten)]
        args: ArgumentArgs,
        #[command(flatten)]
        auth: AuthArgs,
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
