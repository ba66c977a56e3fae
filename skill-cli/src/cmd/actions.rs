use std::path::Path;

use serde::Serialize;
use skill_exec::{ActionRegistry, ActionSummary};

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

use super::config::load_manifest;

#[derive(Serialize)]
struct ActionsResult {
    skill: String,
    actions: Vec<ActionSummary>,
}

pub async fn actions_cmd(path: &Path, output: OutputArgs) -> i32 {
    let manifest = match load_manifest(path, &output) {
        Ok(m) => m,
        Err(code) => return code,
    };
    let skill = manifest.name.clone();
    let actions = ActionRegistry::from_manifest(manifest).summaries();

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Actions in {}:", path.display());
        for a in &actions {
            println!("  - {} ({} {})", a.name, a.method, a.base_url);
            if !a.description.is_empty() {
                println!("    {}", a.description);
            }
            for p in &a.params {
                let location = p.location.map(|l| l.as_str()).unwrap_or("?");
                let required = if p.required { ", required" } else { "" };
                println!("      {} [{location}, {}{required}]", p.name, p.param_type.as_str());
            }
        }
    } else {
        print_result(output.format, output.quiet, &ActionsResult { skill, actions });
    }

    exit_codes::SUCCESS
}
