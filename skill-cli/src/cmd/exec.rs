use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use skill_exec::{ActionEngine, ActionRegistry, CancellationSignal, Rendered};
use tracing::info;

use crate::exit_codes;
use crate::output::{print_error, print_result, print_text, OutputFormat};
use crate::{ArgumentArgs, AuthArgs, OutputArgs, RunArgs};

use super::config::{build_engine_config, load_arguments, load_manifest};

#[derive(Serialize)]
struct ExecResult {
    action: String,
    status: &'static str,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn exec_cmd(
    path: &Path,
    action: &str,
    args: ArgumentArgs,
    auth: AuthArgs,
    run: RunArgs,
    output: OutputArgs,
) -> i32 {
    let manifest = match load_manifest(path, &output) {
        Ok(m) => m,
        Err(code) => return code,
    };
    let bag = match load_arguments(&args, &output) {
        Ok(b) => b,
        Err(code) => return code,
    };

    let config = build_engine_config(&auth, &run);
    let engine = match ActionEngine::with_reqwest(ActionRegistry::from_manifest(manifest), config) {
        Ok(e) => e,
        Err(e) => {
            print_error(output.format, output.quiet, &format!("{e}"));
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let mut signal = CancellationSignal::new();
    if let Some(ms) = run.deadline_ms {
        signal = signal.with_timeout(Duration::from_millis(ms));
    }
    let on_interrupt = signal.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, cancelling");
            on_interrupt.cancel("interrupted");
        }
    });

    let outcome = engine.dispatch(action, bag, &signal).await;
    interrupt.abort();

    match outcome {
        Ok(rendered) => report_rendered(action, rendered, &output),
        Err(err) => {
            print_error(output.format, output.quiet, &format!("{err}"));
            exit_codes::for_dispatch_error(&err)
        }
    }
}

fn report_rendered(action: &str, rendered: Rendered, output: &OutputArgs) -> i32 {
    let (status, code, http_status, error) = match &rendered {
        Rendered::Success(_) => ("ok", exit_codes::SUCCESS, None, None),
        Rendered::Unrendered { error, .. } => {
            ("unrendered", exit_codes::SUCCESS, None, Some(error.to_string()))
        }
        Rendered::Failure { cause, .. } => (
            "failed",
            exit_codes::ACTION_FAILED,
            cause.status(),
            Some(cause.to_string()),
        ),
    };

    if output.format == OutputFormat::Text {
        print_text(output.quiet, rendered.text());
    } else {
        let result = ExecResult {
            action: action.to_string(),
            status,
            text: rendered.text().to_string(),
            http_status,
            error,
        };
        print_result(output.format, output.quiet, &result);
    }
    code
}
