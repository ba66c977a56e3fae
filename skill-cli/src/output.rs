use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines; structured results are pretty-printed JSON.
    Text,
    /// One compact JSON document per result.
    Json,
}

pub fn print_result<T: Serialize>(format: OutputFormat, quiet: bool, result: &T) {
    if quiet {
        return;
    }
    let encoded = match format {
        OutputFormat::Text => serde_json::to_string_pretty(result),
        OutputFormat::Json => serde_json::to_string(result),
    };
    if let Ok(json) = encoded {
        println!("{json}");
    }
}

/// Rendered action text goes to stdout untouched.
pub fn print_text(quiet: bool, text: &str) {
    if !quiet {
        println!("{text}");
    }
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    error: &'a str,
}

/// Errors always go to stderr so stdout stays parseable.
pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    if format == OutputFormat::Json {
        if let Ok(json) = serde_json::to_string(&ErrorReport { error: message }) {
            eprintln!("{json}");
            return;
        }
    }
    eprintln!("error: {message}");
}
