//! find-unused-css - reports stylesheet selectors no source file references
//!
//! ```bash
//! find-unused-css --css src/pages/Rebecca.css --src src --ext ts,tsx,html
//! ```
//!
//! Prints `{ "unused": [...], "totalSelectors": n, "checkedFiles": n }` to
//! stdout. Exits with 1 only when the stylesheet cannot be read.

use clap::Parser;
use css_audit::{AuditOptions, DEFAULT_CSS, DEFAULT_SRC};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "find-unused-css")]
#[command(about = "Report CSS class and id selectors never referenced from source files")]
#[command(version)]
struct Cli {
    /// Stylesheet to audit
    #[arg(long, default_value = DEFAULT_CSS)]
    css: PathBuf,

    /// Directory searched recursively for references
    #[arg(long, default_value = DEFAULT_SRC)]
    src: PathBuf,

    /// File extensions to search, comma separated
    #[arg(long, value_delimiter = ',', default_value = "ts,tsx,js,jsx,html")]
    ext: Vec<String>,

    /// Log every match and skipped file
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let options = AuditOptions {
        css: cli.css,
        src: cli.src,
        extensions: cli
            .ext
            .into_iter()
            .map(|e| e.trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect(),
    };

    let report = match css_audit::run(&options) {
        Ok(report) => report,
        Err(e) => {
            log::error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "{} of {} selectors unused across {} files",
        report.unused.len(),
        report.total_selectors,
        report.checked_files
    );

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("could not serialize report: {}", e);
            ExitCode::FAILURE
        }
    }
}
