use std::{
    path::{Path, PathBuf},
    process,
};

mod terminal;

use anyhow::Context;
use clap::{ArgAction, Parser};
use reqtrace::{
    Config, DocumentSource, Extractor, FsSource, Issue,
    report::{self, TraceRow},
    validate,
};
use terminal::Colorize;
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(version, about = "Check requirement/design/test traceability in documentation")]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Root directories to scan for markdown documents
    #[arg(long, value_name = "DIR", num_args = 1..)]
    roots: Option<Vec<PathBuf>>,

    /// Directory generated reports are written to
    #[arg(long, value_name = "DIR")]
    outdir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress everything except the issue list
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

impl Cli {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(Path::new("reqtrace.toml"));
        let roots = self.roots.clone().unwrap_or(config.roots);
        let outdir = self.outdir.clone().unwrap_or(config.outdir);

        let documents = FsSource::new(roots).load();
        let outcome = Extractor::new().scan(documents);

        let mut issues = outcome.issues;
        issues.extend(validate(&outcome.items));

        // Reports are written even when checks fail; CI consumers want
        // both the failure signal and the artifact.
        let rows = report::trace_rows(&outcome.items);
        let csv_path = outdir.join("traceability.csv");
        let md_path = outdir.join("traceability.md");
        report::write_csv(&rows, &csv_path)
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
        report::write_markdown(&rows, &md_path)
            .with_context(|| format!("failed to write {}", md_path.display()))?;

        match self.output {
            OutputFormat::Table => self.output_table(&issues, &csv_path, &md_path),
            OutputFormat::Json => Self::output_json(&issues, &rows)?,
            OutputFormat::Summary => println!("issues={}", issues.len()),
        }

        if !issues.is_empty() {
            process::exit(1);
        }

        Ok(())
    }

    fn output_table(&self, issues: &[Issue], csv_path: &Path, md_path: &Path) {
        if issues.is_empty() {
            if !self.quiet {
                println!("{}", "✓ Traceability checks passed".success());
                println!(
                    "{}",
                    format!(
                        "Generated: {} and {}",
                        csv_path.display(),
                        md_path.display()
                    )
                    .dim()
                );
            }
            return;
        }

        if !self.quiet {
            println!(
                "{}\n",
                format!("✗ Traceability checks failed: {} issues", issues.len()).warning()
            );
        }
        for issue in issues {
            println!("- {issue}");
        }
        if !self.quiet {
            println!(
                "\n{}",
                "Generated reports are still available as artifacts.".dim()
            );
        }
    }

    fn output_json(issues: &[Issue], rows: &[TraceRow]) -> anyhow::Result<()> {
        use serde_json::json;

        let issue_lines: Vec<String> = issues.iter().map(ToString::to_string).collect();
        let output = json!({
            "status": if issues.is_empty() { "passed" } else { "failed" },
            "issues": issue_lines,
            "summary": {
                "requirements": rows.len(),
                "total_issues": issues.len(),
            }
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn load_config(path: &Path) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}
