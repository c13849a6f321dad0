//! CLI harness: grade one or more submissions and render per-rule results.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use semgrade::{GradeError, Report, RuleStatus, SourceErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "semgrade")]
#[command(version)]
#[command(about = "Grade a student HTML submission against a semantic-structure rule set")]
struct Cli {
    /// Path to the student's HTML file
    file: PathBuf,

    /// Rule set to apply (semantic-practice, hobby-page)
    #[arg(long, short = 'r')]
    ruleset: String,

    /// Emit the report as JSON instead of per-rule lines
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(report) if report.passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<Report> {
    let report = semgrade::grade(&cli.file, &cli.ruleset).map_err(|e| annotate(e, cli))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render(&report);
    }
    Ok(report)
}

fn render(report: &Report) {
    for entry in &report.entries {
        match &entry.status {
            RuleStatus::Pass => {
                println!("{} {}", "PASS".green().bold(), entry.description);
            }
            RuleStatus::Fail(reason) => {
                println!(
                    "{} {} {}",
                    "FAIL".red().bold(),
                    entry.description,
                    format!("({})", reason).dimmed()
                );
            }
        }
    }
    let failed = report.failures().len();
    let passed = report.entries.len() - failed;
    let summary = format!("{}: {} passed, {} failed", report.ruleset, passed, failed);
    if failed == 0 {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.red());
    }
}

fn annotate(err: GradeError, cli: &Cli) -> anyhow::Error {
    match &err {
        GradeError::Source(source) if source.kind == SourceErrorKind::NotFound => {
            anyhow::anyhow!(
                "{} not found — place the submission next to the harness and retry",
                cli.file.display()
            )
        }
        _ => anyhow::Error::new(err),
    }
}
