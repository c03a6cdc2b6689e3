use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use querybound_core::{check, ProblemConfig, Report, VerdictCode, DEFAULT_MAX_QUERIES};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, ReportFormat};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            // clap's own status (2) would read as a presentation error.
            let _ = e.print();
            eprintln!("{} invalid checker invocation", VerdictCode::Fail);
            return exit_code(VerdictCode::Fail);
        }
    };

    init_tracing(cli.verbose);

    let problem = match load_problem(&cli) {
        Ok(problem) => problem,
        Err(e) => {
            let limit = cli.max_queries.unwrap_or(DEFAULT_MAX_QUERIES);
            let report = Report::grader_fault("unknown", limit, format!("{:#}", e));
            return finish(&cli, &report);
        }
    };

    let report = match judge(&cli, &problem) {
        Ok(report) => report,
        Err(e) => Report::grader_fault(&problem.name, problem.max_queries, format!("{:#}", e)),
    };

    finish(&cli, &report)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_problem(cli: &Cli) -> Result<ProblemConfig> {
    let problem = match &cli.config {
        Some(path) => ProblemConfig::from_file(path)
            .with_context(|| format!("loading problem {}", path.display()))?,
        None => ProblemConfig::default(),
    };

    let problem = match cli.max_queries {
        Some(limit) => problem.with_max_queries(limit),
        None => problem,
    };

    tracing::debug!(problem = %problem.name, limit = problem.max_queries, "problem loaded");
    Ok(problem)
}

fn judge(cli: &Cli, problem: &ProblemConfig) -> Result<Report> {
    let input = open(&cli.input)?;
    let output = open(&cli.output)?;
    let answer = open(&cli.answer)?;

    Ok(check(problem, input, output, answer)?)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Write the report file, then print the one verdict line and pick the exit status.
///
/// A report that cannot be written replaces the verdict with FAIL.
fn finish(cli: &Cli, report: &Report) -> ExitCode {
    let written = match &cli.report {
        Some(path) => write_report(path, report, cli.report_format),
        None => Ok(()),
    };

    match written {
        Ok(()) => {
            eprintln!("{}", report.summary_line());
            exit_code(report.code)
        }
        Err(e) => {
            eprintln!("{} failed to write report: {:#}", VerdictCode::Fail, e);
            exit_code(VerdictCode::Fail)
        }
    }
}

fn write_report(path: &Path, report: &Report, format: ReportFormat) -> Result<()> {
    let contents = match format {
        ReportFormat::Text => format!("{}\n", report.summary_line()),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            json
        }
    };

    fs::write(path, contents).with_context(|| format!("writing report {}", path.display()))
}

fn exit_code(code: VerdictCode) -> ExitCode {
    // Exit codes are 0, 1 and 3; the conversion cannot truncate.
    ExitCode::from(code.exit_code() as u8)
}
