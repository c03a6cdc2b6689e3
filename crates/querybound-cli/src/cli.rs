use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "querybound",
    version,
    about = "Checker for bounded-query interactive problems",
    after_help = "Exit status: 0 = OK, 1 = WRONG_ANSWER, 3 = FAIL"
)]
pub struct Cli {
    #[arg(help = "Problem input produced by the grading system")]
    pub input: PathBuf,

    #[arg(help = "Captured trace of the contestant's run")]
    pub output: PathBuf,

    #[arg(help = "Captured trace of the reference solution's run")]
    pub answer: PathBuf,

    #[arg(help = "Write the verdict report to this file")]
    pub report: Option<PathBuf>,

    #[arg(long, help = "Problem description (YAML, or JSON with a .json extension)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override the query budget from the problem description")]
    pub max_queries: Option<u64>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub report_format: ReportFormat,

    #[arg(short, long, help = "Log every decision step to stderr")]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}
