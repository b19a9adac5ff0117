use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Markdown,
}

#[derive(Parser, Debug)]
#[command(
    name = "sg-audit",
    version,
    about = "Security auditor for AWS Security Group inventory snapshots",
    long_about = "sg-audit evaluates a previously captured security-group inventory snapshot \
for risky network exposure and unused resources. It never talks to the AWS API."
)]
pub struct Cli {
    /// Path to the snapshot JSON file produced by the collection script
    pub snapshot: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Strict mode: exit non-zero when critical or high findings exist
    #[arg(short, long)]
    pub strict: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
