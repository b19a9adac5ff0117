//! Audit run handler: load, analyze, aggregate, render, exit code.

use std::fs;
use std::process::ExitCode;

use tracing::{debug, info};

use crate::aggregator::AuditResult;
use crate::analyzer;
use crate::cli::{Cli, OutputFormat};
use crate::reporter::{
    json::JsonReporter, markdown::MarkdownReporter, terminal::TerminalReporter, Reporter,
};
use crate::snapshot::Snapshot;

/// Run one audit end to end. Exit codes: 0 on success, 2 on snapshot or
/// output errors; with --strict, 1 when critical/high findings exist.
pub fn run_audit(cli: &Cli) -> ExitCode {
    info!(snapshot = %cli.snapshot.display(), "Starting audit");

    let snapshot = match Snapshot::from_path(&cli.snapshot) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let analysis = analyzer::analyze(&snapshot);
    let result = AuditResult::new(&snapshot, analysis);

    let output = format_result(cli, &result);

    if let Some(ref output_path) = cli.output {
        match fs::write(output_path, &output) {
            Ok(()) => println!("Report written to {}", output_path.display()),
            Err(e) => {
                eprintln!("Failed to write report to {}: {}", output_path.display(), e);
                return ExitCode::from(2);
            }
        }
    } else {
        println!("{}", output);
    }

    debug!(
        critical = result.summary.critical,
        high = result.summary.high,
        findings = result.summary.total_findings,
        "Audit completed"
    );

    if cli.strict && (result.summary.critical > 0 || result.summary.high > 0) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn format_result(cli: &Cli, result: &AuditResult) -> String {
    match cli.format {
        OutputFormat::Terminal => TerminalReporter::new(cli.verbose).report(result),
        OutputFormat::Json => JsonReporter::new().report(result),
        OutputFormat::Markdown => MarkdownReporter::new().report(result),
    }
}
