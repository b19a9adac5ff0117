pub mod aggregator;
pub mod analyzer;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod reporter;
pub mod snapshot;

#[cfg(test)]
pub mod test_utils;

pub use aggregator::{AuditResult, AuditSummary};
pub use analyzer::{analyze, AnalysisResult, Category, Finding, RuleParseWarning, Severity};
pub use cli::{Cli, OutputFormat};
pub use error::{Result, SgAuditError};
pub use reporter::{
    json::JsonReporter, markdown::MarkdownReporter, terminal::TerminalReporter, Reporter,
};
pub use snapshot::Snapshot;
