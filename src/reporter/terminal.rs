use colored::Colorize;

use crate::aggregator::AuditResult;
use crate::analyzer::{Finding, Severity};
use crate::reporter::Reporter;

pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn severity_label(&self, severity: Severity) -> colored::ColoredString {
        let label = format!("[{}]", severity);
        match severity {
            Severity::Critical => label.red().bold(),
            Severity::High => label.yellow().bold(),
            Severity::Medium => label.cyan(),
            Severity::Low => label.white(),
            Severity::Info => label.dimmed(),
        }
    }

    fn format_finding(&self, finding: &Finding) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {} {} ({}) in {}\n",
            self.severity_label(finding.severity),
            finding.category.to_string().bold(),
            finding.group_id,
            finding.group_name,
            finding.region
        ));
        if let Some(ref rule) = finding.rule {
            output.push_str(&format!("    Rule: {}\n", rule));
            if let Some(ref note) = rule.note {
                output.push_str(&format!("    Rule note: {}\n", note));
            }
        }
        output.push_str(&format!("    {}\n", finding.description));
        if self.verbose {
            output.push_str(&format!(
                "    VPC: {}  Attached resources: {}\n",
                finding.vpc_id, finding.attached_resources
            ));
        }
        output.push_str(&format!(
            "    Recommendation: {}\n",
            finding.recommendation.dimmed()
        ));
        output
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, result: &AuditResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n",
            "AWS Security Group Audit".bold().underline()
        ));
        output.push_str(&format!(
            "Account: {} ({})  Scanned: {}\n",
            result.account_id, result.account_alias, result.scanned_at
        ));
        output.push_str(&format!(
            "Regions: {}  Security groups: {}\n\n",
            result.summary.total_regions, result.summary.total_groups
        ));

        if result.findings.is_empty() {
            output.push_str(&format!(
                "{} No findings. All analyzed security groups look clean.\n",
                "OK".green().bold()
            ));
        } else {
            // Highest severity first; stable sort keeps the canonical
            // (region, group, rule) order within each severity band.
            let mut findings: Vec<&Finding> = result.findings.iter().collect();
            findings.sort_by(|a, b| b.severity.cmp(&a.severity));

            for finding in findings {
                output.push_str(&self.format_finding(finding));
                output.push('\n');
            }
        }

        if !result.warnings.is_empty() {
            output.push_str(&format!(
                "{} {} rule(s) skipped:\n",
                "WARN".yellow().bold(),
                result.warnings.len()
            ));
            for warning in &result.warnings {
                output.push_str(&format!("    {}\n", warning));
            }
            output.push('\n');
        }

        let s = &result.summary;
        output.push_str(&format!(
            "Summary: {} critical, {} high, {} medium, {} low, {} info ({} findings)\n",
            s.critical.to_string().red().bold(),
            s.high.to_string().yellow().bold(),
            s.medium,
            s.low,
            s.info,
            s.total_findings
        ));
        output.push_str(&format!(
            "Unused security groups: {} of {}\n",
            s.unused_groups, s.total_groups
        ));

        output
    }
}
