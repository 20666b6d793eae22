use chrono::{DateTime, SecondsFormat, Utc};
use copylint_core::ValidationIssue;
use copylint_rules::ContentConfig;
use serde::Serialize;

use crate::result::ValidationResult;
use crate::suggest::Suggestion;

const RECOMMEND_FIX: &str = "Fix critical errors before deploying";
const RECOMMEND_DEPLOY: &str = "Content is ready for deployment";

/// Summary view of one validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_issues: usize,
    pub critical_issues: usize,
    pub minor_issues: usize,
}

/// Report wrapped with the rules it was produced under, for archiving.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedReport {
    pub timestamp: String,
    pub report: ValidationReport,
    pub config: ContentConfig,
    pub recommendations: String,
}

impl ValidationResult {
    /// Counts and issue lists of this result; nothing is re-run.
    pub fn report(&self) -> ValidationReport {
        let error_count = self.errors.len();
        let warning_count = self.warnings.len();
        ValidationReport {
            is_valid: self.is_valid(),
            error_count,
            warning_count,
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
            summary: ReportSummary {
                total_issues: error_count + warning_count,
                critical_issues: error_count,
                minor_issues: warning_count,
            },
        }
    }
}

impl ExportedReport {
    pub fn new(result: &ValidationResult, config: &ContentConfig, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            report: result.report(),
            config: config.clone(),
            recommendations: recommendation(result).to_string(),
        }
    }
}

/// One-line deployment recommendation for a result.
pub fn recommendation(result: &ValidationResult) -> &'static str {
    if result.is_valid() {
        RECOMMEND_DEPLOY
    } else {
        RECOMMEND_FIX
    }
}

/// Render a deterministic markdown report from an export and its suggestions.
pub fn render_report(export: &ExportedReport, suggestions: &[Suggestion]) -> String {
    let report = &export.report;
    let mut lines = Vec::new();

    lines.push("# Content Validation Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- timestamp: {}", export.timestamp));
    lines.push(format!("- valid: {}", report.is_valid));
    lines.push(format!("- errors: {}", report.error_count));
    lines.push(format!("- warnings: {}", report.warning_count));
    lines.push(String::new());

    push_issues(&mut lines, "Errors", &report.errors);
    push_issues(&mut lines, "Warnings", &report.warnings);

    if !suggestions.is_empty() {
        lines.push("## Suggestions".to_string());
        for suggestion in suggestions {
            match suggestion {
                Suggestion::MissingTranslation {
                    description, keys, ..
                } => {
                    lines.push(format!("- {description}: {}", keys.join(", ")));
                }
                Suggestion::TerminologyInconsistency {
                    description,
                    counts,
                    ..
                } => {
                    lines.push(format!(
                        "- {description} (de={}, en={})",
                        counts.de, counts.en
                    ));
                }
            }
        }
        lines.push(String::new());
    }

    lines.push("## Recommendations".to_string());
    lines.push(format!("- {}", export.recommendations));
    lines.join("\n")
}

fn push_issues(lines: &mut Vec<String>, title: &str, issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }
    lines.push(format!("## {title}"));
    for issue in issues {
        lines.push(format!("- `{}` {}: {}", issue.code, issue.path, issue.message));
    }
    lines.push(String::new());
}
