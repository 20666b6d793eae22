use copylint_core::ValidationIssue;
use thiserror::Error;

/// Errors raised while loading the rules configuration.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema error: {0}")]
    Schema(String),
    #[error("invalid configuration: {}", render_issues(.0))]
    InvalidConfig(Vec<ValidationIssue>),
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.path, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for rules operations.
pub type Result<T> = std::result::Result<T, RulesError>;
