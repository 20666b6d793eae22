//! Cross-language content validation.
//!
//! [`ContentValidator`] runs a fixed pipeline of checks over the German and
//! English content trees and returns a fresh [`ValidationResult`] per call.

pub mod checks;
pub mod report;
pub mod result;
pub mod suggest;
pub mod validator;

pub use checks::{
    check_completeness, check_expression_consistency, check_specific_expressions,
    check_structure,
};
pub use report::{ExportedReport, ReportSummary, ValidationReport, recommendation, render_report};
pub use result::ValidationResult;
pub use suggest::{Suggestion, TermCounts, TermPair, suggest_improvements};
pub use validator::ContentValidator;
