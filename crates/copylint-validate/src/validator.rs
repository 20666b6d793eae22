use chrono::{DateTime, Utc};
use copylint_core::{ContentTree, Language};
use copylint_rules::ContentConfig;

use crate::checks::{
    check_completeness, check_expression_consistency, check_specific_expressions,
    check_structure,
};
use crate::report::ExportedReport;
use crate::result::ValidationResult;
use crate::suggest::{Suggestion, suggest_improvements};

/// Validates a German/English content pair against a loaded rules config.
///
/// The validator holds no per-run state: every call returns a fresh result,
/// so one instance can be shared freely between callers.
#[derive(Debug, Clone)]
pub struct ContentValidator {
    config: ContentConfig,
}

impl ContentValidator {
    pub fn new(config: ContentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Run every check in pipeline order and aggregate the findings.
    ///
    /// Order: structure (de, en), completeness, expression consistency,
    /// specific expressions (de, en).
    pub fn validate_all(&self, de: &ContentTree, en: &ContentTree) -> ValidationResult {
        let config = &self.config;
        let mut result = ValidationResult::default();

        for (content, language) in [(de, Language::German), (en, Language::English)] {
            result.merge(check_structure(content, language, &config.content_validation));
        }
        result.merge(check_completeness(de, en));
        result.merge(check_expression_consistency(
            de,
            en,
            &config.content_control,
            &config.expression_control,
        ));
        for (content, language) in [(de, Language::German), (en, Language::English)] {
            result.merge(check_specific_expressions(content, language));
        }

        tracing::info!(
            event = "validation_finished",
            valid = result.is_valid(),
            errors = result.errors.len(),
            warnings = result.warnings.len()
        );

        result
    }

    /// Translation gaps and terminology frequency hints; independent of
    /// [`ContentValidator::validate_all`].
    pub fn suggest_improvements(&self, de: &ContentTree, en: &ContentTree) -> Vec<Suggestion> {
        let suggestions = suggest_improvements(de, en, &self.config.expression_control);
        tracing::debug!(event = "suggestions_collected", count = suggestions.len());
        suggestions
    }

    /// Wrap a result with the current time, the rules, and a recommendation.
    pub fn export(&self, result: &ValidationResult) -> ExportedReport {
        self.export_at(result, Utc::now())
    }

    pub fn export_at(&self, result: &ValidationResult, at: DateTime<Utc>) -> ExportedReport {
        ExportedReport::new(result, &self.config, at)
    }
}
