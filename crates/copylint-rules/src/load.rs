use std::fs;
use std::path::Path;

use copylint_core::ValidationIssue;
use jsonschema::JSONSchema;
use serde_json::Value;

use crate::errors::{Result, RulesError};
use crate::model::ContentConfig;
use crate::schema::config_json_schema;

/// Check a raw rules document against the generated JSON Schema.
///
/// Returns one error issue per schema violation; an empty list means the
/// document has the expected shape.
pub fn validate_config_json(config_json: &Value) -> Result<Vec<ValidationIssue>> {
    let schema = serde_json::to_value(config_json_schema())?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| RulesError::Schema(err.to_string()))?;

    let mut issues = Vec::new();
    if let Err(errors) = compiled.validate(config_json) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            issues.push(ValidationIssue::error(
                "config_schema_violation",
                path,
                error.to_string(),
            ));
        }
    }

    Ok(issues)
}

/// Shape-check and deserialize a parsed rules document.
pub fn parse_config(config_json: &Value) -> Result<ContentConfig> {
    let issues = validate_config_json(config_json)?;
    if !issues.is_empty() {
        tracing::error!(
            event = "config_rejected",
            issues = issues.len(),
            "content configuration does not match the expected shape"
        );
        return Err(RulesError::InvalidConfig(issues));
    }

    let config: ContentConfig = serde_json::from_value(config_json.clone())?;
    tracing::debug!(
        event = "config_parsed",
        required_sections = config.content_validation.required_sections.len(),
        shared_expressions = config.content_control.shared_expressions.expressions.len(),
        explicit_categories = config.expression_control.explicit_expressions.len()
    );
    Ok(config)
}

/// Read, shape-check, and deserialize `config.json` from disk.
pub fn load_config(path: &Path) -> Result<ContentConfig> {
    let contents = fs::read_to_string(path).inspect_err(|err| {
        tracing::error!(
            event = "config_load_failed",
            path = %path.display(),
            error = %err,
            "failed to load content configuration"
        );
    })?;
    let config_json: Value = serde_json::from_str(&contents).inspect_err(|err| {
        tracing::error!(
            event = "config_load_failed",
            path = %path.display(),
            error = %err,
            "failed to parse content configuration"
        );
    })?;
    parse_config(&config_json)
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
