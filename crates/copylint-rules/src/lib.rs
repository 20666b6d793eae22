//! Rules configuration for copylint: model, JSON Schema, and loading.

pub mod errors;
pub mod load;
pub mod model;
pub mod schema;

pub use copylint_core::OrderedMap;
pub use errors::{Result, RulesError};
pub use load::{load_config, parse_config, validate_config_json};
pub use model::{
    ContentConfig, ContentControl, ContentValidationRules, DEFAULT_TERMINOLOGY_CATEGORY,
    ExplicitCheck, ExpressionControl, SharedExpressions, TermLists,
};
pub use schema::config_json_schema;
