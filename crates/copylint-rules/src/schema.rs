use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::model::ContentConfig;

/// Emit the JSON Schema for `config.json`.
pub fn config_json_schema() -> RootSchema {
    schema_for!(ContentConfig)
}
