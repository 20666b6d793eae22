use copylint_core::{Language, OrderedMap};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Category used for terminology suggestions when none is configured.
pub const DEFAULT_TERMINOLOGY_CATEGORY: &str = "business_terms";

/// Rules document (`config.json`) driving content validation.
///
/// Keys follow the site's camelCase convention. Top-level sections used by
/// other tooling are not checked, but are kept verbatim in `extra` so an
/// exported report carries the whole document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentConfig {
    pub content_validation: ContentValidationRules,
    pub content_control: ContentControl,
    pub expression_control: ExpressionControl,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Required sections and per-section required fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentValidationRules {
    /// Top-level sections every language must define.
    pub required_sections: Vec<String>,
    /// Fields required inside a section, checked only when the section exists.
    #[serde(default)]
    pub required_fields: OrderedMap<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentControl {
    pub shared_expressions: SharedExpressions,
}

/// Values that must be byte-identical in both languages (brand names, people).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SharedExpressions {
    pub enabled: bool,
    /// Dotted key paths, e.g. `meta.author`.
    #[serde(default)]
    pub expressions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionControl {
    /// Category name to parallel per-language term lists.
    pub explicit_expressions: OrderedMap<TermLists>,
    /// How explicit expression lists are compared.
    #[serde(default)]
    pub explicit_check: ExplicitCheck,
    /// Category whose term pairs feed terminology suggestions.
    #[serde(default = "default_terminology_category")]
    pub terminology_category: String,
}

/// Parallel term lists; index `i` in `de` pairs with index `i` in `en`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TermLists {
    #[serde(default)]
    pub de: Vec<String>,
    #[serde(default)]
    pub en: Vec<String>,
}

impl TermLists {
    pub fn terms(&self, language: Language) -> &[String] {
        match language {
            Language::German => &self.de,
            Language::English => &self.en,
        }
    }

    /// Same-index term pairs. Trailing terms without a partner are dropped.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.de
            .iter()
            .zip(self.en.iter())
            .map(|(de, en)| (de.as_str(), en.as_str()))
    }
}

/// Comparison mode for explicit expression lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExplicitCheck {
    /// Warn on every same-index pair whose terms differ.
    #[default]
    Literal,
    /// Warn only when the two lists have different lengths.
    Arity,
    Off,
}

fn default_terminology_category() -> String {
    DEFAULT_TERMINOLOGY_CATEGORY.to_string()
}

impl Default for ExpressionControl {
    fn default() -> Self {
        Self {
            explicit_expressions: OrderedMap::new(),
            explicit_check: ExplicitCheck::default(),
            terminology_category: default_terminology_category(),
        }
    }
}

impl ExpressionControl {
    /// Term lists of the terminology category, if configured.
    pub fn terminology_terms(&self) -> Option<&TermLists> {
        self.explicit_expressions.get(&self.terminology_category)
    }
}
