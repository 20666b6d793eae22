use std::collections::HashSet;

use copylint_core::{ContentTree, Language};
use copylint_rules::ExpressionControl;
use serde::Serialize;

/// Content improvement hint; never affects validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Suggestion {
    /// Key paths present in the other language but absent in `language`.
    MissingTranslation {
        language: Language,
        keys: Vec<String>,
        description: String,
    },
    /// A configured term pair occurs a different number of times per language.
    ///
    /// Frequency only: equal counts do not prove the terms are used for the
    /// same thing at each occurrence.
    TerminologyInconsistency {
        term: TermPair,
        counts: TermCounts,
        description: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermPair {
    pub de: String,
    pub en: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermCounts {
    pub de: usize,
    pub en: usize,
}

/// Translation gaps at every key depth, then terminology frequency mismatches.
pub fn suggest_improvements(
    de: &ContentTree,
    en: &ContentTree,
    expressions: &ExpressionControl,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    let de_keys = de.key_paths();
    let en_keys = en.key_paths();

    let missing_in_en = missing_keys(&de_keys, &en_keys);
    if !missing_in_en.is_empty() {
        suggestions.push(missing_translation(Language::English, missing_in_en));
    }
    let missing_in_de = missing_keys(&en_keys, &de_keys);
    if !missing_in_de.is_empty() {
        suggestions.push(missing_translation(Language::German, missing_in_de));
    }

    suggestions.extend(terminology_suggestions(de, en, expressions));
    suggestions
}

fn missing_translation(language: Language, keys: Vec<String>) -> Suggestion {
    Suggestion::MissingTranslation {
        language,
        keys,
        description: format!("These keys are missing in {language} content"),
    }
}

/// Keys of `source` absent from `target`, in `source` order.
fn missing_keys(source: &[String], target: &[String]) -> Vec<String> {
    let target: HashSet<&str> = target.iter().map(String::as_str).collect();
    source
        .iter()
        .filter(|key| !target.contains(key.as_str()))
        .cloned()
        .collect()
}

fn terminology_suggestions(
    de: &ContentTree,
    en: &ContentTree,
    expressions: &ExpressionControl,
) -> Vec<Suggestion> {
    let Some(terms) = expressions.terminology_terms() else {
        tracing::debug!(
            event = "terminology_category_missing",
            category = %expressions.terminology_category
        );
        return Vec::new();
    };

    let text = format!("{}\n{}", de.flat_text(), en.flat_text());

    terms
        .pairs()
        .filter_map(|(de_term, en_term)| {
            let counts = TermCounts {
                de: count_occurrences(&text, de_term),
                en: count_occurrences(&text, en_term),
            };
            (counts.de != counts.en).then(|| Suggestion::TerminologyInconsistency {
                term: TermPair {
                    de: de_term.to_string(),
                    en: en_term.to_string(),
                },
                counts,
                description: format!("Inconsistent usage of business term: {de_term}/{en_term}"),
            })
        })
        .collect()
}

/// Non-overlapping literal occurrences; an empty term never matches.
fn count_occurrences(text: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    text.matches(term).count()
}
