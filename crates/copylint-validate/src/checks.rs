use std::sync::OnceLock;

use copylint_core::{ContentTree, ContentValue, Language, ValidationIssue};
use copylint_rules::{
    ContentControl, ContentValidationRules, ExplicitCheck, ExpressionControl, TermLists,
};
use regex::Regex;

use crate::result::ValidationResult;

/// Placeholder patterns scanned in rendered copy, in reporting order.
const PLACEHOLDER_PATTERNS: [(&str, &str); 5] = [
    ("brackets", r"\[.*?\]"),
    ("braces", r"\{.*?\}"),
    ("todo", r"(?i)TODO:"),
    ("fixme", r"(?i)FIXME:"),
    ("placeholder", r"(?i)placeholder"),
];

/// Trimmed strings shorter than this are flagged as suspiciously short.
const MIN_CONTENT_CHARS: usize = 3;

/// Path used for findings that concern a whole document.
const ROOT_PATH: &str = "/";

fn placeholder_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        PLACEHOLDER_PATTERNS
            .iter()
            .filter_map(|(label, source)| {
                Regex::new(source)
                    .inspect_err(|err| {
                        tracing::error!(
                            event = "placeholder_pattern_invalid",
                            label = *label,
                            error = %err
                        );
                    })
                    .ok()
                    .map(|re| (*label, re))
            })
            .collect()
    })
}

/// Required sections and fields for one language.
pub fn check_structure(
    content: &ContentTree,
    language: Language,
    rules: &ContentValidationRules,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    for section in &rules.required_sections {
        if !has_value(content.get(section)) {
            result.push_error(ValidationIssue::error(
                "missing_section",
                section.as_str(),
                format!("Missing required section: {section} in {language}"),
            ));
        }
    }

    for (section, fields) in rules.required_fields.iter() {
        let Some(section_value) = content.get(section).filter(|value| !value.is_null()) else {
            continue;
        };
        let section_tree = section_value.as_tree();
        for field in fields {
            let present = section_tree.is_some_and(|tree| has_value(tree.get(field)));
            if !present {
                result.push_error(ValidationIssue::error(
                    "missing_field",
                    format!("{section}.{field}"),
                    format!("Missing required field: {section}.{field} in {language}"),
                ));
            }
        }
    }

    result
}

/// Top-level sections present in one language but not the other.
///
/// German-only sections are reported first, then English-only ones.
pub fn check_completeness(de: &ContentTree, en: &ContentTree) -> ValidationResult {
    let mut result = ValidationResult::default();

    for (content, other, language) in [
        (de, en, Language::German),
        (en, de, Language::English),
    ] {
        let missing_in = language.other();
        for key in content.keys().filter(|key| !other.contains_key(key)) {
            result.push_error(ValidationIssue::error(
                "section_missing_in_language",
                key,
                format!("Section '{key}' missing in {missing_in} content"),
            ));
        }
    }

    result
}

/// Shared expressions must match verbatim; explicit term lists are compared
/// according to the configured [`ExplicitCheck`] mode.
pub fn check_expression_consistency(
    de: &ContentTree,
    en: &ContentTree,
    control: &ContentControl,
    expressions: &ExpressionControl,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    let shared = &control.shared_expressions;
    if shared.enabled {
        for path in &shared.expressions {
            let de_value = de.resolve_or_null(path);
            let en_value = en.resolve_or_null(path);
            if de_value != en_value {
                result.push_warning(ValidationIssue::warning(
                    "shared_expression_mismatch",
                    path.as_str(),
                    format!(
                        "Shared expression '{path}' differs between languages: \"{}\" vs \"{}\"",
                        de_value.render(),
                        en_value.render()
                    ),
                ));
            }
        }
    }

    for (category, terms) in expressions.explicit_expressions.iter() {
        match expressions.explicit_check {
            ExplicitCheck::Literal => check_explicit_literal(category, terms, &mut result),
            ExplicitCheck::Arity => check_explicit_arity(category, terms, &mut result),
            ExplicitCheck::Off => {}
        }
    }

    result
}

fn check_explicit_literal(category: &str, terms: &TermLists, result: &mut ValidationResult) {
    for (index, de_term) in terms.de.iter().enumerate() {
        let en_term = terms.en.get(index);
        if en_term != Some(de_term) {
            result.push_warning(ValidationIssue::warning(
                "explicit_expression_mismatch",
                format!("{category}[{index}]"),
                format!(
                    "Explicit expression mismatch in {category}: \"{de_term}\" vs \"{}\"",
                    en_term.map(String::as_str).unwrap_or("undefined")
                ),
            ));
        }
    }
}

fn check_explicit_arity(category: &str, terms: &TermLists, result: &mut ValidationResult) {
    if terms.de.len() != terms.en.len() {
        result.push_warning(ValidationIssue::warning(
            "explicit_expression_count_mismatch",
            category,
            format!(
                "Explicit expression count mismatch in {category}: {} vs {}",
                terms.de.len(),
                terms.en.len()
            ),
        ));
    }
}

/// Placeholder leakage and empty or near-empty copy in one language.
pub fn check_specific_expressions(content: &ContentTree, language: Language) -> ValidationResult {
    let mut result = ValidationResult::default();

    let text = content.flat_text();
    for (label, pattern) in placeholder_patterns() {
        let matches: Vec<&str> = pattern.find_iter(&text).map(|m| m.as_str()).collect();
        if !matches.is_empty() {
            result.push_warning(ValidationIssue::warning(
                format!("placeholder_{label}"),
                ROOT_PATH,
                format!(
                    "Found placeholder patterns in {language}: {}",
                    matches.join(", ")
                ),
            ));
        }
    }

    for (section, value) in content.iter() {
        check_empty_content(value, section.to_string(), language, &mut result);
    }

    result
}

fn check_empty_content(
    value: &ContentValue,
    path: String,
    language: Language,
    result: &mut ValidationResult,
) {
    match value {
        ContentValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                result.push_error(ValidationIssue::error(
                    "empty_content",
                    path.as_str(),
                    format!("Empty content found in {language}: {path}"),
                ));
            } else if trimmed.chars().count() < MIN_CONTENT_CHARS {
                result.push_warning(ValidationIssue::warning(
                    "short_content",
                    path.as_str(),
                    format!("Very short content found in {language}: {path} (\"{text}\")"),
                ));
            }
        }
        ContentValue::List(items) => {
            if items.is_empty() {
                result.push_warning(ValidationIssue::warning(
                    "empty_list",
                    path.as_str(),
                    format!("Empty array found in {language}: {path}"),
                ));
            }
            for (index, item) in items.iter().enumerate() {
                check_empty_content(item, format!("{path}[{index}]"), language, result);
            }
        }
        ContentValue::Tree(tree) => {
            for (key, child) in tree.iter() {
                check_empty_content(child, format!("{path}.{key}"), language, result);
            }
        }
        ContentValue::Null | ContentValue::Bool(_) | ContentValue::Number(_) => {}
    }
}

fn has_value(value: Option<&ContentValue>) -> bool {
    value.is_some_and(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use copylint_rules::{OrderedMap, SharedExpressions};
    use serde_json::{Value, json};

    use super::*;

    fn tree(value: Value) -> ContentTree {
        ContentTree::try_from(value).expect("object root")
    }

    fn rules(sections: &[&str], fields: Vec<(&str, Vec<&str>)>) -> ContentValidationRules {
        ContentValidationRules {
            required_sections: sections.iter().map(|s| s.to_string()).collect(),
            required_fields: fields
                .into_iter()
                .map(|(section, names)| {
                    (
                        section.to_string(),
                        names.iter().map(|n| n.to_string()).collect::<Vec<_>>(),
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn every_placeholder_pattern_compiles() {
        let labels: Vec<&str> = placeholder_patterns().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["brackets", "braces", "todo", "fixme", "placeholder"]);
    }

    fn shared(paths: &[&str]) -> ContentControl {
        ContentControl {
            shared_expressions: SharedExpressions {
                enabled: true,
                expressions: paths.iter().map(|p| p.to_string()).collect(),
            },
        }
    }

    fn explicit(check: ExplicitCheck, de: &[&str], en: &[&str]) -> ExpressionControl {
        let mut explicit_expressions = OrderedMap::new();
        explicit_expressions.insert(
            "business_terms",
            TermLists {
                de: de.iter().map(|t| t.to_string()).collect(),
                en: en.iter().map(|t| t.to_string()).collect(),
            },
        );
        ExpressionControl {
            explicit_expressions,
            explicit_check: check,
            ..ExpressionControl::default()
        }
    }

    #[test]
    fn structure_passes_when_sections_and_fields_exist() {
        let content = tree(json!({"meta": {"title": "Titel", "description": "Text"}, "hero": {}}));
        let result = check_structure(
            &content,
            Language::German,
            &rules(&["meta", "hero"], vec![("meta", vec!["title", "description"])]),
        );
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn structure_reports_missing_section_and_field() {
        let content = tree(json!({"meta": {"title": "T"}, "contact": "Kontakt"}));
        let result = check_structure(
            &content,
            Language::German,
            &rules(
                &["meta", "hero"],
                vec![
                    ("meta", vec!["title", "description"]),
                    ("hero", vec!["title"]),
                    ("contact", vec!["email"]),
                ],
            ),
        );
        assert_eq!(
            result.error_messages(),
            vec![
                "Missing required section: hero in German",
                "Missing required field: meta.description in German",
                "Missing required field: contact.email in German",
            ]
        );
    }

    #[test]
    fn null_section_counts_as_missing() {
        let content = tree(json!({"hero": null}));
        let result = check_structure(
            &content,
            Language::English,
            &rules(&["hero"], vec![("hero", vec!["title"])]),
        );
        assert_eq!(result.error_messages(), vec!["Missing required section: hero in English"]);
    }

    #[test]
    fn completeness_names_the_missing_side() {
        let de = tree(json!({"meta": {}, "impressum": {}}));
        let en = tree(json!({"meta": {}, "hero": {}}));
        let result = check_completeness(&de, &en);
        assert_eq!(
            result.error_messages(),
            vec![
                "Section 'impressum' missing in English content",
                "Section 'hero' missing in German content",
            ]
        );

        let swapped = check_completeness(&en, &de);
        assert_eq!(swapped.errors.len(), result.errors.len());
        assert_eq!(
            swapped.error_messages(),
            vec![
                "Section 'hero' missing in English content",
                "Section 'impressum' missing in German content",
            ]
        );
    }

    #[test]
    fn shared_expressions_warn_once_per_differing_path() {
        let de = tree(json!({"meta": {"author": "Anna Berger", "brand": "Nordlicht"}}));
        let en = tree(json!({"meta": {"author": "Anna Berger", "brand": "Northern Light"}}));
        let result = check_expression_consistency(
            &de,
            &en,
            &shared(&["meta.author", "meta.brand", "meta.missing", "footer.brand"]),
            &explicit(ExplicitCheck::Off, &[], &[]),
        );
        assert_eq!(
            result.warning_messages(),
            vec!["Shared expression 'meta.brand' differs between languages: \"Nordlicht\" vs \"Northern Light\""]
        );
    }

    #[test]
    fn shared_expression_missing_on_one_side_renders_null() {
        let de = tree(json!({"meta": {"author": "Anna"}}));
        let en = tree(json!({"meta": {}}));
        let result = check_expression_consistency(
            &de,
            &en,
            &shared(&["meta.author"]),
            &explicit(ExplicitCheck::Off, &[], &[]),
        );
        assert_eq!(
            result.warning_messages(),
            vec!["Shared expression 'meta.author' differs between languages: \"Anna\" vs \"null\""]
        );
    }

    #[test]
    fn disabled_shared_expressions_are_skipped() {
        let de = tree(json!({"meta": {"author": "A"}}));
        let en = tree(json!({"meta": {"author": "B"}}));
        let mut control = shared(&["meta.author"]);
        control.shared_expressions.enabled = false;
        let result =
            check_expression_consistency(&de, &en, &control, &explicit(ExplicitCheck::Off, &[], &[]));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn literal_mode_flags_every_translated_pair() {
        let empty = ContentTree::new();
        let result = check_expression_consistency(
            &empty,
            &empty,
            &ContentControl::default(),
            &explicit(ExplicitCheck::Literal, &["Beratung", "KI", "Strategie"], &["Advisory", "KI"]),
        );
        assert_eq!(
            result.warning_messages(),
            vec![
                "Explicit expression mismatch in business_terms: \"Beratung\" vs \"Advisory\"",
                "Explicit expression mismatch in business_terms: \"Strategie\" vs \"undefined\"",
            ]
        );
    }

    #[test]
    fn arity_mode_only_compares_lengths() {
        let empty = ContentTree::new();
        let control = ContentControl::default();
        let equal = check_expression_consistency(
            &empty,
            &empty,
            &control,
            &explicit(ExplicitCheck::Arity, &["Beratung"], &["Advisory"]),
        );
        assert!(equal.warnings.is_empty());

        let uneven = check_expression_consistency(
            &empty,
            &empty,
            &control,
            &explicit(ExplicitCheck::Arity, &["Beratung", "Strategie"], &["Advisory"]),
        );
        assert_eq!(
            uneven.warning_messages(),
            vec!["Explicit expression count mismatch in business_terms: 2 vs 1"]
        );
    }

    #[test]
    fn todo_marker_yields_a_single_warning() {
        let content = tree(json!({"hero": {"title": "TODO: fix this"}}));
        let result = check_specific_expressions(&content, Language::German);
        assert_eq!(
            result.warning_messages(),
            vec!["Found placeholder patterns in German: TODO:"]
        );
        assert!(result.is_valid());
    }

    #[test]
    fn placeholder_patterns_join_all_matches() {
        let content = tree(json!({
            "hero": {"title": "Hallo [Name]", "cta": "Mehr {link} und [Ort]"},
            "about": {"text": "Placeholder copy, fixme: later"}
        }));
        let result = check_specific_expressions(&content, Language::English);
        assert_eq!(
            result.warning_messages(),
            vec![
                "Found placeholder patterns in English: [Name], [Ort]",
                "Found placeholder patterns in English: {link}",
                "Found placeholder patterns in English: fixme:",
                "Found placeholder patterns in English: Placeholder",
            ]
        );
    }

    #[test]
    fn empty_and_short_content_by_length() {
        let content = tree(json!({
            "a": "",
            "b": "   ",
            "c": "ab",
            "d": "abc",
            "e": {"list": [], "items": ["ok!", " x "]}
        }));
        let result = check_specific_expressions(&content, Language::German);
        assert_eq!(
            result.error_messages(),
            vec![
                "Empty content found in German: a",
                "Empty content found in German: b",
            ]
        );
        assert_eq!(
            result.warning_messages(),
            vec![
                "Very short content found in German: c (\"ab\")",
                "Empty array found in German: e.list",
                "Very short content found in German: e.items[1] (\" x \")",
            ]
        );
    }

    #[test]
    fn numbers_and_flags_are_not_content() {
        let content = tree(json!({"stats": {"years": 12, "remote": true, "note": null}}));
        let result = check_specific_expressions(&content, Language::German);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }
}
