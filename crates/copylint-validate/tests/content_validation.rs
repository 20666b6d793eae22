use chrono::{TimeZone, Utc};
use copylint_core::{ContentTree, load_content};
use copylint_rules::{ContentConfig, ExplicitCheck, load_config, parse_config};
use copylint_validate::{ContentValidator, Suggestion, TermCounts, render_report};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn site_fixtures() -> (ContentConfig, ContentTree, ContentTree) {
    let config = load_config(&fixture("config.json")).expect("load config fixture");
    let de = load_content(&fixture("de.json")).expect("load de fixture");
    let en = load_content(&fixture("en.json")).expect("load en fixture");
    (config, de, en)
}

fn tree(value: Value) -> ContentTree {
    ContentTree::try_from(value).expect("object root")
}

fn minimal_config(required_sections: Value) -> ContentConfig {
    parse_config(&json!({
        "contentValidation": {
            "requiredSections": required_sections,
            "requiredFields": {}
        },
        "contentControl": {
            "sharedExpressions": {"enabled": false, "expressions": []}
        },
        "expressionControl": {
            "explicitExpressions": {}
        }
    }))
    .expect("minimal config parses")
}

#[test]
fn parallel_site_content_is_valid() {
    let (config, de, en) = site_fixtures();
    let validator = ContentValidator::new(config);

    let result = validator.validate_all(&de, &en);
    assert!(result.is_valid(), "errors: {:?}", result.error_messages());
    assert!(result.warnings.is_empty(), "warnings: {:?}", result.warning_messages());
}

#[test]
fn literal_mode_warns_on_each_translated_term() {
    let (mut config, de, en) = site_fixtures();
    config.expression_control.explicit_check = ExplicitCheck::Literal;
    let validator = ContentValidator::new(config);

    let result = validator.validate_all(&de, &en);
    assert!(result.is_valid());
    assert_eq!(
        result.warning_messages(),
        vec![
            "Explicit expression mismatch in business_terms: \"Beratung\" vs \"Advisory\"",
            "Explicit expression mismatch in business_terms: \"Strategie\" vs \"Strategy\"",
            "Explicit expression mismatch in navigation: \"Leistungen\" vs \"Services\"",
            "Explicit expression mismatch in navigation: \"Kontakt\" vs \"Contact\"",
        ]
    );
}

#[test]
fn missing_hero_is_reported_by_structure_and_completeness() {
    let validator = ContentValidator::new(minimal_config(json!(["meta", "hero"])));
    let de = tree(json!({"meta": {"title": "Titel"}}));
    let en = tree(json!({"meta": {"title": "Titel"}, "hero": {}}));

    let result = validator.validate_all(&de, &en);
    assert!(!result.is_valid());
    assert_eq!(
        result.error_messages(),
        vec![
            "Missing required section: hero in German",
            "Section 'hero' missing in German content",
        ]
    );
}

#[test]
fn findings_follow_pipeline_order() {
    let (config, _, _) = site_fixtures();
    let validator = ContentValidator::new(config);
    let de = tree(json!({
        "meta": {"title": "Titel", "description": "Beschreibung", "author": "Lena Hoffmann"},
        "navigation": {"services": "Leistungen"},
        "hero": {"title": {"brand": "Hoffmann Partner"}, "subtitle": "", "cta": "Los"},
        "services": {"items": []},
        "contact": {"email": "kontakt@hoffmann-partner.de", "form": {"name": "Name"}}
    }));
    let en = tree(json!({
        "meta": {"title": "Title", "description": "Description", "author": "L. Hoffmann"},
        "hero": {"title": {"brand": "Hoffmann Partner"}, "subtitle": "TODO: write", "cta": "Go"},
        "services": {"items": ["Advisory"]},
        "contact": {"email": "kontakt@hoffmann-partner.de", "form": {"name": "Name"}}
    }));

    let result = validator.validate_all(&de, &en);
    assert_eq!(
        result.error_messages(),
        vec![
            "Missing required section: navigation in English",
            "Section 'navigation' missing in English content",
            "Empty content found in German: hero.subtitle",
        ]
    );
    assert_eq!(
        result.warning_messages(),
        vec![
            "Shared expression 'meta.author' differs between languages: \"Lena Hoffmann\" vs \"L. Hoffmann\"",
            "Empty array found in German: services.items",
            "Found placeholder patterns in English: TODO:",
            "Very short content found in English: hero.cta (\"Go\")",
        ]
    );
}

#[test]
fn validate_all_is_idempotent() {
    let (config, de, en) = site_fixtures();
    let validator = ContentValidator::new(config);
    let broken_en = tree(json!({"meta": {"title": "x"}}));

    let first = validator.validate_all(&de, &broken_en);
    let second = validator.validate_all(&de, &broken_en);
    assert_eq!(first, second);

    // a later run replaces, never accumulates
    let clean = validator.validate_all(&de, &en);
    assert!(clean.is_valid());
    assert!(clean.errors.len() < first.errors.len());
}

#[test]
fn swapping_languages_preserves_completeness_count() {
    let validator = ContentValidator::new(minimal_config(json!([])));
    let a = tree(json!({"meta": {"title": "Titel"}, "impressum": {"text": "Angaben"}}));
    let b = tree(json!({"meta": {"title": "Title"}, "hero": {"text": "Hello"}, "faq": {"text": "Questions"}}));

    let forward = validator.validate_all(&a, &b);
    let backward = validator.validate_all(&b, &a);
    assert_eq!(forward.errors.len(), 3);
    assert_eq!(forward.errors.len(), backward.errors.len());
    assert_eq!(
        forward.error_messages()[0],
        "Section 'impressum' missing in English content"
    );
    assert_eq!(
        backward.error_messages()[2],
        "Section 'impressum' missing in German content"
    );
}

#[test]
fn suggestions_flag_term_frequency_gap() {
    let (config, de, en) = site_fixtures();
    let validator = ContentValidator::new(config);

    let suggestions = validator.suggest_improvements(&de, &en);
    assert_eq!(suggestions.len(), 1);
    match &suggestions[0] {
        Suggestion::TerminologyInconsistency { term, counts, .. } => {
            assert_eq!(term.de, "Beratung");
            assert_eq!(term.en, "Advisory");
            assert_eq!(*counts, TermCounts { de: 3, en: 2 });
        }
        other => panic!("unexpected suggestion: {other:?}"),
    }
}

#[test]
fn report_and_export_reflect_the_result() {
    let validator = ContentValidator::new(minimal_config(json!(["meta", "hero"])));
    let de = tree(json!({"meta": {"title": "ab"}}));
    let en = tree(json!({"meta": {"title": "ab"}, "hero": {"title": "Hello"}}));

    let result = validator.validate_all(&de, &en);
    let report = result.report();
    assert!(!report.is_valid);
    assert_eq!(report.error_count, 2);
    assert_eq!(report.warning_count, 2);
    assert_eq!(report.summary.total_issues, 4);
    assert_eq!(report.summary.critical_issues, 2);
    assert_eq!(report.summary.minor_issues, 2);

    let at = Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).single().expect("valid time");
    let export = validator.export_at(&result, at);
    assert_eq!(export.timestamp, "2024-05-17T09:30:00.000Z");
    assert_eq!(export.recommendations, "Fix critical errors before deploying");

    let json = serde_json::to_value(&export).expect("serialize export");
    assert_eq!(json["report"]["errorCount"], 2);
    assert_eq!(json["report"]["summary"]["minorIssues"], 2);
    assert_eq!(
        json["config"]["contentValidation"]["requiredSections"],
        json!(["meta", "hero"])
    );

    let markdown = render_report(&export, &[]);
    assert!(markdown.contains("- valid: false"));
    assert!(markdown.contains("Missing required section: hero in German"));
    assert!(markdown.ends_with("- Fix critical errors before deploying"));
}

#[test]
fn clean_export_recommends_deployment() {
    let (config, de, en) = site_fixtures();
    let validator = ContentValidator::new(config);
    let result = validator.validate_all(&de, &en);

    let export = validator.export(&result);
    assert_eq!(export.recommendations, "Content is ready for deployment");
    assert!(export.report.is_valid);

    let json = serde_json::to_value(&result).expect("serialize result");
    assert_eq!(json["isValid"], true);
    assert_eq!(json["errors"], json!([]));
}

#[test]
fn export_keeps_unmodelled_config_sections() {
    let (config, de, en) = site_fixtures();
    let validator = ContentValidator::new(config);
    let result = validator.validate_all(&de, &en);

    let json = serde_json::to_value(validator.export(&result)).expect("serialize export");
    let keys: Vec<&str> = json["config"]
        .as_object()
        .expect("config object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec!["contentValidation", "contentControl", "expressionControl", "siteSettings"]
    );
    assert_eq!(
        json["config"]["siteSettings"],
        json!({"defaultLanguage": "de", "languages": ["de", "en"]})
    );
    assert_eq!(json["config"]["expressionControl"]["explicitCheck"], "arity");
}

#[test]
fn terminology_category_selects_the_term_pairs() {
    let (mut config, mut de, en) = site_fixtures();
    config.expression_control.terminology_category = "navigation".to_string();
    let validator = ContentValidator::new(config);
    de.insert("footer", json!({"links": "Kontakt"}).into());

    let suggestions = validator.suggest_improvements(&de, &en);
    let terminology: Vec<_> = suggestions
        .iter()
        .filter_map(|suggestion| match suggestion {
            Suggestion::TerminologyInconsistency { term, counts, .. } => Some((term, counts)),
            Suggestion::MissingTranslation { .. } => None,
        })
        .collect();
    assert_eq!(terminology.len(), 1);
    let (term, counts) = terminology[0];
    assert_eq!((term.de.as_str(), term.en.as_str()), ("Kontakt", "Contact"));
    assert_eq!(counts.de, counts.en + 1);
}
