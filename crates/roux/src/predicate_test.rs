// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

fn decided(decision: Decision) -> Option<bool> {
    match decision {
        Decision::Decided(value) => Some(value),
        Decision::Pending(_) => None,
    }
}

#[rstest]
fn test_default_predicate_names() {
    let names: Vec<String> = default_predicates().into_keys().collect();
    assert_eq!(
        names,
        vec![
            "assets",
            "handlebars",
            "javaScript",
            "model",
            "preview",
            "previewScript",
            "sass"
        ]
    );
}

#[rstest]
#[case("assets", "assets", true)]
#[case("javaScript", "index.js", true)]
#[case("javaScript", "index.jsx", false)]
#[case("sass", "index.scss", true)]
#[case("handlebars", "preview.hbs", false)]
#[case("previewScript", "preview.js", true)]
#[case("model", "model.js", true)]
fn test_default_predicates_match(#[case] name: &str, #[case] filename: &str, #[case] expected: bool) {
    let predicates = default_predicates();
    let decision = predicates[name].evaluate(filename);
    assert_eq!(decided(decision), Some(expected));
}

#[rstest]
fn test_sync_predicate_decides_immediately() {
    let predicate = Predicate::from_fn(|name| name.ends_with(".js"));
    assert_eq!(decided(predicate.evaluate("index.js")), Some(true));
    assert_eq!(decided(predicate.evaluate("index.css")), Some(false));
}

#[rstest]
#[tokio::test]
async fn test_async_predicate_is_pending() {
    let predicate = Predicate::from_async_fn(|name: String| async move { name == "index.js" });
    match predicate.evaluate("index.js") {
        Decision::Pending(decision) => assert!(decision.await),
        other => panic!("Expected Pending, got: {:?}", other),
    }
}

#[rstest]
fn test_invalid_regex_is_rejected() {
    assert!(Predicate::regex("(unclosed").is_err());
}

#[rstest]
fn test_merge_overrides_and_extends_defaults() {
    let mut overrides = Predicates::new();
    overrides.insert("javaScript".to_string(), Predicate::regex("^main.js$").unwrap());
    overrides.insert("typeScript".to_string(), Predicate::regex("^index.ts$").unwrap());

    let merged = merge_with_defaults(overrides);

    assert_eq!(merged.len(), default_predicates().len() + 1);
    assert_eq!(decided(merged["javaScript"].evaluate("main.js")), Some(true));
    assert_eq!(decided(merged["javaScript"].evaluate("index.js")), Some(false));
    assert_eq!(decided(merged["typeScript"].evaluate("index.ts")), Some(true));
    assert_eq!(decided(merged["sass"].evaluate("index.scss")), Some(true));
}

#[rstest]
fn test_overrides_leave_shared_defaults_untouched() {
    let overrides = Predicates::from([(
        "javaScript".to_string(),
        Predicate::regex(r"^main\.js$").unwrap(),
    )]);
    let merged = merge_with_defaults(overrides);
    assert_eq!(decided(merged["javaScript"].evaluate("index.js")), Some(false));

    let defaults = default_predicates();
    assert_eq!(decided(defaults["javaScript"].evaluate("index.js")), Some(true));
    assert_eq!(decided(defaults["javaScript"].evaluate("main.js")), Some(false));
}
