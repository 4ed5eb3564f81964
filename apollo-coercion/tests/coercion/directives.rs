use apollo_coercion::CoercedValues;
use apollo_coercion::Coercer;
use apollo_coercion::CoercionErrorKind;
use apollo_compiler::response::JsonValue;
use pretty_assertions::assert_eq;
use serde_json_bytes::json;
use test_log::test;

use super::document;
use super::inputs;
use super::root_field;
use super::schema;

#[test]
fn directive_not_applied() {
    let schema = schema();
    let document = document(&schema, r#"{ greet(name: "Ann") }"#);
    let field = root_field(&document);
    let coercer = Coercer::new(&schema);
    let skip = coercer.directive_arguments(&schema.directive_definitions["skip"]);
    let coerced = coercer
        .extract_directive_arguments(&skip, &field.directives, None)
        .unwrap();
    assert_eq!(coerced, None);
}

#[test]
fn skip_with_variable() {
    let schema = schema();
    let document = document(
        &schema,
        r#"query($skipped: Boolean!) { greet(name: "Ann") @skip(if: $skipped) }"#,
    );
    let operation = document.operations.get(None).unwrap();
    let coercer = Coercer::new(&schema);
    let variables = coercer
        .coerce_variables(&operation.variables, &inputs(json!({ "skipped": true })))
        .unwrap();
    let field = root_field(&document);
    let skip = coercer.directive_arguments(&schema.directive_definitions["skip"]);
    let coerced = coercer
        .extract_directive_arguments(&skip, &field.directives, Some(&variables))
        .unwrap()
        .unwrap();
    assert_eq!(coerced.get("if"), Some(&json!(true)));
}

#[test]
fn custom_directive_defaults() {
    let schema = schema();
    let document = document(&schema, r#"{ greet(name: "Ann") @log }"#);
    let field = root_field(&document);
    let coercer = Coercer::new(&schema);
    let log = coercer.directive_arguments(&schema.directive_definitions["log"]);
    let coerced = apollo_coercion::extract_directive_arguments(
        &schema,
        &log,
        &field.directives,
        None,
    )
    .unwrap()
    .unwrap();
    // `tag` has no default and is not provided
    assert_eq!(JsonValue::Object(coerced.into_json_map()), json!({ "level": 1 }));
}

#[test]
fn directive_argument_error() {
    let schema = schema();
    let document = document(
        &schema,
        r#"query($skipped: Boolean!) { greet(name: "Ann") @skip(if: $skipped) }"#,
    );
    let field = root_field(&document);
    let coercer = Coercer::new(&schema);
    let skip = coercer.directive_arguments(&schema.directive_definitions["skip"]);
    let error = coercer
        .extract_directive_arguments(&skip, &field.directives, Some(&CoercedValues::new()))
        .unwrap_err();
    assert_eq!(error.kind(), CoercionErrorKind::MissingValue);
    let graphql_error = error.to_graphql_error(&document.sources);
    assert_eq!(
        graphql_error.extensions.get("code"),
        Some(&json!("MISSING_REQUIRED_ARGUMENT"))
    );
}
