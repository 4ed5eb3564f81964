use apollo_coercion::CoercedValues;
use apollo_coercion::Coercer;
use apollo_coercion::CoercionErrorKind;
use apollo_compiler::response::JsonValue;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json_bytes::json;

use super::document;
use super::inputs;
use super::root_field;
use super::schema;
use super::unvalidated_root_field;

#[test_log::test]
fn required_literal() {
    let schema = schema();
    let document = document(&schema, r#"{ greet(name: "Ann") }"#);
    let field = root_field(&document);
    let coercer = Coercer::new(&schema);
    let coerced = coercer
        .coerce_arguments(&coercer.field_arguments(&field.definition), field, None)
        .unwrap();
    assert_eq!(
        JsonValue::Object(coerced.into_json_map()),
        json!({ "name": "Ann" })
    );
}

#[test_log::test]
fn variables_and_defaults() {
    let schema = schema();
    let document = document(
        &schema,
        r#"query($name: String!, $filter: Filter) { user(name: $name, filter: $filter) { name } }"#,
    );
    let operation = document.operations.get(None).unwrap();
    let coercer = Coercer::new(&schema);
    let variables = coercer
        .coerce_variables(
            &operation.variables,
            &inputs(json!({ "name": "Ann", "filter": { "active": false } })),
        )
        .unwrap();
    let field = root_field(&document);
    let coerced = coercer
        .coerce_arguments(
            &coercer.field_arguments(&field.definition),
            field,
            Some(&variables),
        )
        .unwrap();
    assert_eq!(
        JsonValue::Object(coerced.into_json_map()),
        json!({ "name": "Ann", "limit": 10, "filter": { "active": false } })
    );
}

#[test_log::test]
fn nullable_variable_without_value_is_absent() {
    let schema = schema();
    let document = document(
        &schema,
        r#"query($filter: Filter) { user(name: "Ann", filter: $filter) { name } }"#,
    );
    let field = root_field(&document);
    let coercer = Coercer::new(&schema);
    let coerced = coercer
        .coerce_arguments(
            &coercer.field_arguments(&field.definition),
            field,
            Some(&CoercedValues::new()),
        )
        .unwrap();
    assert!(coerced.presence("filter").is_absent());
    assert!(!coerced.contains_key("filter"));
}

#[rstest]
#[case::missing(
    "{ search(first: 1) }",
    CoercionErrorKind::MissingValue,
    r#"Argument "term" of required type "String!" was not provided."#
)]
#[case::null_literal(
    "{ search(term: null, first: null) }",
    CoercionErrorKind::NullValue,
    r#"Argument "term" of non-null type "String!" must not be null."#
)]
#[case::unresolved_variable(
    "{ search(term: $term, first: 1) }",
    CoercionErrorKind::MissingValue,
    r#"Argument "term" of required type "String!" was provided the variable "$term" which was not provided a runtime value."#
)]
#[case::only_first_failure(
    r#"{ search(term: 1, first: "two") }"#,
    CoercionErrorKind::InvalidValue,
    r#"Argument "term" has invalid value 1."#
)]
fn fails_on_first_argument(
    #[case] query: &str,
    #[case] kind: CoercionErrorKind,
    #[case] message: &str,
) {
    let schema = schema();
    let coercer = Coercer::new(&schema);
    let definition = coercer.field_arguments(&schema.type_field("Query", "search").unwrap());
    let error = coercer
        .coerce_arguments(
            &definition,
            &unvalidated_root_field(query),
            Some(&CoercedValues::new()),
        )
        .unwrap_err();
    assert_eq!(error.kind(), kind);
    assert_eq!(error.message(), message);
}

#[test_log::test]
fn variable_values_are_trusted() {
    let schema = schema();
    let coercer = Coercer::new(&schema);
    let definition = coercer.field_arguments(&schema.type_field("Query", "search").unwrap());
    let variables: CoercedValues = [("first", json!("not an int"))].into_iter().collect();
    let coerced = coercer
        .coerce_arguments(
            &definition,
            &unvalidated_root_field(r#"{ search(term: "a", first: $first) }"#),
            Some(&variables),
        )
        .unwrap();
    assert_eq!(coerced.get("first"), Some(&json!("not an int")));
}

#[test_log::test]
fn missing_argument_error_is_located_at_the_field() {
    let schema = schema();
    let coercer = Coercer::new(&schema);
    let definition = coercer.field_arguments(&schema.type_field("Query", "search").unwrap());
    let field = unvalidated_root_field("{ search(first: 1) }");
    let error = coercer
        .coerce_arguments(&definition, &field, None)
        .unwrap_err();
    assert_eq!(error.locations(), [field.location().unwrap()]);
}

#[test_log::test]
fn null_variables_are_kept() {
    let schema = schema();
    let document = document(
        &schema,
        r#"query($limit: Int, $filter: Filter) { user(name: "a", limit: $limit, filter: $filter) { name } }"#,
    );
    let operation = document.operations.get(None).unwrap();
    let coercer = Coercer::new(&schema);
    let variables = coercer
        .coerce_variables(
            &operation.variables,
            &inputs(json!({ "limit": null, "filter": null })),
        )
        .unwrap();
    let field = root_field(&document);
    let coerced = coercer
        .coerce_arguments(
            &coercer.field_arguments(&field.definition),
            field,
            Some(&variables),
        )
        .unwrap();
    // `limit` has a default of 10, which an explicit null does not trigger
    assert!(coerced.presence("limit").is_null());
    assert!(coerced.presence("filter").is_null());
    assert_eq!(
        JsonValue::Object(coerced.into_json_map()),
        json!({ "name": "a", "limit": null, "filter": null })
    );
}

#[test_log::test]
fn null_variable_for_required_argument() {
    let schema = schema();
    let coercer = Coercer::new(&schema);
    let definition = coercer.field_arguments(&schema.type_field("Query", "search").unwrap());
    let variables: CoercedValues = [("term", JsonValue::Null)].into_iter().collect();
    let field = unvalidated_root_field("{ search(term: $term, first: 1) }");
    let error = coercer
        .coerce_arguments(&definition, &field, Some(&variables))
        .unwrap_err();
    assert_eq!(error.kind(), CoercionErrorKind::NullValue);
    assert_eq!(
        error.message(),
        r#"Argument "term" of non-null type "String!" must not be null."#
    );
    let variable = &field.arguments[0].value;
    assert_eq!(error.locations(), [variable.location().unwrap()]);
}
