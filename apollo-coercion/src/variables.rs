//! <https://spec.graphql.org/October2021/#CoerceVariableValues()>

use std::collections::HashSet;
use std::ops::ControlFlow;

use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast::VariableDefinition;
use apollo_compiler::response::JsonMap;
use apollo_compiler::response::JsonValue;
use tracing::level_filters::LevelFilter;

use crate::configuration::Configuration;
use crate::error::CoercionError;
use crate::error::CoercionErrorKind;
use crate::error::VariableErrors;
use crate::input_coercion::InputCoercion;
use crate::input_coercion::resolve_input_type;
use crate::values::CoercedValues;

/// Accumulates errors up to the configured limit
struct ErrorCollector {
    errors: Vec<CoercionError>,
    max_errors: Option<usize>,
}

impl ErrorCollector {
    fn push(&mut self, error: CoercionError) -> ControlFlow<()> {
        if self.max_errors.is_some_and(|max| self.errors.len() >= max) {
            self.errors.push(CoercionError::new(
                CoercionErrorKind::TooManyErrors,
                "Too many errors processing variables, error limit reached. Execution aborted.",
                None,
            ));
            return ControlFlow::Break(());
        }
        self.errors.push(error);
        ControlFlow::Continue(())
    }
}

/// Coerces request variables to the types declared by the operation.
///
/// Every declaration is processed even after a failure,
/// so that all problems are reported together.
#[tracing::instrument(skip_all, level = "trace")]
pub(crate) fn coerce_variables(
    schema: &Schema,
    coercion: &impl InputCoercion,
    configuration: &Configuration,
    definitions: &[Node<VariableDefinition>],
    inputs: &JsonMap,
) -> Result<CoercedValues, VariableErrors> {
    if LevelFilter::current() >= LevelFilter::DEBUG {
        log_unknown_variables(definitions, inputs);
    }

    let mut coerced = CoercedValues::new();
    let mut errors = ErrorCollector {
        errors: Vec::new(),
        max_errors: configuration.max_errors,
    };
    for definition in definitions {
        if let ControlFlow::Break(()) =
            coerce_variable(schema, coercion, definition, inputs, &mut coerced, &mut errors)
        {
            break;
        }
    }

    if errors.errors.is_empty() {
        Ok(coerced)
    } else {
        tracing::debug!(
            errors = errors.errors.len(),
            "request variables could not be coerced"
        );
        Err(VariableErrors(errors.errors))
    }
}

fn coerce_variable(
    schema: &Schema,
    coercion: &impl InputCoercion,
    definition: &Node<VariableDefinition>,
    inputs: &JsonMap,
    coerced: &mut CoercedValues,
    errors: &mut ErrorCollector,
) -> ControlFlow<()> {
    let name = &definition.name;
    let ty = &definition.ty;
    if resolve_input_type(schema, ty).is_none() {
        // Validation rejects this, but the type might have been removed from the schema since
        return errors.push(CoercionError::new(
            CoercionErrorKind::InvalidInputType,
            format!(
                "Variable \"${name}\" expected value of type \"{ty}\" \
                 which cannot be used as an input type."
            ),
            ty.location(),
        ));
    }

    let value = inputs.get(name.as_str());
    match (value, &definition.default_value) {
        (None, Some(default_value)) => {
            // Defaults are literals, so they take the literal path and never see the inputs
            match coercion.coerce_literal(schema, default_value, ty, None) {
                Some(default_value) => coerced.insert(name.as_str(), default_value),
                None => {
                    return errors.push(CoercionError::new(
                        CoercionErrorKind::InvalidValue,
                        format!("Variable \"${name}\" has invalid default value {default_value}."),
                        default_value.location(),
                    ));
                }
            }
        }
        (None, None) if ty.is_non_null() => {
            return errors.push(CoercionError::new(
                CoercionErrorKind::MissingValue,
                format!("Variable \"${name}\" of required type \"{ty}\" was not provided."),
                definition.location(),
            ));
        }
        (Some(JsonValue::Null), _) if ty.is_non_null() => {
            return errors.push(CoercionError::new(
                CoercionErrorKind::NullValue,
                format!("Variable \"${name}\" of non-null type \"{ty}\" must not be null."),
                definition.location(),
            ));
        }
        // Explicit null is kept as an entry: it differs from not providing the variable
        (Some(JsonValue::Null), _) => coerced.insert(name.as_str(), JsonValue::Null),
        (Some(value), _) => {
            match coercion.coerce_raw_value(schema, value, ty, definition.location()) {
                Ok(value) => coerced.insert(name.as_str(), value),
                Err(coercion_errors) => {
                    for error in coercion_errors {
                        errors.push(
                            error.with_prefix(format_args!(
                                "Variable \"${name}\" got invalid value {value}; "
                            )),
                        )?;
                    }
                }
            }
        }
        // Nullable, not provided and no default: no entry at all
        (None, None) => {}
    }
    ControlFlow::Continue(())
}

fn log_unknown_variables(definitions: &[Node<VariableDefinition>], inputs: &JsonMap) {
    let known: HashSet<&str> = definitions
        .iter()
        .map(|definition| definition.name.as_str())
        .collect();
    let unknown: Vec<&str> = inputs
        .keys()
        .map(|key| key.as_str())
        .filter(|key| !known.contains(key))
        .collect();
    if !unknown.is_empty() {
        tracing::debug!("Received variable unknown to the query: {:?}", unknown);
    }
}
