//! <https://spec.graphql.org/October2021/#CoerceArgumentValues()>

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast;
use apollo_compiler::executable;
use apollo_compiler::response::JsonValue;
use apollo_compiler::schema::InputValueDefinition;
use apollo_compiler::schema::Type;

use crate::error::CoercionError;
use crate::error::CoercionErrorKind;
use crate::input_coercion::InputCoercion;
use crate::values::CoercedValues;

/// An argument of a field or directive definition
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentDefinition {
    pub name: Name,
    pub ty: Node<Type>,
    /// Already coerced to `ty`, used as-is
    pub default_value: Option<JsonValue>,
}

/// The arguments of a field or directive definition, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentsDefinition {
    /// Name of the field or directive
    pub name: Name,
    pub arguments: Vec<ArgumentDefinition>,
}

impl ArgumentsDefinition {
    /// Coerces the default value literals of schema argument definitions.
    ///
    /// A default value that is not valid for its argument is dropped,
    /// as if the argument had no default.
    pub(crate) fn from_input_values(
        schema: &Schema,
        coercion: &impl InputCoercion,
        name: &Name,
        arguments: &[Node<InputValueDefinition>],
    ) -> Self {
        let arguments = arguments
            .iter()
            .map(|argument| {
                let default_value = argument.default_value.as_ref().and_then(|default_value| {
                    let coerced = coercion.coerce_literal(schema, default_value, &argument.ty, None);
                    if coerced.is_none() {
                        tracing::warn!(
                            "ignoring invalid default value {default_value} \
                             for argument \"{}\" of \"{name}\"",
                            argument.name
                        );
                    }
                    coerced
                });
                ArgumentDefinition {
                    name: argument.name.clone(),
                    ty: argument.ty.clone(),
                    default_value,
                }
            })
            .collect();
        Self {
            name: name.clone(),
            arguments,
        }
    }

    pub fn argument_by_name(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments
            .iter()
            .find(|argument| argument.name == name)
    }
}

/// A syntax node that supplies arguments: a field selection or a directive application
pub trait Invocation {
    fn arguments(&self) -> &[Node<ast::Argument>];
}

impl Invocation for ast::Field {
    fn arguments(&self) -> &[Node<ast::Argument>] {
        &self.arguments
    }
}

impl Invocation for executable::Field {
    fn arguments(&self) -> &[Node<ast::Argument>] {
        &self.arguments
    }
}

impl Invocation for ast::Directive {
    fn arguments(&self) -> &[Node<ast::Argument>] {
        &self.arguments
    }
}

/// What an invocation supplies for one argument
#[derive(Clone, Copy)]
enum Supplied<'a> {
    Nothing,
    /// A variable reference, with the variable's coerced value if it has one
    Variable(&'a Name, Option<&'a JsonValue>),
    Literal(&'a Node<ast::Value>),
}

/// Coerces the arguments supplied by `invocation` to the types of `definition`.
///
/// Stops at the first argument that cannot be coerced.
/// Variable values are used as they are: validation already checked that each variable usage
/// has a type compatible with its position.
#[tracing::instrument(skip_all, level = "trace", fields(definition = %definition.name))]
pub(crate) fn coerce_arguments<I: Invocation>(
    schema: &Schema,
    coercion: &impl InputCoercion,
    definition: &ArgumentsDefinition,
    invocation: &Node<I>,
    variables: Option<&CoercedValues>,
) -> Result<CoercedValues, CoercionError> {
    let mut coerced = CoercedValues::new();
    for argument in &definition.arguments {
        let name = &argument.name;
        let ty = &argument.ty;
        // Duplicates are a validation error, the first occurrence wins
        let value_node = invocation
            .arguments()
            .iter()
            .find(|supplied| supplied.name == *name)
            .map(|supplied| &supplied.value);
        let supplied = match value_node {
            None => Supplied::Nothing,
            Some(value) => match &**value {
                ast::Value::Variable(variable_name) => Supplied::Variable(
                    variable_name,
                    variables.and_then(|variables| variables.get(variable_name.as_str())),
                ),
                _ => Supplied::Literal(value),
            },
        };
        let (has_value, is_null) = match supplied {
            Supplied::Nothing => (false, false),
            Supplied::Variable(_, value) => (value.is_some(), value.is_some_and(JsonValue::is_null)),
            Supplied::Literal(value) => (true, value.is_null()),
        };

        if !has_value {
            if let Some(default_value) = &argument.default_value {
                coerced.insert(name.as_str(), default_value.clone());
                continue;
            }
        }
        if (!has_value || is_null) && ty.is_non_null() {
            let location = value_node
                .and_then(|value| value.location())
                .or_else(|| invocation.location());
            let error = match supplied {
                _ if is_null => CoercionError::new(
                    CoercionErrorKind::NullValue,
                    format!("Argument \"{name}\" of non-null type \"{ty}\" must not be null."),
                    location,
                ),
                Supplied::Variable(variable_name, _) => CoercionError::new(
                    CoercionErrorKind::MissingValue,
                    format!(
                        "Argument \"{name}\" of required type \"{ty}\" \
                         was provided the variable \"${variable_name}\" \
                         which was not provided a runtime value."
                    ),
                    location,
                ),
                Supplied::Nothing | Supplied::Literal(_) => CoercionError::new(
                    CoercionErrorKind::MissingValue,
                    format!("Argument \"{name}\" of required type \"{ty}\" was not provided."),
                    invocation.location(),
                ),
            };
            return Err(failed(error));
        }

        match supplied {
            // Nullable with no value and no default: no entry at all
            Supplied::Nothing | Supplied::Variable(_, None) => {}
            Supplied::Variable(_, Some(value)) => coerced.insert(name.as_str(), value.clone()),
            Supplied::Literal(value) if value.is_null() => {
                coerced.insert(name.as_str(), JsonValue::Null)
            }
            Supplied::Literal(value) => {
                let Some(coerced_value) = coercion.coerce_literal(schema, value, ty, variables)
                else {
                    return Err(failed(CoercionError::new(
                        CoercionErrorKind::InvalidValue,
                        format!("Argument \"{name}\" has invalid value {value}."),
                        value.location(),
                    )));
                };
                coerced.insert(name.as_str(), coerced_value)
            }
        }
    }
    Ok(coerced)
}

fn failed(error: CoercionError) -> CoercionError {
    tracing::debug!(error = %error, "argument could not be coerced");
    error
}
