//! Runtime coercion of GraphQL input values.
//!
//! Before an operation executes, the values it receives must be reconciled with the types
//! the schema and the operation declare:
//!
//! * [`coerce_variables`] checks the variables of a request against the
//!   operation's variable definitions. It reports every problem at once.
//! * [`coerce_arguments`] checks the arguments of a field selection or directive application
//!   against the field or directive definition. It stops at the first problem.
//! * [`extract_directive_arguments`] finds a directive application by name
//!   and coerces its arguments.
//!
//! Coerced values keep the difference between a value that was not provided
//! (no entry in [`CoercedValues`]) and one explicitly provided as `null`.
//!
//! Documents are expected to have passed validation already.
//! In particular, a variable used as an argument is not checked again
//! against the type of that argument.
//!
//! ## Example
//!
//! ```
//! use apollo_compiler::ExecutableDocument;
//! use apollo_compiler::Schema;
//! use serde_json_bytes::json;
//!
//! let schema =
//!     Schema::parse_and_validate("type Query { f(a: Int): Int }", "schema.graphql").unwrap();
//! let document = ExecutableDocument::parse_and_validate(
//!     &schema,
//!     "query($a: Int = 7) { f(a: $a) }",
//!     "query.graphql",
//! )
//! .unwrap();
//! let operation = document.operations.get(None).unwrap();
//! let inputs = Default::default();
//! let variables =
//!     apollo_coercion::coerce_variables(&schema, &operation.variables, &inputs).unwrap();
//! assert_eq!(variables.get("a"), Some(&json!(7)));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![warn(
    rustdoc::broken_intra_doc_links,
    unreachable_pub,
    unreachable_patterns,
    unused,
    unused_qualifications,
    dead_code,
    while_true,
    unconditional_panic,
    clippy::all
)]

mod arguments;
mod coercer;
mod configuration;
mod directives;
mod error;
pub mod input_coercion;
mod values;
mod variables;

use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast::DirectiveList;
use apollo_compiler::ast::VariableDefinition;
use apollo_compiler::response::JsonMap;

pub use crate::arguments::ArgumentDefinition;
pub use crate::arguments::ArgumentsDefinition;
pub use crate::arguments::Invocation;
pub use crate::coercer::Coercer;
pub use crate::configuration::Configuration;
pub use crate::error::CoercionError;
pub use crate::error::CoercionErrorKind;
pub use crate::error::VariableErrors;
pub use crate::input_coercion::InputCoercion;
pub use crate::input_coercion::StandardCoercion;
pub use crate::values::CoercedValues;
pub use crate::values::Presence;

/// Coerces request variables with [`StandardCoercion`] and the default [`Configuration`].
///
/// See [`Coercer::coerce_variables`].
pub fn coerce_variables(
    schema: &Schema,
    definitions: &[Node<VariableDefinition>],
    inputs: &JsonMap,
) -> Result<CoercedValues, VariableErrors> {
    Coercer::new(schema).coerce_variables(definitions, inputs)
}

/// Coerces the arguments of a field selection or directive application with [`StandardCoercion`].
///
/// See [`Coercer::coerce_arguments`].
pub fn coerce_arguments<I: Invocation>(
    schema: &Schema,
    definition: &ArgumentsDefinition,
    invocation: &Node<I>,
    variables: Option<&CoercedValues>,
) -> Result<CoercedValues, CoercionError> {
    Coercer::new(schema).coerce_arguments(definition, invocation, variables)
}

/// Coerces the arguments of a directive application with [`StandardCoercion`],
/// or returns `Ok(None)` if the directive is not applied.
///
/// See [`Coercer::extract_directive_arguments`].
pub fn extract_directive_arguments(
    schema: &Schema,
    definition: &ArgumentsDefinition,
    directives: &DirectiveList,
    variables: Option<&CoercedValues>,
) -> Result<Option<CoercedValues>, CoercionError> {
    Coercer::new(schema).extract_directive_arguments(definition, directives, variables)
}
