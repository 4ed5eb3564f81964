use apollo_compiler::Schema;
use apollo_compiler::ast::DirectiveList;

use crate::arguments::ArgumentsDefinition;
use crate::arguments::coerce_arguments;
use crate::error::CoercionError;
use crate::input_coercion::InputCoercion;
use crate::values::CoercedValues;

/// Coerces the arguments of the first application of the directive `definition` in `directives`.
///
/// Returns `Ok(None)` if the directive is not applied,
/// which differs from `Ok(Some(_))` with no arguments.
pub(crate) fn extract_directive_arguments(
    schema: &Schema,
    coercion: &impl InputCoercion,
    definition: &ArgumentsDefinition,
    directives: &DirectiveList,
    variables: Option<&CoercedValues>,
) -> Result<Option<CoercedValues>, CoercionError> {
    directives
        .0
        .iter()
        .find(|directive| directive.name == definition.name)
        .map(|directive| coerce_arguments(schema, coercion, definition, directive, variables))
        .transpose()
}
