use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast::DirectiveDefinition;
use apollo_compiler::ast::DirectiveList;
use apollo_compiler::ast::VariableDefinition;
use apollo_compiler::response::JsonMap;
use apollo_compiler::schema::FieldDefinition;

use crate::arguments;
use crate::arguments::ArgumentsDefinition;
use crate::arguments::Invocation;
use crate::configuration::Configuration;
use crate::directives;
use crate::error::CoercionError;
use crate::error::VariableErrors;
use crate::input_coercion::InputCoercion;
use crate::input_coercion::StandardCoercion;
use crate::values::CoercedValues;
use crate::variables;

/// Coerces variables and arguments against a schema.
///
/// Holds no state between calls: the same `Coercer` can be shared across requests and threads.
#[derive(Debug, Clone)]
pub struct Coercer<'schema, C = StandardCoercion> {
    schema: &'schema Schema,
    coercion: C,
    configuration: Configuration,
}

impl<'schema> Coercer<'schema> {
    pub fn new(schema: &'schema Schema) -> Self {
        Self {
            schema,
            coercion: StandardCoercion,
            configuration: Configuration::default(),
        }
    }
}

impl<'schema, C: InputCoercion> Coercer<'schema, C> {
    /// Replace the primitives used to coerce individual values
    pub fn with_coercion<D: InputCoercion>(self, coercion: D) -> Coercer<'schema, D> {
        Coercer {
            schema: self.schema,
            coercion,
            configuration: self.configuration,
        }
    }

    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    pub fn schema(&self) -> &'schema Schema {
        self.schema
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Coerces the values of [variables](https://spec.graphql.org/draft/#sec-Language.Variables)
    /// from a GraphQL request to the types declared by the operation.
    ///
    /// Either every variable is valid, or every problem is returned.
    pub fn coerce_variables(
        &self,
        definitions: &[Node<VariableDefinition>],
        inputs: &JsonMap,
    ) -> Result<CoercedValues, VariableErrors> {
        variables::coerce_variables(
            self.schema,
            &self.coercion,
            &self.configuration,
            definitions,
            inputs,
        )
    }

    /// Coerces the arguments of a field selection or directive application.
    ///
    /// Fails on the first invalid or missing required argument.
    pub fn coerce_arguments<I: Invocation>(
        &self,
        definition: &ArgumentsDefinition,
        invocation: &Node<I>,
        variables: Option<&CoercedValues>,
    ) -> Result<CoercedValues, CoercionError> {
        arguments::coerce_arguments(self.schema, &self.coercion, definition, invocation, variables)
    }

    /// Coerces the arguments of the directive `definition` if it is applied in `directives`.
    ///
    /// Returns `Ok(None)` if it is not.
    pub fn extract_directive_arguments(
        &self,
        definition: &ArgumentsDefinition,
        directives: &DirectiveList,
        variables: Option<&CoercedValues>,
    ) -> Result<Option<CoercedValues>, CoercionError> {
        directives::extract_directive_arguments(
            self.schema,
            &self.coercion,
            definition,
            directives,
            variables,
        )
    }

    /// Prepares the arguments of a field definition, coercing their default values
    pub fn field_arguments(&self, field: &FieldDefinition) -> ArgumentsDefinition {
        ArgumentsDefinition::from_input_values(
            self.schema,
            &self.coercion,
            &field.name,
            &field.arguments,
        )
    }

    /// Prepares the arguments of a directive definition, coercing their default values
    pub fn directive_arguments(&self, directive: &DirectiveDefinition) -> ArgumentsDefinition {
        ArgumentsDefinition::from_input_values(
            self.schema,
            &self.coercion,
            &directive.name,
            &directive.arguments,
        )
    }
}
