//! Coercion errors.
use std::fmt;

use apollo_compiler::parser::SourceMap;
use apollo_compiler::parser::SourceSpan;
use apollo_compiler::response::GraphQLError;
use displaydoc::Display;
use serde::Serialize;

/// The category of a [`CoercionError`].
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum CoercionErrorKind {
    /// variable type cannot be used as an input type
    InvalidInputType,
    /// required value was not provided
    MissingValue,
    /// non-null value was null
    NullValue,
    /// value does not match its declared type
    InvalidValue,
    /// too many errors
    TooManyErrors,
}

impl CoercionErrorKind {
    /// The `extensions.code` of GraphQL errors for this kind of failure
    /// when it happens while coercing request variables.
    pub const fn variable_extension_code(self) -> &'static str {
        match self {
            CoercionErrorKind::TooManyErrors => "VALIDATION_TOO_MANY_ERRORS",
            CoercionErrorKind::InvalidInputType
            | CoercionErrorKind::MissingValue
            | CoercionErrorKind::NullValue
            | CoercionErrorKind::InvalidValue => "VALIDATION_INVALID_TYPE_VARIABLE",
        }
    }

    /// The `extensions.code` of GraphQL errors for this kind of failure
    /// when it happens while coercing field or directive arguments.
    pub const fn argument_extension_code(self) -> &'static str {
        match self {
            CoercionErrorKind::MissingValue | CoercionErrorKind::NullValue => {
                "MISSING_REQUIRED_ARGUMENT"
            }
            CoercionErrorKind::TooManyErrors
            | CoercionErrorKind::InvalidInputType
            | CoercionErrorKind::InvalidValue => "GRAPHQL_VALIDATION_FAILED",
        }
    }
}

/// A value could not be coerced to its declared type.
///
/// Locations point at the syntax nodes involved, when they were parsed from a source file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CoercionError {
    pub(crate) kind: CoercionErrorKind,
    pub(crate) message: String,
    pub(crate) locations: Vec<SourceSpan>,
}

impl CoercionError {
    pub(crate) fn new(
        kind: CoercionErrorKind,
        message: impl Into<String>,
        location: Option<SourceSpan>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            locations: location.into_iter().collect(),
        }
    }

    pub fn kind(&self) -> CoercionErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn locations(&self) -> &[SourceSpan] {
        &self.locations
    }

    /// Prepend context to the message, keeping kind and locations
    pub(crate) fn with_prefix(mut self, prefix: impl fmt::Display) -> Self {
        self.message = format!("{prefix}{}", self.message);
        self
    }

    /// Render as a GraphQL response error, with `extensions.code` set to `code`.
    pub fn to_graphql_error_with_code(&self, sources: &SourceMap, code: &str) -> GraphQLError {
        let mut error = GraphQLError::new(&self.message, self.locations.first().copied(), sources);
        error.locations.extend(
            self.locations
                .iter()
                .skip(1)
                .filter_map(|span| span.line_column(sources)),
        );
        error.extensions.insert("code", code.into());
        error
    }

    /// Render as a GraphQL response error for a failed argument coercion
    pub fn to_graphql_error(&self, sources: &SourceMap) -> GraphQLError {
        self.to_graphql_error_with_code(sources, self.kind.argument_extension_code())
    }
}

/// Every error found while coercing the variables of a request. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableErrors(pub(crate) Vec<CoercionError>);

impl VariableErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A `VariableErrors` returned by variable coercion always has at least one error
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CoercionError> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<CoercionError> {
        self.0
    }

    /// Render every error as a [request error](https://spec.graphql.org/draft/#sec-Errors.Request-Errors)
    pub fn to_graphql_errors(&self, sources: &SourceMap) -> Vec<GraphQLError> {
        self.0
            .iter()
            .map(|error| {
                error.to_graphql_error_with_code(sources, error.kind.variable_extension_code())
            })
            .collect()
    }
}

impl fmt::Display for VariableErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errors = self.0.iter();
        if let Some(first) = errors.next() {
            write!(f, "{first}")?;
        }
        for error in errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for VariableErrors {}

impl IntoIterator for VariableErrors {
    type Item = CoercionError;
    type IntoIter = std::vec::IntoIter<CoercionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a VariableErrors {
    type Item = &'a CoercionError;
    type IntoIter = std::slice::Iter<'a, CoercionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
