//! Coercion configuration.

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

/// Configuration for value coercion
///
/// Example, embedded in a larger YAML configuration:
///
/// ```yaml
/// coercion:
///   max_errors: 50
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, default)]
pub struct Configuration {
    /// Stop coercing request variables after this many errors.
    /// When reached, a final error reports that the limit was hit.
    /// Unlimited by default.
    pub max_errors: Option<usize>,
}

impl Configuration {
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = Some(max_errors);
        self
    }
}
