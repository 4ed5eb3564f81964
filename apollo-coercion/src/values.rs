//! Coerced value maps.

use apollo_compiler::response::JsonMap;
use apollo_compiler::response::JsonValue;
use serde::Serialize;
use serde_json_bytes::ByteString;

/// Whether and how a name is set in [`CoercedValues`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence<'a> {
    /// No entry: not provided, no default, and not required
    Absent,
    /// Explicitly provided as `null`
    Null,
    /// Provided with a non-null value
    Value(&'a JsonValue),
}

impl Presence<'_> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Presence::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Presence::Null)
    }
}

/// Variable or argument values after coercion, keyed by name.
///
/// A name that was not provided (and has no default) has no entry at all,
/// which is distinct from an entry whose value is `null`.
/// Iteration only ever yields entries that were explicitly inserted, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CoercedValues {
    values: JsonMap,
}

impl CoercedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: &str, value: JsonValue) {
        self.values.insert(name, value);
    }

    /// Returns the entry for `name`. `Some(&JsonValue::Null)` is an explicit null.
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.values.get(name)
    }

    pub fn presence(&self, name: &str) -> Presence<'_> {
        match self.values.get(name) {
            None => Presence::Absent,
            Some(JsonValue::Null) => Presence::Null,
            Some(value) => Presence::Value(value),
        }
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn as_json_map(&self) -> &JsonMap {
        &self.values
    }

    pub fn into_json_map(self) -> JsonMap {
        self.values
    }
}

impl From<CoercedValues> for JsonMap {
    fn from(values: CoercedValues) -> Self {
        values.values
    }
}

impl<'a> FromIterator<(&'a str, JsonValue)> for CoercedValues {
    fn from_iter<T: IntoIterator<Item = (&'a str, JsonValue)>>(iter: T) -> Self {
        let mut values = Self::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

impl IntoIterator for CoercedValues {
    type Item = (ByteString, JsonValue);
    type IntoIter = <JsonMap as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
