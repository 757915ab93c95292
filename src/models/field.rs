// Nested field state
//
// Upstream payloads distinguish poorly between a missing key, an explicit null
// and an empty structure. Nested entity fields carry that distinction
// explicitly instead of collapsing it into an Option.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// State of a nested entity field.
///
/// | upstream JSON            | state          |
/// |--------------------------|----------------|
/// | key missing, `null`      | `Missing`      |
/// | `[]`, `{}`               | `Empty`        |
/// | anything else            | `Unresolved`   |
///
/// Hydration turns `Unresolved` into `Present` (or back into `Missing` when
/// the raw value does not fit the declared entity kind). Fields outside the
/// hydration walk keep the raw JSON as `Unresolved`.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Key absent or null
    Missing,
    /// Key present with an empty array or object
    Empty,
    /// Raw JSON not hydrated into an entity
    Unresolved(Value),
    /// Hydrated value
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T> Field<T> {
    /// Classify a raw JSON value
    pub fn from_raw(value: Value) -> Self {
        match value {
            Value::Null => Field::Missing,
            Value::Array(ref items) if items.is_empty() => Field::Empty,
            Value::Object(ref map) if map.is_empty() => Field::Empty,
            other => Field::Unresolved(other),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Field::Empty)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    /// Hydrated value, if any
    pub fn as_present(&self) -> Option<&T> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Raw JSON of an unresolved field
    pub fn as_unresolved(&self) -> Option<&Value> {
        match self {
            Field::Unresolved(raw) => Some(raw),
            _ => None,
        }
    }

    pub fn into_present(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Move the raw JSON out of an unresolved field, leaving `Missing` behind.
    /// Any other state is left untouched.
    pub fn take_unresolved(&mut self) -> Option<Value> {
        if !matches!(self, Field::Unresolved(_)) {
            return None;
        }
        match std::mem::replace(self, Field::Missing) {
            Field::Unresolved(raw) => Some(raw),
            _ => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(Field::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default)]
        nested: Field<u32>,
    }

    fn holder(json: Value) -> Field<u32> {
        serde_json::from_value::<Holder>(json).unwrap().nested
    }

    #[test]
    fn test_missing_key_and_null_are_missing() {
        assert_eq!(holder(json!({})), Field::Missing);
        assert_eq!(holder(json!({"nested": null})), Field::Missing);
    }

    #[test]
    fn test_empty_structures_are_empty() {
        assert_eq!(holder(json!({"nested": []})), Field::Empty);
        assert_eq!(holder(json!({"nested": {}})), Field::Empty);
    }

    #[test]
    fn test_other_values_are_unresolved() {
        assert_eq!(
            holder(json!({"nested": [{"a": 1}]})),
            Field::Unresolved(json!([{"a": 1}]))
        );
        assert_eq!(
            holder(json!({"nested": "scalar"})),
            Field::Unresolved(json!("scalar"))
        );
        // An empty string is a scalar, not an empty structure
        assert_eq!(holder(json!({"nested": ""})), Field::Unresolved(json!("")));
    }

    #[test]
    fn test_take_unresolved() {
        let mut field: Field<u32> = Field::Unresolved(json!({"a": 1}));
        assert_eq!(field.take_unresolved(), Some(json!({"a": 1})));
        assert!(field.is_missing());

        let mut field: Field<u32> = Field::Empty;
        assert_eq!(field.take_unresolved(), None);
        assert!(field.is_empty());

        let mut field = Field::Present(7u32);
        assert_eq!(field.take_unresolved(), None);
        assert_eq!(field.as_present(), Some(&7));
    }
}
