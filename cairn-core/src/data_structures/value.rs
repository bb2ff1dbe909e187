//! Storable values and their runtime kinds.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Runtime kind of a [`Value`].
///
/// Comparators dispatch on the kind first: values of different kinds are
/// never equal. `Int` and `Float` share the `Number` kind.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    Text,
    Object,
    List,
}

impl ValueKind {
    /// Containers cannot be stored under the default item policy.
    pub fn is_container(self) -> bool {
        matches!(self, ValueKind::List)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Number => "number",
            ValueKind::Text => "string",
            ValueKind::Object => "object",
            ValueKind::List => "array",
        };
        f.write_str(name)
    }
}

/// A value held by a collection.
///
/// `List` exists so that nested containers coming in through conversions can
/// be represented and then rejected by [`ItemPolicy::ScalarsOnly`].
///
/// [`ItemPolicy::ScalarsOnly`]: crate::data_structures::ItemPolicy::ScalarsOnly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Object(ObjectRef),
    List(Vec<Value>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) | Value::Float(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
            Value::Object(_) => ValueKind::Object,
            Value::List(_) => ValueKind::List,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// First NaN or infinite float in this value, searching lists and object
    /// fields too.
    pub fn non_finite(&self) -> Option<f64> {
        match self {
            Value::Float(value) if !value.is_finite() => Some(*value),
            Value::Int(_) | Value::Float(_) | Value::Text(_) => None,
            Value::List(items) => items.iter().find_map(Value::non_finite),
            Value::Object(object) => object.fields().find_map(|(_, value)| value.non_finite()),
        }
    }

    /// String form of a scalar, `None` for objects and lists.
    ///
    /// Integral floats print without a fraction, so `Float(1.0)` and `Int(1)`
    /// share the form `"1"`.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            Value::Int(value) => Some(value.to_string()),
            Value::Float(value) => Some(float_string(*value)),
            Value::Text(text) => Some(text.clone()),
            Value::Object(_) | Value::List(_) => None,
        }
    }
}

fn float_string(value: f64) -> String {
    if value.is_nan() {
        "NAN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scalar_string() {
            Some(text) => f.write_str(&text),
            None => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

/// Saturates at `i64::MAX`.
impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}

impl From<&ObjectRef> for Value {
    fn from(value: &ObjectRef) -> Self {
        Value::Object(value.clone())
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// ObjectRef - shared object reference
// ============================================================================

/// A shared, immutable record of named fields.
///
/// Collections store objects by reference: cloning an `ObjectRef` (or a
/// collection holding one) shares the same record. [`ObjectRef::ptr_eq`] is
/// the identity used by `contains`.
///
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectRef(Rc<IndexMap<String, Value>>);

impl ObjectRef {
    pub fn new<I, N, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<Value>,
    {
        ObjectRef(Rc::new(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        ))
    }

    /// An object without fields. Each call allocates a distinct identity.
    pub fn empty() -> Self {
        ObjectRef::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if both references point at the same record.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_found_in_nested_values() {
        assert_eq!(Value::from(1.5).non_finite(), None);
        assert!(Value::from(f64::NAN).non_finite().is_some_and(f64::is_nan));
        assert_eq!(
            Value::from(vec![Value::from(1), Value::from(f64::NEG_INFINITY)]).non_finite(),
            Some(f64::NEG_INFINITY)
        );
        let record = ObjectRef::new([("x", f64::INFINITY)]);
        assert_eq!(Value::from(record).non_finite(), Some(f64::INFINITY));
    }

    #[test]
    fn test_usize_saturates() {
        assert_eq!(Value::from(7usize), Value::Int(7));
        assert_eq!(Value::from(usize::MAX), Value::Int(i64::MAX));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Value::from(1).kind(), ValueKind::Number);
        assert_eq!(Value::from(1.5).kind(), ValueKind::Number);
        assert_eq!(Value::from("a").kind(), ValueKind::Text);
        assert_eq!(Value::from(ObjectRef::empty()).kind(), ValueKind::Object);
        assert_eq!(Value::from(vec![1, 2]).kind(), ValueKind::List);
        assert!(ValueKind::List.is_container());
        assert!(!ValueKind::Object.is_container());
    }

    #[test]
    fn test_scalar_string() {
        assert_eq!(Value::from(1.0).scalar_string().as_deref(), Some("1"));
        assert_eq!(Value::from(-2.5).scalar_string().as_deref(), Some("-2.5"));
        assert_eq!(Value::from(f64::NAN).scalar_string().as_deref(), Some("NAN"));
        assert_eq!(Value::from(42).scalar_string().as_deref(), Some("42"));
        assert_eq!(Value::from(ObjectRef::empty()).scalar_string(), None);
    }

    #[test]
    fn test_object_identity() {
        let first = ObjectRef::empty();
        let second = ObjectRef::empty();
        let shared = first.clone();

        assert!(first.ptr_eq(&shared));
        assert!(!first.ptr_eq(&second));
        // Structural equality still holds for distinct empty records.
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_shapes() {
        let object = ObjectRef::new([("foo", "a")]);
        let json = serde_json::to_string(&Value::from(object)).unwrap();
        assert_eq!(json, r#"{"foo":"a"}"#);

        let parsed: Value = serde_json::from_str("[1, 2.5, \"x\", {\"k\": 3}]").unwrap();
        let Value::List(items) = parsed else {
            panic!("expected a list");
        };
        assert_eq!(items[0], Value::Int(1));
        assert_eq!(items[1], Value::Float(2.5));
        assert_eq!(items[2], Value::from("x"));
        assert_eq!(items[3].as_object().and_then(|o| o.get("k")), Some(&Value::Int(3)));
    }
}
