//! Opaque ordering keys built from JSON primitives.
//!
//! Sort keys and mutual-exclusion keys are lists of JSON primitive values
//! chosen freely by each scraper. This module gives them a total order so
//! courses and terms can be sorted deterministically.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::MaintainerError;

/// A single JSON primitive inside a [`Key`].
///
/// Values of different kinds order as null < booleans < numbers <
/// strings. Integers and floats compare numerically with each other; an
/// integer sorts just before a float of equal value so that ordering
/// stays consistent with equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum KeyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(Finite),
    String(String),
}

/// A float that is neither NaN nor infinite, so it has a JSON form.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Finite(f64);

impl Finite {
    pub fn new(value: f64) -> Result<Self, MaintainerError> {
        if !value.is_finite() {
            return Err(MaintainerError::invalid("key", value, "must be a finite number"));
        }
        Ok(Finite(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl KeyValue {
    /// Create a float value, rejecting NaN and infinities.
    pub fn float(value: f64) -> Result<Self, MaintainerError> {
        Finite::new(value).map(KeyValue::Float)
    }

    fn rank(&self) -> u8 {
        match self {
            KeyValue::Null => 0,
            KeyValue::Bool(_) => 1,
            KeyValue::Int(_) | KeyValue::Float(_) => 2,
            KeyValue::String(_) => 3,
        }
    }
}

impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyValue {}

impl Ord for KeyValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use KeyValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.0.total_cmp(&b.0),
            (Int(a), Float(b)) => (*a as f64).total_cmp(&b.0).then(Ordering::Less),
            (Float(a), Int(b)) => a.0.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (String(a), String(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for KeyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for KeyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            KeyValue::Null => {}
            KeyValue::Bool(b) => b.hash(state),
            KeyValue::Int(i) => i.hash(state),
            KeyValue::Float(f) => f.0.to_bits().hash(state),
            KeyValue::String(s) => s.hash(state),
        }
    }
}

impl TryFrom<Value> for KeyValue {
    type Error = MaintainerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(KeyValue::Null),
            Value::Bool(b) => Ok(KeyValue::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(KeyValue::Int(i)),
                None => n
                    .as_f64()
                    .ok_or_else(|| MaintainerError::invalid("key", &n, "unrepresentable number"))
                    .and_then(KeyValue::float),
            },
            Value::String(s) => Ok(KeyValue::String(s)),
            other @ (Value::Array(_) | Value::Object(_)) => Err(MaintainerError::invalid(
                "key",
                other,
                "elements must be JSON primitives",
            )),
        }
    }
}

impl From<KeyValue> for Value {
    fn from(value: KeyValue) -> Self {
        match value {
            KeyValue::Null => Value::Null,
            KeyValue::Bool(b) => Value::Bool(b),
            KeyValue::Int(i) => Value::Number(i.into()),
            KeyValue::Float(f) => Value::from(f.get()),
            KeyValue::String(s) => Value::String(s),
        }
    }
}

impl From<bool> for KeyValue {
    fn from(value: bool) -> Self {
        KeyValue::Bool(value)
    }
}

impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        KeyValue::Int(value)
    }
}

impl From<i32> for KeyValue {
    fn from(value: i32) -> Self {
        KeyValue::Int(value.into())
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        KeyValue::String(value.to_owned())
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        KeyValue::String(value)
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Null => f.write_str("null"),
            KeyValue::Bool(b) => write!(f, "{b}"),
            KeyValue::Int(i) => write!(f, "{i}"),
            KeyValue::Float(x) => write!(f, "{}", x.0),
            KeyValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// An ordered list of JSON primitives, compared lexicographically.
///
/// # Examples
///
/// ```
/// use hyperschedule::model::Key;
/// use serde_json::json;
///
/// let fall = Key::from_values(vec![json!(2024), json!("fall")]).unwrap();
/// let spring = Key::from_values(vec![json!(2025), json!("spring")]).unwrap();
/// assert!(fall < spring);
///
/// // Nested structures are not primitives.
/// assert!(Key::from_values(vec![json!([1, 2])]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(Vec<KeyValue>);

impl Key {
    pub fn new(values: Vec<KeyValue>) -> Self {
        Key(values)
    }

    /// Build a key from arbitrary JSON values, failing on non-primitives.
    pub fn from_values(values: Vec<Value>) -> Result<Self, MaintainerError> {
        values
            .into_iter()
            .map(KeyValue::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Key)
    }

    pub fn values(&self) -> &[KeyValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V: Into<KeyValue>> FromIterator<V> for Key {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Key(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_value() -> impl Strategy<Value = KeyValue> {
        prop_oneof![
            Just(KeyValue::Null),
            any::<bool>().prop_map(KeyValue::Bool),
            any::<i64>().prop_map(KeyValue::Int),
            (-1e9f64..1e9).prop_map(|x| KeyValue::float(x).unwrap()),
            "[a-z]{0,6}".prop_map(KeyValue::String),
        ]
    }

    proptest! {
        /// Ordering is antisymmetric
        #[test]
        fn antisymmetric(a in any_value(), b in any_value()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }

        /// Ordering is transitive
        #[test]
        fn transitive(a in any_value(), b in any_value(), c in any_value()) {
            if a <= b && b <= c {
                prop_assert!(a <= c);
            }
        }

        /// Keys survive a JSON roundtrip
        #[test]
        fn serde_roundtrip(values in proptest::collection::vec(any_value(), 0..6)) {
            let key = Key::new(values);
            let json = serde_json::to_string(&key).unwrap();
            prop_assert_eq!(serde_json::from_str::<Key>(&json).unwrap(), key);
        }
    }
}
