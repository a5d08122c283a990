//! value representation
//!
//! The output model for every document this crate writes. It contains the
//! following data types
//! - boolean (true/false)
//! - integer (signed, currently: i64 - may change)
//! - decimal (currently: f64 - may change)
//! - string (utf-8)
//! - array ("list" of values)
//! - object (order-preserving "map"/"dictionary", where the key is of type string)
//!
//! Additionally:
//! - there is no `null`/`None` value. JSON nulls are dropped at the boundary
//!   by [Value::from_json] - a null terraform output is "no data", never an
//!   emitted value.
//! - object iteration (and thus serialization) order is insertion order, so
//!   rendered documents diff cleanly across runs.
//!
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serializer,
};

/// All possible value types
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    String(String),
    Array(Vec<Value>),
    Object(indexmap::IndexMap<String, Value>),
}

impl Value {
    /// Convert a JSON payload into the output model.
    ///
    /// Returns [None] for `null`. Object entries and array elements with
    /// null payloads are dropped recursively, so the resulting tree never
    /// carries an "empty" marker into a rendered document.
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        use serde_json::Value as Json;

        match json {
            Json::Null => None,
            Json::Bool(bool) => Some((*bool).into()),
            Json::Number(num) => {
                if let Some(int) = num.as_i64() {
                    return Some(Value::Integer(int));
                }

                num.as_f64().map(Value::Decimal)
            }
            Json::String(s) => Some(s.as_str().into()),
            Json::Array(array) => Some(Value::Array(
                array.iter().filter_map(Value::from_json).collect(),
            )),
            Json::Object(object) => Some(Value::Object(
                object
                    .iter()
                    .filter_map(|(key, value)| {
                        Value::from_json(value).map(|value| (key.clone(), value))
                    })
                    .collect(),
            )),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<indexmap::IndexMap<String, V>> for Value {
    fn from(value: indexmap::IndexMap<String, V>) -> Self {
        Value::Object(value.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl serde::ser::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Boolean(value) => serializer.serialize_bool(*value),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Decimal(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Array(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Value::Object(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
        }
    }
}
