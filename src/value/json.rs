//! Serde support for [`Value`] and conversion to and from `serde_json::Value`.
//!
//! Mapping keys are written as strings. Functions cannot be serialized.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};

use crate::error::Error;
use crate::value::{Key, Mapping, Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Int(integer) => serializer.serialize_i64(*integer),
            Self::Float(float) => serializer.serialize_f64(*float),
            Self::Str(string) => serializer.serialize_str(string),
            Self::Seq(items) => serializer.collect_seq(items.iter()),
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries.iter() {
                    map.serialize_entry(&key.to_string(), value)?;
                }
                map.end()
            }
            Self::Function(function) => Err(S::Error::custom(format!(
                "function `{}` cannot be serialized",
                function.name()
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Self::Int)
                .or_else(|| number.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(string) => Self::Str(string),
            serde_json::Value::Array(items) => items.into_iter().map(Self::from).collect(),
            serde_json::Value::Object(entries) => entries
                .into_iter()
                .map(|(key, value)| (Key::Str(key), Self::from(value)))
                .collect::<Mapping>()
                .into(),
        }
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Int(integer) => Self::from(integer),
            Value::Float(float) => {
                serde_json::Number::from_f64(float).map_or(Self::Null, Self::Number)
            }
            Value::Str(string) => Self::String(string),
            Value::Seq(items) => Self::Array(
                items
                    .iter()
                    .cloned()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Map(entries) => Self::Object(
                entries
                    .iter()
                    .map(|(key, value)| Ok((key.to_string(), Self::try_from(value.clone())?)))
                    .collect::<Result<_, Error>>()?,
            ),
            Value::Function(_) => {
                return Err(Error::mismatch(
                    "to_json",
                    "a JSON-compatible value",
                    "a function",
                ));
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{map, seq};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn json_objects_keep_key_order() {
        let value = Value::from(json!({"b": 1, "a": [true, null, 2.5]}));
        assert_eq!(value.to_string(), r#"{"b": 1, "a": [true, null, 2.5]}"#);
    }

    #[rstest]
    fn integer_keys_serialize_as_strings() {
        let value = map! { 1 => seq!["x"] };
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"1":["x"]}"#);
    }

    #[rstest]
    fn deserializes_through_serde_json() {
        let value: Value = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(value, map! { "id" => 7 });
    }
}
