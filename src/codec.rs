//! Lenient readers and sentinel-aware writers for JSON objects.

use anyhow::{anyhow, Context};
use serde_json::{Map, Number, Value};

use crate::{time, JsonObject, TYPE_KEY};

type CodecResult<T> = anyhow::Result<T>;

/// Implement `Serialize`/`Deserialize` by going through [`JsonObject`].
macro_rules! json_serde {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serde::Serialize::serialize(&crate::JsonObject::to_json(self), serializer)
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let json = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                    <$ty as crate::JsonObject>::from_json(&json)
                        .map_err(|e| serde::de::Error::custom(format!("{:#}", e)))
                }
            }
        )+
    };
}

/// Treat an empty string the same as a missing one.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// `Some` only for a non-empty string.
pub(crate) fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Typed access to the members of one JSON object.
pub(crate) struct Reader<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Reader<'a> {
    pub fn new(json: &'a Value, what: &str) -> CodecResult<Self> {
        match json {
            Value::Object(map) => Ok(Self { map }),
            other => Err(anyhow!(
                "Expected a JSON object for {}, found {}",
                what,
                kind_of(other)
            )),
        }
    }

    pub fn type_name(&self) -> Option<&'a str> {
        self.map.get(TYPE_KEY).and_then(Value::as_str)
    }

    pub fn string(&self, key: &str) -> Option<String> {
        match self.map.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                log::trace!("Ignoring {} holding {}", key, kind_of(other));
                None
            }
            None => None,
        }
    }

    /// A string that is always expected; absent reads as empty.
    pub fn required_string(&self, key: &str) -> String {
        self.string(key).unwrap_or_default()
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.map.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(other) => {
                log::trace!("Ignoring {} holding {}", key, kind_of(other));
                None
            }
            None => None,
        }
    }

    /// A time string decoded to epoch seconds. A string that does not
    /// decode is an error, any other JSON type is ignored.
    pub fn time(&self, key: &str) -> CodecResult<Option<f64>> {
        match self.map.get(key) {
            Some(Value::String(s)) => time::iso8601_to_epoch(s)
                .map(Some)
                .with_context(|| format!("Invalid {} value", key)),
            _ => Ok(None),
        }
    }

    pub fn object<T: JsonObject>(&self, key: &str) -> CodecResult<Option<T>> {
        match self.map.get(key) {
            Some(value @ Value::Object(_)) => T::from_json(value)
                .map(Some)
                .with_context(|| format!("Invalid {} object", key)),
            _ => Ok(None),
        }
    }

    pub fn array(&self, key: &str) -> Option<&'a Vec<Value>> {
        self.map.get(key).and_then(Value::as_array)
    }
}

/// Builds one JSON object, leaving out absent values.
pub(crate) struct Writer {
    map: Map<String, Value>,
}

impl Writer {
    /// Start an object without a discriminator, as for leaf value objects.
    pub fn new() -> Self {
        Self { map: Map::new() }
    }

    /// Start an object whose first member is the discriminator.
    pub fn record(type_name: &str) -> Self {
        let mut writer = Self::new();
        writer.string(TYPE_KEY, type_name);
        writer
    }

    pub fn string(&mut self, key: &str, value: &str) -> &mut Self {
        self.map.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    pub fn opt_string(&mut self, key: &str, value: &Option<String>) -> &mut Self {
        if let Some(s) = present(value) {
            self.string(key, s);
        }
        self
    }

    /// NaN and infinities have no JSON form and are left out like `None`.
    pub fn number(&mut self, key: &str, value: Option<f64>) -> &mut Self {
        if let Some(n) = value.and_then(Number::from_f64) {
            self.map.insert(key.to_string(), Value::Number(n));
        }
        self
    }

    pub fn time(&mut self, key: &str, value: Option<f64>) -> &mut Self {
        let epoch = match value {
            Some(epoch) if !epoch.is_nan() => epoch,
            _ => return self,
        };
        match time::epoch_to_iso8601(epoch) {
            Ok(text) => {
                self.string(key, &text);
            }
            Err(e) => log::warn!("Leaving out {}: {}", key, e),
        }
        self
    }

    pub fn object<T: JsonObject>(&mut self, key: &str, value: &T) -> &mut Self {
        self.map.insert(key.to_string(), value.to_json());
        self
    }

    pub fn array(&mut self, key: &str, values: Vec<Value>) -> &mut Self {
        if !values.is_empty() {
            self.map.insert(key.to_string(), Value::Array(values));
        }
        self
    }

    pub fn finish(&mut self) -> Value {
        Value::Object(std::mem::take(&mut self.map))
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
