//! Successful command responses.

use serde::Serialize;
use serde_json::{Map, Value};

/// Body of a successful response. `status: "ok"` is added on output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandResponse {
    fields: Map<String, Value>,
}

impl CommandResponse {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Insert any serializable value. Falls back to `null` if it cannot be encoded.
    pub fn with_serialized<T: Serialize>(self, key: impl Into<String>, value: &T) -> Self {
        let encoded = serde_json::to_value(value).unwrap_or(Value::Null);
        self.with(key, encoded)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn into_value(self) -> Value {
        let mut fields = self.fields;
        fields.insert("status".to_string(), Value::String("ok".to_string()));
        Value::Object(fields)
    }
}
