// src/types/claims.rs
//! The claims of a token payload.
//!
//! [`Claims`] is either *uninitialized* (no storage) or *initialized*. Reads on
//! an uninitialized instance find nothing and writes are no-ops that never
//! allocate. Only [`Claims::new`] and JSON decoding create storage.
use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ClaimsError;
use crate::types::coerce;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims {
    inner: Option<Map<String, Value>>,
}

impl Claims {
    /// Returns an empty, initialized set of claims.
    pub fn new() -> Self {
        Claims {
            inner: Some(Map::new()),
        }
    }

    /// Returns claims without storage. They stay empty until decoded into.
    pub const fn uninitialized() -> Self {
        Claims { inner: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, Map::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.as_ref()?.get(key)
    }

    /// Sets a value and returns the one it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let entries = self.inner.as_mut()?;
        entries.insert(key.into(), value.into())
    }

    /// Removes a value and returns it.
    pub fn delete(&mut self, key: &str) -> Option<Value> {
        self.inner.as_mut()?.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.inner.iter().flat_map(|entries| entries.iter())
    }

    /// Retrieves a value as string. Non-string values are rendered as their
    /// JSON text.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(coerce::to_string)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(coerce::to_int)
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(coerce::to_float)
    }

    /// Retrieves a time. Numbers are epoch seconds, strings RFC 3339.
    pub fn get_time(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get(key).and_then(coerce::to_time)
    }

    /// Stores a time as epoch seconds, dropping sub-second precision and zone.
    pub fn set_time<Tz: TimeZone>(&mut self, key: &str, t: DateTime<Tz>) -> Option<DateTime<Utc>> {
        let old = self.get_time(key);
        self.set(key, t.timestamp());
        old
    }

    /// Serializes the claims. Empty or uninitialized claims become `{}`.
    pub fn to_json(&self) -> Result<Vec<u8>, ClaimsError> {
        serde_json::to_vec(self).map_err(ClaimsError::JsonMarshalling)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, ClaimsError> {
        let mut claims = Claims::uninitialized();
        claims.merge_json(bytes)?;
        Ok(claims)
    }

    /// Decodes a JSON object and merges its entries into these claims,
    /// creating storage if needed. Empty input and `null` change nothing.
    pub fn merge_json(&mut self, bytes: &[u8]) -> Result<(), ClaimsError> {
        if bytes.is_empty() {
            return Ok(());
        }
        let decoded: Option<Map<String, Value>> =
            serde_json::from_slice(bytes).map_err(ClaimsError::JsonUnmarshalling)?;
        if let Some(entries) = decoded {
            debug!(count = entries.len(), "merging decoded claims");
            self.inner.get_or_insert_with(Map::new).extend(entries);
        }
        Ok(())
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(entries: Map<String, Value>) -> Self {
        Claims {
            inner: Some(entries),
        }
    }
}

impl Serialize for Claims {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.inner {
            Some(entries) if !entries.is_empty() => entries.serialize(serializer),
            _ => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

impl<'de> Deserialize<'de> for Claims {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let inner = Option::<Map<String, Value>>::deserialize(deserializer)?;
        Ok(Claims { inner })
    }
}

impl fmt::Display for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
