//! Resource state and identity record capabilities.
//!
//! Both stores are owned by the host for the duration of one operation. The
//! core reads and writes through these traits and keeps no reference after
//! the call returns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::StoreError;

/// Get/set access to named attributes.
pub trait AttributeStore {
    /// Returns the attribute's value, or `None` if it is absent.
    fn get(&self, name: &str) -> Option<Value>;

    /// Writes an attribute.
    fn set(&mut self, name: &str, value: Value) -> Result<(), StoreError>;
}

/// Attribute store for one resource instance, plus its primary identifier.
pub trait ResourceState: AttributeStore {
    /// The primary identifier, empty when unset.
    fn id(&self) -> &str;

    /// Replaces the primary identifier.
    fn set_id(&mut self, id: &str);
}

/// In-memory resource state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateMap {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl StateMap {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the primary identifier, builder style.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns a string attribute, `None` if absent or not a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }
}

impl AttributeStore for StateMap {
    fn get(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), StoreError> {
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }
}

impl ResourceState for StateMap {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

/// In-memory identity record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityMap(BTreeMap<String, Value>);

impl IdentityMap {
    /// Creates an empty identity record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Returns a string attribute, `None` if absent or not a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the record holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for IdentityMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AttributeStore for IdentityMap {
    fn get(&self, name: &str) -> Option<Value> {
        self.0.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), StoreError> {
        self.0.insert(name.to_string(), value);
        Ok(())
    }
}
