//! Placeholder values supplied at formatting time.

use crate::error::{PromptError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::str::FromStr;

/// Mapping of placeholder name to value, in insertion order.
///
/// Values are always strings; inserting an existing name replaces its value
/// in place. Names that no template references are ignored when composing.
///
/// # Examples
///
/// ```
/// use promptchat_pm::PromptValues;
///
/// let values = PromptValues::new()
///     .with("tipo_coches", "japoneses")
///     .with("tiempo_lectura", "10 min");
/// assert_eq!(values.get("tipo_coches"), Some("japoneses"));
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptValues {
    entries: Vec<(String, String)>,
}

impl PromptValues {
    /// Creates an empty set of values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a value, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Looks up the value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a value is present for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of supplied values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no values are supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Applies every value of `other` on top of `self`.
    pub fn merge(&mut self, other: PromptValues) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }

    /// Parses a list of `name=value` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidValue`] for a pair without `=` or with an
    /// empty name.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| PromptError::InvalidValue(pair.to_string()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(PromptError::InvalidValue(pair.to_string()));
            }
            values.insert(name, value);
        }
        Ok(values)
    }
}

impl FromStr for PromptValues {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_pairs([s])
    }
}

impl<K, V> FromIterator<(K, V)> for PromptValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut values = Self::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

impl Serialize for PromptValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
