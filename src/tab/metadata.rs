//! Extension-owned tab metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// Opaque key/value annotations attached to one tab. No schema is enforced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TabMetadata(HashMap<String, Value>);

impl TabMetadata {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Merge `values` key by key; a repeated key overwrites only that key.
    pub fn merge<I, K>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in values {
            self.0.insert(key.into(), value);
        }
    }
}

impl From<HashMap<String, Value>> for TabMetadata {
    fn from(value: HashMap<String, Value>) -> Self {
        Self(value)
    }
}

impl FromIterator<(String, Value)> for TabMetadata {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Deref for TabMetadata {
    type Target = HashMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for TabMetadata {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a TabMetadata {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
