//! The flat attribute bag.
//!
//! A bag maps dotted, index-qualified paths (`transformations.0.crop.width`)
//! to leaf values. Keys are kept sorted, so everything under a path prefix
//! is one contiguous range.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A leaf value in the bag.
///
/// Decoders read every leaf through its text form, so a host that hands
/// back `"2"` or `2` for an integer slot is treated the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FlatValue {
    /// The text form of the value.
    pub fn to_text(&self) -> String {
        match self {
            FlatValue::Bool(b) => b.to_string(),
            FlatValue::Int(i) => i.to_string(),
            FlatValue::Float(f) => f.to_string(),
            FlatValue::Text(s) => s.clone(),
        }
    }

    /// Whether this is the empty text, which counts as unset.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, FlatValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for FlatValue {
    fn from(s: &str) -> Self {
        FlatValue::Text(s.to_string())
    }
}

impl From<String> for FlatValue {
    fn from(s: String) -> Self {
        FlatValue::Text(s)
    }
}

impl From<i64> for FlatValue {
    fn from(i: i64) -> Self {
        FlatValue::Int(i)
    }
}

impl From<f64> for FlatValue {
    fn from(f: f64) -> Self {
        FlatValue::Float(f)
    }
}

impl From<bool> for FlatValue {
    fn from(b: bool) -> Self {
        FlatValue::Bool(b)
    }
}

/// A path-keyed flat attribute bag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatBag {
    entries: BTreeMap<String, FlatValue>,
}

impl FlatBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<FlatValue>) {
        self.entries.insert(path.into(), value.into());
    }

    pub fn get(&self, path: &str) -> Option<&FlatValue> {
        self.entries.get(path)
    }

    pub fn remove(&mut self, path: &str) -> Option<FlatValue> {
        self.entries.remove(path)
    }

    /// The text at `path`, or `None` when unset or empty.
    pub fn text(&self, path: &str) -> Option<String> {
        self.entries
            .get(path)
            .map(FlatValue::to_text)
            .filter(|s| !s.is_empty())
    }

    /// Whether `path` is populated: it holds an entry itself (such as the
    /// empty marker of a fieldless record) or has a non-empty entry below.
    ///
    /// Empty text below `path`, like an unset `_var` sibling, does not count.
    pub fn is_populated(&self, path: &str) -> bool {
        self.entries.contains_key(path) || self.first_populated_key_under(path).is_some()
    }

    /// The smallest key strictly below `path` holding a non-empty value.
    pub fn first_populated_key_under(&self, path: &str) -> Option<&str> {
        let dotted = format!("{path}.");
        self.entries
            .range(dotted.clone()..)
            .take_while(|(k, _)| k.starts_with(&dotted))
            .find(|(_, v)| !v.is_empty_text())
            .map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlatValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<FlatValue>> FromIterator<(K, V)> for FlatBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = FlatBag::new();
        for (k, v) in iter {
            bag.insert(k, v);
        }
        bag
    }
}

impl IntoIterator for FlatBag {
    type Item = (String, FlatValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FlatValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Join a path prefix and a segment.
pub(crate) fn join(prefix: &str, segment: impl fmt::Display) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}
