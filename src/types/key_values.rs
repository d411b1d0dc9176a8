use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Inventory data merged from all generators.
///
/// Keys are kept sorted. Every key maps to one or more values, in the order
/// they were reported; repeated values are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyValuesMap {
    entries: BTreeMap<String, Vec<String>>,
}

/// A single inventory attribute in upload form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

/// Single-valued keys are sent as a plain string, multi-valued ones as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(String),
    Multiple(Vec<String>),
}

impl KeyValuesMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.entries.iter()
    }

    /// Append `value` to the values of `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    pub fn extend_from(&mut self, other: KeyValuesMap) {
        for (key, values) in other.entries {
            self.entries.entry(key).or_default().extend(values);
        }
    }

    pub fn to_attributes(&self) -> Vec<Attribute> {
        self.entries
            .iter()
            .map(|(name, values)| Attribute {
                name: name.clone(),
                value: match values.as_slice() {
                    [single] => AttributeValue::Single(single.clone()),
                    _ => AttributeValue::Multiple(values.clone()),
                },
            })
            .collect()
    }

    /// SHA-256 of the attributes payload, hex encoded.
    ///
    /// Equal maps always hash the same since keys are sorted.
    pub fn checksum(&self) -> Result<String, serde_json::Error> {
        let payload = serde_json::to_vec(&self.to_attributes())?;
        Ok(format!("{:x}", Sha256::digest(&payload)))
    }
}

impl<'a> IntoIterator for &'a KeyValuesMap {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for KeyValuesMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = KeyValuesMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
