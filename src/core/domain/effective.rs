//! The application tier's effective environment configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A flat, string-keyed runtime configuration.
///
/// Keys are kept sorted so the serialized form is identical for identical
/// content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectiveConfig {
    entries: BTreeMap<String, String>,
}

impl EffectiveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert a value unless the key is already set.
    ///
    /// Returns `false` when an existing value was kept.
    pub fn insert_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        use std::collections::btree_map::Entry;

        match self.entries.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialized form written to the store.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_absent_keeps_first_value() {
        let mut config = EffectiveConfig::new();
        assert!(config.insert_absent("vault.addr", "https://a"));
        assert!(!config.insert_absent("vault.addr", "https://b"));
        assert_eq!(config.get("vault.addr"), Some("https://a"));
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn test_to_bytes_sorted() {
        let mut config = EffectiveConfig::new();
        config.insert_absent("b", "2");
        config.insert_absent("a", "1");
        let text = String::from_utf8(config.to_bytes().unwrap()).unwrap();
        assert!(text.find("\"a\"").unwrap() < text.find("\"b\"").unwrap());
    }
}
