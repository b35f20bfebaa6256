//! Precedence merge of configuration sources.
//!
//! System-derived layers are applied highest precedence first and a key
//! keeps the first value it receives. Operator overrides come last and may
//! only add keys; an override naming a system key is dropped and reported.

use std::collections::BTreeMap;

use crate::core::domain::EffectiveConfig;

/// One system-derived source of configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    pub source: &'static str,
    pub entries: Vec<(&'static str, String)>,
}

impl ConfigLayer {
    pub fn new(source: &'static str) -> Self {
        Self {
            source,
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.entries.push((key, value.into()));
        self
    }
}

/// An override that named a system-derived key and was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideConflict {
    pub key: String,
    /// Layer that set the system value.
    pub layer: &'static str,
}

impl std::fmt::Display for OverrideConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ignoring additional property that would override system configured property: {}",
            self.key
        )
    }
}

/// Merged configuration plus the overrides that were ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    pub config: EffectiveConfig,
    pub conflicts: Vec<OverrideConflict>,
}

/// Merge system layers (highest precedence first) and operator overrides.
pub fn merge<I>(layers: I, overrides: &BTreeMap<String, String>) -> Merged
where
    I: IntoIterator<Item = ConfigLayer>,
{
    let mut config = EffectiveConfig::new();
    let mut owners: BTreeMap<&'static str, &'static str> = BTreeMap::new();
    for layer in layers {
        for (key, value) in layer.entries {
            if config.insert_absent(key, value) {
                owners.insert(key, layer.source);
            }
        }
    }

    let mut conflicts = Vec::new();
    for (key, value) in overrides {
        if !config.insert_absent(key.as_str(), value.as_str()) {
            conflicts.push(OverrideConflict {
                key: key.clone(),
                layer: owners.get(key.as_str()).copied().unwrap_or("system"),
            });
        }
    }

    Merged { config, conflicts }
}
