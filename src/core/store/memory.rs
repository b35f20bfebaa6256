//! In-process store.
//!
//! Backs the test suites. Every `put` is recorded so callers can assert
//! how many writes an operation made.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{layout, ConfigStore};
use crate::core::domain::{SecretName, StackKind, StackRecord};
use crate::error::Result;

/// Store that keeps every object in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RefCell<BTreeMap<String, String>>,
    puts: RefCell<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stack's outputs.
    pub fn with_outputs(self, stack: StackKind, record: &StackRecord) -> Self {
        self.seed(layout::stack_outputs(stack), record);
        self
    }

    /// Seed a stack's parameters.
    pub fn with_parameters(self, stack: StackKind, record: &StackRecord) -> Self {
        self.seed(layout::stack_parameters(stack), record);
        self
    }

    /// Seed a secret.
    pub fn with_secret(self, name: SecretName, value: &str) -> Self {
        self.objects
            .borrow_mut()
            .insert(layout::secret(name), value.to_string());
        self
    }

    fn seed(&self, key: String, record: &StackRecord) {
        let text = serde_json::to_string(record).unwrap_or_default();
        self.objects.borrow_mut().insert(key, text);
    }

    /// Number of `put` calls made so far.
    pub fn put_count(&self) -> usize {
        self.puts.borrow().len()
    }

    /// Keys written by `put`, in order.
    pub fn written_keys(&self) -> Vec<String> {
        self.puts.borrow().clone()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.objects.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.puts.borrow_mut().push(key.to_string());
        self.objects
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
