//! In-process registry used to drive the toggle and the session loop without Windows

use super::{RegistryStore, RegistryValue};
use crate::error::{RegistryOp, ToggleError, ToggleResult};
use std::collections::{BTreeMap, BTreeSet};
use std::io;

/// Case-insensitive key tree keyed by backslash-separated paths
#[derive(Debug, Default, Clone)]
pub struct MemoryRegistry {
    keys: BTreeMap<String, Option<RegistryValue>>,
    denied: BTreeSet<String>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse creation of `path` with a permission error, as a locked-down hive would
    pub fn deny_create(&mut self, path: &str) {
        self.denied.insert(normalize(path));
    }

    /// Seed a key with an arbitrary default value
    pub fn insert(&mut self, path: &str, value: Option<RegistryValue>) {
        self.create_parents(path);
        self.keys.insert(normalize(path), value);
    }

    pub fn contains_key(&self, path: &str) -> bool {
        self.keys.contains_key(&normalize(path))
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys currently present, lower-cased
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    fn create_parents(&mut self, path: &str) {
        let path = normalize(path);
        let mut end = 0;
        while let Some(offset) = path[end..].find('\\') {
            end += offset;
            self.keys.entry(path[..end].to_string()).or_insert(None);
            end += 1;
        }
    }
}

impl RegistryStore for MemoryRegistry {
    fn default_value(&self, path: &str) -> ToggleResult<Option<RegistryValue>> {
        Ok(self.keys.get(&normalize(path)).cloned().flatten())
    }

    fn create_key(&mut self, path: &str) -> ToggleResult<()> {
        let key = normalize(path);
        if self.denied.contains(&key) {
            return Err(ToggleError::key_creation(
                path,
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }

        self.create_parents(path);
        self.keys.entry(key).or_insert(None);
        Ok(())
    }

    fn set_default_string(&mut self, path: &str, value: &str) -> ToggleResult<()> {
        match self.keys.get_mut(&normalize(path)) {
            Some(slot) => {
                *slot = Some(RegistryValue::String(value.to_string()));
                Ok(())
            }
            None => Err(ToggleError::registry(
                RegistryOp::Write,
                path,
                io::Error::from(io::ErrorKind::NotFound),
            )),
        }
    }

    fn delete_tree(&mut self, path: &str) -> ToggleResult<()> {
        let key = normalize(path);
        let prefix = format!("{}\\", key);
        self.keys
            .retain(|existing, _| existing != &key && !existing.starts_with(&prefix));
        Ok(())
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('\\').to_ascii_lowercase()
}
