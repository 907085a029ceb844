//! Registry access behind a narrow trait
//!
//! Only the operations the toggle needs are exposed: reading a key's default
//! value, creating keys, writing a default string value and deleting subtrees.
//! Paths are relative to the current user's hive.

pub mod memory;

#[cfg(windows)]
pub mod hkcu;

pub use memory::MemoryRegistry;

#[cfg(windows)]
pub use hkcu::CurrentUserRegistry;

use crate::error::ToggleResult;

/// Content of a registry value as far as the toggle cares
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryValue {
    /// `REG_SZ` or `REG_EXPAND_SZ`, without the trailing NUL
    String(String),
    /// Any other value type
    Other,
}

pub trait RegistryStore {
    /// Default (unnamed) value of `path`; `None` when the key or the value is absent
    fn default_value(&self, path: &str) -> ToggleResult<Option<RegistryValue>>;

    /// Create `path` and any missing parents. Existing keys are left as they are.
    fn create_key(&mut self, path: &str) -> ToggleResult<()>;

    /// Write the default value of `path` as `REG_SZ`
    fn set_default_string(&mut self, path: &str, value: &str) -> ToggleResult<()>;

    /// Delete `path` with all of its subkeys. A missing key is not an error.
    fn delete_tree(&mut self, path: &str) -> ToggleResult<()>;
}

impl<T: RegistryStore + ?Sized> RegistryStore for &mut T {
    fn default_value(&self, path: &str) -> ToggleResult<Option<RegistryValue>> {
        (**self).default_value(path)
    }

    fn create_key(&mut self, path: &str) -> ToggleResult<()> {
        (**self).create_key(path)
    }

    fn set_default_string(&mut self, path: &str, value: &str) -> ToggleResult<()> {
        (**self).set_default_string(path, value)
    }

    fn delete_tree(&mut self, path: &str) -> ToggleResult<()> {
        (**self).delete_tree(path)
    }
}
