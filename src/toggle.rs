//! Reading and flipping the "Show more options" override
//!
//! Explorer consults `InprocServer32` under [`CLSID`](crate::constants::CLSID)
//! when it builds a context menu. An empty default value there makes it fall
//! back to the classic full menu; removing the keys restores the Windows 11 menu.

use crate::constants::{CLSID_PATH, INPROC_PATH};
use crate::error::ToggleResult;
use crate::registry::{RegistryStore, RegistryValue};
use tracing::debug;

/// Whether the classic menu override is active ("Show more options" disabled)
///
/// Only an empty string counts. A non-empty or non-string default value left
/// behind by other software reads as inactive.
pub fn is_show_more_options_disabled(store: &impl RegistryStore) -> ToggleResult<bool> {
    let value = store.default_value(INPROC_PATH)?;
    Ok(matches!(value, Some(RegistryValue::String(ref s)) if s.is_empty()))
}

/// Force the classic full context menu
pub fn disable_show_more_options(store: &mut impl RegistryStore) -> ToggleResult<()> {
    store.create_key(CLSID_PATH)?;
    store.create_key(INPROC_PATH)?;
    store.set_default_string(INPROC_PATH, "")?;
    debug!(path = INPROC_PATH, "classic context menu override written");
    Ok(())
}

/// Restore the Windows 11 default context menu
pub fn enable_show_more_options(store: &mut impl RegistryStore) -> ToggleResult<()> {
    store.delete_tree(INPROC_PATH)?;
    store.delete_tree(CLSID_PATH)?;
    debug!(path = CLSID_PATH, "classic context menu override removed");
    Ok(())
}
