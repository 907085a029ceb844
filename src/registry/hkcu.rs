//! `HKEY_CURRENT_USER` backend

use super::{RegistryStore, RegistryValue};
use crate::error::{RegistryOp, ToggleError, ToggleResult};
use crate::win32::{os_error, to_wide};
use std::ffi::c_void;
use std::ptr;
use windows::core::PCWSTR;
use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_SUCCESS};
use windows::Win32::System::Registry::{
    RegCloseKey, RegCreateKeyExW, RegDeleteTreeW, RegGetValueW, RegSetValueExW, HKEY,
    HKEY_CURRENT_USER, KEY_READ, KEY_WRITE, REG_EXPAND_SZ, REG_OPTION_NON_VOLATILE, REG_SZ,
    REG_VALUE_TYPE, RRF_RT_ANY,
};

/// Registry rooted at the current user's hive
#[derive(Debug, Default)]
pub struct CurrentUserRegistry;

impl CurrentUserRegistry {
    pub fn new() -> Self {
        Self
    }
}

/// Open key handle, closed on drop
struct OwnedKey(HKEY);

impl OwnedKey {
    fn create(path: &str) -> ToggleResult<Self> {
        let subkey = to_wide(path);
        let mut key = HKEY::default();
        let status = unsafe {
            RegCreateKeyExW(
                HKEY_CURRENT_USER,
                PCWSTR(subkey.as_ptr()),
                0,
                PCWSTR::null(),
                REG_OPTION_NON_VOLATILE,
                KEY_READ | KEY_WRITE,
                None,
                &mut key,
                None,
            )
        };
        if status != ERROR_SUCCESS {
            return Err(ToggleError::key_creation(path, os_error(status)));
        }
        Ok(Self(key))
    }
}

impl Drop for OwnedKey {
    fn drop(&mut self) {
        unsafe {
            let _ = RegCloseKey(self.0);
        }
    }
}

impl RegistryStore for CurrentUserRegistry {
    fn default_value(&self, path: &str) -> ToggleResult<Option<RegistryValue>> {
        let subkey = to_wide(path);
        let mut kind = REG_VALUE_TYPE::default();
        let mut size: u32 = 0;

        // First call only sizes the value
        let status = unsafe {
            RegGetValueW(
                HKEY_CURRENT_USER,
                PCWSTR(subkey.as_ptr()),
                PCWSTR::null(),
                RRF_RT_ANY,
                Some(ptr::addr_of_mut!(kind)),
                None,
                Some(ptr::addr_of_mut!(size)),
            )
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        if status != ERROR_SUCCESS {
            return Err(ToggleError::registry(RegistryOp::Read, path, os_error(status)));
        }
        if kind != REG_SZ && kind != REG_EXPAND_SZ {
            return Ok(Some(RegistryValue::Other));
        }

        let mut buffer = vec![0u16; (size as usize).div_ceil(2).max(1)];
        let mut size = (buffer.len() * 2) as u32;
        let status = unsafe {
            RegGetValueW(
                HKEY_CURRENT_USER,
                PCWSTR(subkey.as_ptr()),
                PCWSTR::null(),
                RRF_RT_ANY,
                None,
                Some(buffer.as_mut_ptr() as *mut c_void),
                Some(ptr::addr_of_mut!(size)),
            )
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        if status != ERROR_SUCCESS {
            return Err(ToggleError::registry(RegistryOp::Read, path, os_error(status)));
        }

        buffer.truncate(size as usize / 2);
        while buffer.last() == Some(&0) {
            buffer.pop();
        }
        Ok(Some(RegistryValue::String(String::from_utf16_lossy(&buffer))))
    }

    fn create_key(&mut self, path: &str) -> ToggleResult<()> {
        OwnedKey::create(path).map(drop)
    }

    fn set_default_string(&mut self, path: &str, value: &str) -> ToggleResult<()> {
        let key = OwnedKey::create(path).map_err(ToggleError::into_write_failure)?;
        let data: Vec<u8> = to_wide(value)
            .into_iter()
            .flat_map(u16::to_le_bytes)
            .collect();

        let status = unsafe { RegSetValueExW(key.0, PCWSTR::null(), 0, REG_SZ, Some(&data)) };
        if status != ERROR_SUCCESS {
            return Err(ToggleError::registry(RegistryOp::Write, path, os_error(status)));
        }
        Ok(())
    }

    fn delete_tree(&mut self, path: &str) -> ToggleResult<()> {
        let subkey = to_wide(path);
        let status = unsafe { RegDeleteTreeW(HKEY_CURRENT_USER, PCWSTR(subkey.as_ptr())) };
        if status == ERROR_SUCCESS || status == ERROR_FILE_NOT_FOUND {
            return Ok(());
        }
        Err(ToggleError::registry(RegistryOp::Delete, path, os_error(status)))
    }
}
