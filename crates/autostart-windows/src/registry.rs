//! Registry access for the Run keys and StartupApproved lists.
//!
//! Every `KeyLocation` names its hive and view explicitly, so the 32-bit
//! and 64-bit Run keys resolve to the same place whatever the bitness of
//! this process. Handles are closed when dropped.

use autostart_core::store::{KeyHandle, KeyStore, Value};
use autostart_core::{Error, Hive, KeyLocation, RegistryView, Result};
use windows::Win32::Foundation::{
    ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_NO_MORE_ITEMS, WIN32_ERROR,
};
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_WOW64_32KEY, KEY_WOW64_64KEY,
    KEY_WRITE, REG_BINARY, REG_EXPAND_SZ, REG_OPTION_NON_VOLATILE, REG_SAM_FLAGS, REG_SZ,
    REG_VALUE_TYPE, RegCloseKey, RegCreateKeyExW, RegDeleteValueW, RegEnumValueW, RegOpenKeyExW,
    RegQueryValueExW, RegSetValueExW,
};
use windows::core::{PCWSTR, PWSTR};

use crate::wide::{from_wide, to_wide};

/// Longest value name the registry accepts, terminator included.
const MAX_VALUE_NAME: usize = 16_384;

/// [`KeyStore`] over the live Windows registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryStore;

impl KeyStore for RegistryStore {
    fn open_readable(&self, location: &KeyLocation) -> Result<Option<Box<dyn KeyHandle + '_>>> {
        let wide_path = to_wide(&location.path);
        let mut key = HKEY::default();
        // SAFETY: RegOpenKeyExW is a standard Win32 registry API. The path
        // buffer outlives the call and the handle is closed on drop.
        let status = unsafe {
            RegOpenKeyExW(
                root(location.hive),
                PCWSTR(wide_path.as_ptr()),
                None,
                KEY_READ | view_flags(location.view),
                &mut key,
            )
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        check(status, location)?;
        Ok(Some(Box::new(RegistryKey {
            key,
            location: location.clone(),
        })))
    }

    fn open_writable(&self, location: &KeyLocation) -> Result<Box<dyn KeyHandle + '_>> {
        let wide_path = to_wide(&location.path);
        let mut key = HKEY::default();
        // SAFETY: RegCreateKeyExW opens the key, creating it if missing. All
        // pointers are valid for the duration of the call.
        let status = unsafe {
            RegCreateKeyExW(
                root(location.hive),
                PCWSTR(wide_path.as_ptr()),
                None,
                PCWSTR::null(),
                REG_OPTION_NON_VOLATILE,
                KEY_READ | KEY_WRITE | view_flags(location.view),
                None,
                &mut key,
                None,
            )
        };
        check(status, location)?;
        log::debug!("Opened {location} for writing");
        Ok(Box::new(RegistryKey {
            key,
            location: location.clone(),
        }))
    }
}

struct RegistryKey {
    key: HKEY,
    location: KeyLocation,
}

impl KeyHandle for RegistryKey {
    fn value_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut buf = vec![0u16; MAX_VALUE_NAME];
        for index in 0.. {
            let mut len = buf.len() as u32;
            // SAFETY: `buf` holds `len` UTF-16 units; type and data are not
            // requested.
            let status = unsafe {
                RegEnumValueW(
                    self.key,
                    index,
                    PWSTR(buf.as_mut_ptr()),
                    &mut len,
                    None,
                    None,
                    None,
                    None,
                )
            };
            if status == ERROR_NO_MORE_ITEMS {
                break;
            }
            check(status, &self.location)?;
            names.push(String::from_utf16_lossy(&buf[..len as usize]));
        }
        Ok(names)
    }

    fn value(&self, name: &str) -> Result<Option<Value>> {
        let wide_name = to_wide(name);
        let mut kind = REG_VALUE_TYPE::default();
        let mut len = 0u32;
        // SAFETY: size query only; no data buffer is passed.
        let status = unsafe {
            RegQueryValueExW(
                self.key,
                PCWSTR(wide_name.as_ptr()),
                None,
                Some(&mut kind),
                None,
                Some(&mut len),
            )
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        check(status, &self.location)?;

        let mut data = vec![0u8; len as usize];
        // SAFETY: `data` is exactly `len` bytes long, as reported above.
        let status = unsafe {
            RegQueryValueExW(
                self.key,
                PCWSTR(wide_name.as_ptr()),
                None,
                Some(&mut kind),
                Some(data.as_mut_ptr()),
                Some(&mut len),
            )
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        check(status, &self.location)?;
        data.truncate(len as usize);
        Ok(Some(decode_value(kind, data)))
    }

    fn set_value(&self, name: &str, value: &Value) -> Result<()> {
        let wide_name = to_wide(name);
        let (kind, bytes) = match value {
            Value::String(s) => (
                REG_SZ,
                to_wide(s).iter().flat_map(|c| c.to_le_bytes()).collect(),
            ),
            Value::Binary(b) => (REG_BINARY, b.clone()),
        };
        // SAFETY: RegSetValueExW copies `bytes`; the length comes from the slice.
        let status = unsafe {
            RegSetValueExW(
                self.key,
                PCWSTR(wide_name.as_ptr()),
                None,
                kind,
                Some(&bytes),
            )
        };
        check(status, &self.location)
    }

    fn delete_value(&self, name: &str) -> Result<bool> {
        let wide_name = to_wide(name);
        // SAFETY: RegDeleteValueW is a standard Win32 registry API.
        let status = unsafe { RegDeleteValueW(self.key, PCWSTR(wide_name.as_ptr())) };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(false);
        }
        check(status, &self.location)?;
        Ok(true)
    }
}

impl Drop for RegistryKey {
    fn drop(&mut self) {
        // SAFETY: the handle came from a successful open and is closed once.
        let _ = unsafe { RegCloseKey(self.key) };
    }
}

fn root(hive: Hive) -> HKEY {
    match hive {
        Hive::CurrentUser => HKEY_CURRENT_USER,
        Hive::LocalMachine => HKEY_LOCAL_MACHINE,
    }
}

fn view_flags(view: RegistryView) -> REG_SAM_FLAGS {
    match view {
        RegistryView::Default => REG_SAM_FLAGS(0),
        RegistryView::Registry32 => KEY_WOW64_32KEY,
        RegistryView::Registry64 => KEY_WOW64_64KEY,
    }
}

/// String types become [`Value::String`]; everything else stays raw bytes.
fn decode_value(kind: REG_VALUE_TYPE, data: Vec<u8>) -> Value {
    if kind == REG_SZ || kind == REG_EXPAND_SZ {
        let units: Vec<u16> = data
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        Value::String(from_wide(&units))
    } else {
        Value::Binary(data)
    }
}

fn check(status: WIN32_ERROR, location: &KeyLocation) -> Result<()> {
    if status.is_ok() {
        return Ok(());
    }
    let location = location.to_string();
    Err(if status == ERROR_ACCESS_DENIED {
        Error::AccessDenied { location }
    } else if status == ERROR_FILE_NOT_FOUND {
        Error::NotFound { what: location }
    } else {
        Error::Store {
            location,
            message: format!("registry call failed with code {}", status.0),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_values_drop_the_terminator() {
        let data: Vec<u8> = to_wide(r"C:\a.exe")
            .iter()
            .flat_map(|c| c.to_le_bytes())
            .collect();

        let value = decode_value(REG_SZ, data);

        assert_eq!(value, Value::String(r"C:\a.exe".into()));
    }

    #[test]
    fn binary_values_are_kept_raw() {
        let value = decode_value(REG_BINARY, vec![2, 0, 0, 0]);

        assert_eq!(value, Value::Binary(vec![2, 0, 0, 0]));
    }

    #[test]
    fn missing_key_opens_as_none() {
        let location = KeyLocation::new(
            Hive::CurrentUser,
            RegistryView::Default,
            r"Software\autostart-tests\does-not-exist",
        );

        assert!(RegistryStore.open_readable(&location).unwrap().is_none());
    }
}
