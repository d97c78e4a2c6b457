//! Launcher files created through the shell's `ShellLink` COM object.

use std::path::Path;

use autostart_core::store::LauncherFactory;
use autostart_core::{Error, Result};
use windows::Win32::Foundation::{E_ACCESSDENIED, ERROR_ACCESS_DENIED};
use windows::Win32::System::Com::{
    CLSCTX_INPROC_SERVER, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx,
    CoUninitialize, IPersistFile,
};
use windows::Win32::UI::Shell::{IShellLinkW, ShellLink};
use windows::core::{HSTRING, Interface};

/// Ensures COM is initialized on the calling thread.
struct ComInit;

impl ComInit {
    fn new() -> Self {
        // SAFETY: CoInitializeEx is safe to call; duplicate calls on the
        // same thread return S_FALSE and are harmless.
        unsafe {
            let _ = CoInitializeEx(None, COINIT_APARTMENTTHREADED);
        }
        Self
    }
}

impl Drop for ComInit {
    fn drop(&mut self) {
        unsafe {
            CoUninitialize();
        }
    }
}

thread_local! {
    static COM_INIT: ComInit = ComInit::new();
}

/// Writes `.lnk` files pointing at an executable, using it as the icon too.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellLinkFactory;

impl LauncherFactory for ShellLinkFactory {
    fn create_launcher(&self, at: &Path, target: &Path) -> Result<()> {
        COM_INIT
            .with(|_| save_link(at, target))
            .map_err(|e| com_error(e, at))?;
        log::debug!("Saved shell link {}", at.display());
        Ok(())
    }
}

fn save_link(at: &Path, target: &Path) -> windows::core::Result<()> {
    let target = HSTRING::from(target.as_os_str());
    // SAFETY: COM is initialized on this thread by COM_INIT; the interfaces
    // are reference counted and released when dropped.
    unsafe {
        let link: IShellLinkW = CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER)?;
        link.SetPath(&target)?;
        link.SetIconLocation(&target, 0)?;
        let file: IPersistFile = link.cast()?;
        file.Save(&HSTRING::from(at.as_os_str()), true)
    }
}

fn com_error(e: windows::core::Error, at: &Path) -> Error {
    let location = at.display().to_string();
    if e.code() == E_ACCESSDENIED || e.code() == ERROR_ACCESS_DENIED.to_hresult() {
        Error::AccessDenied { location }
    } else {
        Error::Store {
            location,
            message: e.message(),
        }
    }
}
