//! Fixed identifiers, registry paths and timings.

use std::time::Duration;

/// Shell extension class whose empty `InprocServer32` registration brings back the classic menu
pub const CLSID: &str = "{86ca1aa0-34aa-4e8b-a509-50c905bae2a2}";

/// Parent key, relative to `HKEY_CURRENT_USER`
pub const CLSID_PATH: &str = r"Software\Classes\CLSID\{86ca1aa0-34aa-4e8b-a509-50c905bae2a2}";

/// In-process server key whose default value acts as the toggle
pub const INPROC_PATH: &str =
    r"Software\Classes\CLSID\{86ca1aa0-34aa-4e8b-a509-50c905bae2a2}\InprocServer32";

/// `WM_SETTINGCHANGE` payloads, broadcast in this order
pub const BROADCAST_PATHS: [&str; 2] = [
    r"Software\Classes",
    r"Software\Microsoft\Windows\CurrentVersion\Explorer",
];

/// Upper bound a single unresponsive window can hold up a broadcast
pub const BROADCAST_TIMEOUT: Duration = Duration::from_millis(250);

/// Time given to the OS to tear down the old shell before relaunching it
pub const EXPLORER_SETTLE_DELAY: Duration = Duration::from_millis(1200);

pub const EXPLORER_IMAGE: &str = "explorer.exe";

pub const CONSOLE_TITLE: &str = "Win11 Context Menu Helper";
