//! Win32 implementation of [`ShellHost`]

use super::processes::SystemProcesses;
use super::{restart, SessionAction, ShellHost};
use crate::constants::{BROADCAST_PATHS, BROADCAST_TIMEOUT};
use crate::error::ToggleResult;
use crate::win32::{hidden_command, to_wide};
use tracing::{debug, info};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::Shell::{SHChangeNotify, SHCNE_ASSOCCHANGED, SHCNF_IDLIST};
use windows::Win32::UI::WindowsAndMessaging::{
    SendMessageTimeoutW, HWND_BROADCAST, SMTO_ABORTIFHUNG, WM_SETTINGCHANGE,
};

#[derive(Debug, Default)]
pub struct ExplorerShell {
    processes: SystemProcesses,
}

impl ExplorerShell {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShellHost for ExplorerShell {
    fn refresh(&mut self) {
        for path in BROADCAST_PATHS {
            let wide = to_wide(path);
            // Hung windows are skipped after the timeout; the outcome is not used.
            unsafe {
                let _ = SendMessageTimeoutW(
                    HWND_BROADCAST,
                    WM_SETTINGCHANGE,
                    WPARAM(0),
                    LPARAM(wide.as_ptr() as isize),
                    SMTO_ABORTIFHUNG,
                    BROADCAST_TIMEOUT.as_millis() as u32,
                    None,
                );
            }
        }

        unsafe {
            SHChangeNotify(SHCNE_ASSOCCHANGED, SHCNF_IDLIST, None, None);
        }
    }

    fn restart_explorer(&mut self) -> ToggleResult<()> {
        restart::restart_explorer(&mut self.processes)
    }

    fn session_action(&mut self, action: SessionAction) {
        let Some((program, args)) = action.command() else {
            return;
        };

        info!(?action, "requesting session action");
        // No confirmation and no rollback: once shutdown accepts the request the session ends.
        if let Err(err) = hidden_command(program).args(args).spawn() {
            debug!(%err, program, "session action could not be started");
        }
    }
}
