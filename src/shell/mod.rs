//! Making Explorer pick up the change
//!
//! The override is read once when Explorer builds its context menu handlers,
//! so a registry write alone is not enough: listeners are notified first and
//! then Explorer is restarted.

pub mod restart;

#[cfg(windows)]
pub mod explorer;
#[cfg(windows)]
mod processes;

#[cfg(windows)]
pub use explorer::ExplorerShell;

use crate::error::ToggleResult;

const RESTART_ARGS: &[&str] = &["/r", "/t", "0"];
const SIGN_OUT_ARGS: &[&str] = &["/l"];

/// What to do with the user session after a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Restart,
    SignOut,
    Continue,
}

impl SessionAction {
    /// Parse a selection; anything unrecognized continues
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_uppercase().as_str() {
            "R" => SessionAction::Restart,
            "L" => SessionAction::SignOut,
            _ => SessionAction::Continue,
        }
    }

    /// `shutdown` invocation for this action, if any
    pub fn command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            SessionAction::Restart => Some(("shutdown", RESTART_ARGS)),
            SessionAction::SignOut => Some(("shutdown", SIGN_OUT_ARGS)),
            SessionAction::Continue => None,
        }
    }
}

/// Host shell operations
pub trait ShellHost {
    /// Tell top-level windows and the shell that settings changed. Best-effort.
    fn refresh(&mut self);

    /// Kill every running Explorer, wait for it to go away, then start a new one
    fn restart_explorer(&mut self) -> ToggleResult<()>;

    /// Fire-and-forget restart or sign-out
    fn session_action(&mut self, action: SessionAction);
}

impl<T: ShellHost + ?Sized> ShellHost for &mut T {
    fn refresh(&mut self) {
        (**self).refresh()
    }

    fn restart_explorer(&mut self) -> ToggleResult<()> {
        (**self).restart_explorer()
    }

    fn session_action(&mut self, action: SessionAction) {
        (**self).session_action(action)
    }
}
