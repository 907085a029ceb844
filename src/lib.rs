// ctxmenu - Windows 11 context menu toggle
// Flips the "Show more options" shell override and restarts Explorer so the change sticks

pub mod constants;
pub mod error;
pub mod registry;
pub mod session;
pub mod shell;
pub mod toggle;
pub mod ui;

#[cfg(windows)]
mod win32;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use error::{ToggleError, ToggleResult};
pub use registry::{MemoryRegistry, RegistryStore, RegistryValue};
pub use session::{Action, MenuChoice, Session};
pub use shell::{SessionAction, ShellHost};
