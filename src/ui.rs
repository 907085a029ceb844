//! Console presentation: screens, prompts and colored status lines
//!
//! Everything here writes to a caller-supplied [`Write`] so the session can be
//! rendered into a buffer. Colors and the title are applied per call; no
//! console state is kept between renders.

use crate::constants::{CLSID, CONSOLE_TITLE};
use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType, SetTitle};
use std::io::{self, Write};

const RULE_HEAVY: &str = "===============================================================";
const RULE_LIGHT: &str = "---------------------------------------------------------------";

/// Status shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStatus {
    /// "Show more options" disabled, classic menu active
    Disabled,
    Enabled,
    /// The registry could not be read
    Unknown,
}

impl MenuStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MenuStatus::Disabled => "DISABLED",
            MenuStatus::Enabled => "ENABLED",
            MenuStatus::Unknown => "UNKNOWN",
        }
    }
}

impl From<bool> for MenuStatus {
    fn from(disabled: bool) -> Self {
        if disabled {
            MenuStatus::Disabled
        } else {
            MenuStatus::Enabled
        }
    }
}

pub fn set_title(out: &mut impl Write) -> io::Result<()> {
    execute!(out, SetTitle(CONSOLE_TITLE))
}

pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

pub fn header(out: &mut impl Write, status: MenuStatus) -> io::Result<()> {
    writeln!(out, "{}", RULE_HEAVY)?;
    writeln!(out, "  WIN11 CONTEXT MENU HELPER  ::  CLSID {}", CLSID)?;
    writeln!(out, "{}", RULE_LIGHT)?;
    writeln!(out, "  \"Show more options\" status: {}", status.label())?;
    writeln!(out, "{}", RULE_HEAVY)?;
    writeln!(out)
}

pub fn main_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Choose an option:")?;
    writeln!(out, "  [1] Disable \"Show more options\" (classic full context menu)")?;
    writeln!(out, "  [2] Enable \"Show more options\" (Windows 11 default menu)")?;
    writeln!(out, "  [3] Restart Explorer only")?;
    writeln!(out, "  [Q] Quit")?;
    writeln!(out)?;
    selection_prompt(out)
}

pub fn session_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "The change has been applied.")?;
    writeln!(
        out,
        "If \"Show more options\" is still visible, a restart or sign-out may be required."
    )?;
    writeln!(out)?;
    writeln!(out, "  [R] Restart Windows now")?;
    writeln!(out, "  [L] Sign out now")?;
    writeln!(out, "  [C] Continue")?;
    writeln!(out)?;
    selection_prompt(out)
}

pub fn pause_prompt(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "Press Enter to continue...")?;
    out.flush()
}

pub fn info(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message.white().dimmed())
}

pub fn warn(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("WARN: {}", message).yellow())
}

pub fn error(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("ERROR: {}", message).red())
}

fn selection_prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "Selection: ")?;
    out.flush()
}
