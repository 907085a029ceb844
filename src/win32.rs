//! Small helpers shared by the Win32 backends

use std::io;
use std::os::windows::process::CommandExt;
use std::process::Command;
use windows::Win32::Foundation::WIN32_ERROR;

const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// NUL-terminated UTF-16 copy of `s`
pub(crate) fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

pub(crate) fn os_error(status: WIN32_ERROR) -> io::Error {
    io::Error::from_raw_os_error(status.0 as i32)
}

/// Command that runs without flashing a console window
pub(crate) fn hidden_command(program: &str) -> Command {
    let mut command = Command::new(program);
    command.creation_flags(CREATE_NO_WINDOW);
    command
}
