//! Live [`ProcessControl`] backed by a Toolhelp snapshot and `taskkill`

use super::restart::{ProcessControl, ProcessEntry, Termination};
use crate::win32::hidden_command;
use std::io;
use std::mem;
use std::process::Command;
use std::thread;
use std::time::Duration;
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W, TH32CS_SNAPPROCESS,
};

#[derive(Debug, Default)]
pub struct SystemProcesses;

impl ProcessControl for SystemProcesses {
    fn current_pid(&self) -> u32 {
        std::process::id()
    }

    fn processes(&mut self) -> io::Result<Vec<ProcessEntry>> {
        let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }
            .map_err(|err| io::Error::other(err.to_string()))?;

        let mut entries = Vec::new();
        let mut entry = PROCESSENTRY32W {
            dwSize: mem::size_of::<PROCESSENTRY32W>() as u32,
            ..Default::default()
        };

        let mut more = unsafe { Process32FirstW(snapshot, &mut entry) }.is_ok();
        while more {
            let len = entry
                .szExeFile
                .iter()
                .position(|&c| c == 0)
                .unwrap_or(entry.szExeFile.len());
            entries.push(ProcessEntry {
                pid: entry.th32ProcessID,
                parent_pid: entry.th32ParentProcessID,
                image: String::from_utf16_lossy(&entry.szExeFile[..len]),
            });
            more = unsafe { Process32NextW(snapshot, &mut entry) }.is_ok();
        }

        unsafe {
            let _ = CloseHandle(snapshot);
        }
        Ok(entries)
    }

    fn terminate(&mut self, termination: Termination) -> io::Result<()> {
        let pid = termination.pid.to_string();
        let mut command = hidden_command("taskkill");
        command.args(["/PID", &pid]);
        if termination.include_children {
            command.arg("/T");
        }
        let output = command.arg("/F").output()?;

        if !output.status.success() {
            return Err(io::Error::other(format!(
                "taskkill exited with {}",
                output.status
            )));
        }
        Ok(())
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }

    fn launch(&mut self, program: &str) -> io::Result<()> {
        Command::new(program).spawn().map(drop)
    }
}
