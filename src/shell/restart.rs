//! Explorer restart sequence: enumerate, terminate, settle, relaunch
//!
//! The sequence runs against [`ProcessControl`] so the ordering and the
//! failure handling do not depend on a live Windows session.

use crate::constants::{EXPLORER_IMAGE, EXPLORER_SETTLE_DELAY};
use crate::error::{ToggleError, ToggleResult};
use std::collections::HashMap;
use std::io;
use std::time::Duration;
use tracing::{debug, info};

/// One row of a process snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub parent_pid: u32,
    pub image: String,
}

/// A single terminate request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    pub pid: u32,
    /// Also terminate every descendant (`taskkill /T`)
    pub include_children: bool,
}

/// Process-level operations the restart needs
pub trait ProcessControl {
    fn current_pid(&self) -> u32;

    fn processes(&mut self) -> io::Result<Vec<ProcessEntry>>;

    fn terminate(&mut self, termination: Termination) -> io::Result<()>;

    fn sleep(&mut self, duration: Duration);

    fn launch(&mut self, program: &str) -> io::Result<()>;
}

/// Parent chain of `pid`, nearest first
///
/// Stops at PID 0, at processes missing from the snapshot, and on loops
/// caused by PID reuse.
pub fn ancestry(entries: &[ProcessEntry], pid: u32) -> Vec<u32> {
    let parents: HashMap<u32, u32> = entries.iter().map(|e| (e.pid, e.parent_pid)).collect();

    let mut chain = Vec::new();
    let mut current = pid;
    while let Some(&parent) = parents.get(&current) {
        if parent == 0 || parent == pid || chain.contains(&parent) {
            break;
        }
        chain.push(parent);
        current = parent;
    }
    chain
}

/// Terminations for `targets`
///
/// A target this process descends from is terminated alone, without its
/// tree, so the caller survives to relaunch Explorer.
pub fn kill_plan(targets: &[u32], own_ancestry: &[u32], own_pid: u32) -> Vec<Termination> {
    targets
        .iter()
        .filter(|&&pid| pid != own_pid)
        .map(|&pid| Termination {
            pid,
            include_children: !own_ancestry.contains(&pid),
        })
        .collect()
}

pub fn restart_explorer(control: &mut impl ProcessControl) -> ToggleResult<()> {
    let entries = control.processes().unwrap_or_else(|err| {
        debug!(%err, "process snapshot failed, assuming no explorer is running");
        Vec::new()
    });

    let own_pid = control.current_pid();
    let targets: Vec<u32> = entries
        .iter()
        .filter(|e| e.image.eq_ignore_ascii_case(EXPLORER_IMAGE))
        .map(|e| e.pid)
        .collect();
    let plan = kill_plan(&targets, &ancestry(&entries, own_pid), own_pid);
    info!(count = plan.len(), "restarting explorer");

    for termination in plan {
        // The process may already be exiting; a failed kill is not actionable.
        if let Err(err) = control.terminate(termination) {
            debug!(pid = termination.pid, %err, "explorer not terminated");
        }
    }

    control.sleep(EXPLORER_SETTLE_DELAY);

    control
        .launch(EXPLORER_IMAGE)
        .map_err(|source| ToggleError::Launch {
            program: EXPLORER_IMAGE.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Terminate(Termination),
        Sleep(Duration),
        Launch(String),
    }

    #[derive(Default)]
    struct FakeProcesses {
        own_pid: u32,
        entries: Vec<ProcessEntry>,
        snapshot_fails: bool,
        failing_kills: Vec<u32>,
        launch_fails: bool,
        events: Vec<Event>,
    }

    impl ProcessControl for FakeProcesses {
        fn current_pid(&self) -> u32 {
            self.own_pid
        }

        fn processes(&mut self) -> io::Result<Vec<ProcessEntry>> {
            if self.snapshot_fails {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            Ok(self.entries.clone())
        }

        fn terminate(&mut self, termination: Termination) -> io::Result<()> {
            self.events.push(Event::Terminate(termination));
            if self.failing_kills.contains(&termination.pid) {
                return Err(io::Error::new(io::ErrorKind::Other, "access denied"));
            }
            Ok(())
        }

        fn sleep(&mut self, duration: Duration) {
            self.events.push(Event::Sleep(duration));
        }

        fn launch(&mut self, program: &str) -> io::Result<()> {
            self.events.push(Event::Launch(program.to_string()));
            if self.launch_fails {
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
            Ok(())
        }
    }

    fn entry(pid: u32, parent_pid: u32, image: &str) -> ProcessEntry {
        ProcessEntry {
            pid,
            parent_pid,
            image: image.to_string(),
        }
    }

    fn full_tree(pid: u32) -> Event {
        Event::Terminate(Termination {
            pid,
            include_children: true,
        })
    }

    fn settle_and_launch() -> [Event; 2] {
        [
            Event::Sleep(EXPLORER_SETTLE_DELAY),
            Event::Launch(EXPLORER_IMAGE.to_string()),
        ]
    }

    // =========================================================================
    // Ancestry and kill plan
    // =========================================================================

    #[test]
    fn test_ancestry_walks_parent_chain() {
        let entries = vec![
            entry(4, 0, "System"),
            entry(100, 4, "explorer.exe"),
            entry(200, 100, "WindowsTerminal.exe"),
            entry(300, 200, "ctxmenu.exe"),
        ];
        assert_eq!(ancestry(&entries, 300), vec![200, 100, 4]);
    }

    #[test]
    fn test_ancestry_stops_on_missing_parent_and_loops() {
        let entries = vec![entry(300, 999, "ctxmenu.exe")];
        assert_eq!(ancestry(&entries, 300), vec![999]);

        let looped = vec![entry(1, 2, "a.exe"), entry(2, 3, "b.exe"), entry(3, 2, "c.exe")];
        assert_eq!(ancestry(&looped, 1), vec![2, 3]);

        assert!(ancestry(&[], 1).is_empty());
    }

    #[test]
    fn test_kill_plan_spares_own_tree() {
        let plan = kill_plan(&[100, 500], &[200, 100, 4], 300);
        assert_eq!(
            plan,
            vec![
                Termination {
                    pid: 100,
                    include_children: false
                },
                Termination {
                    pid: 500,
                    include_children: true
                },
            ]
        );
    }

    #[test]
    fn test_kill_plan_never_targets_self() {
        assert!(kill_plan(&[300], &[], 300).is_empty());
    }

    // =========================================================================
    // Restart sequence
    // =========================================================================

    #[test]
    fn test_restart_launched_from_explorer_survives() {
        let mut control = FakeProcesses {
            own_pid: 300,
            entries: vec![
                entry(100, 4, "explorer.exe"),
                entry(300, 100, "ctxmenu.exe"),
                entry(500, 4, "EXPLORER.EXE"),
            ],
            ..FakeProcesses::default()
        };

        restart_explorer(&mut control).unwrap();

        let mut expected = vec![
            Event::Terminate(Termination {
                pid: 100,
                include_children: false,
            }),
            full_tree(500),
        ];
        expected.extend(settle_and_launch());
        assert_eq!(control.events, expected);
    }

    #[test]
    fn test_restart_without_running_explorer_still_launches() {
        let mut control = FakeProcesses {
            own_pid: 300,
            entries: vec![entry(300, 4, "ctxmenu.exe")],
            ..FakeProcesses::default()
        };

        restart_explorer(&mut control).unwrap();

        assert_eq!(control.events, settle_and_launch().to_vec());
    }

    #[test]
    fn test_restart_snapshot_failure_still_launches() {
        let mut control = FakeProcesses {
            snapshot_fails: true,
            ..FakeProcesses::default()
        };

        restart_explorer(&mut control).unwrap();

        assert_eq!(control.events, settle_and_launch().to_vec());
    }

    #[test]
    fn test_restart_continues_past_failed_kill() {
        let mut control = FakeProcesses {
            own_pid: 300,
            entries: vec![entry(100, 4, "explorer.exe"), entry(101, 4, "explorer.exe")],
            failing_kills: vec![100],
            ..FakeProcesses::default()
        };

        restart_explorer(&mut control).unwrap();

        let mut expected = vec![full_tree(100), full_tree(101)];
        expected.extend(settle_and_launch());
        assert_eq!(control.events, expected);
    }

    #[test]
    fn test_restart_launch_failure_is_reported() {
        let mut control = FakeProcesses {
            launch_fails: true,
            ..FakeProcesses::default()
        };

        let err = restart_explorer(&mut control).unwrap_err();

        match err {
            ToggleError::Launch { program, source } => {
                assert_eq!(program, EXPLORER_IMAGE);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
