//! Interactive menu loop
//!
//! ```text
//! MainMenu --1/2/3--> Busy --> Result --(1, 2)--> SessionPrompt --> MainMenu
//!                                     --(3)-----> Pause ----------> MainMenu
//! MainMenu --other--> Warning --> Pause --> MainMenu
//! MainMenu --Q / end of input--> exit
//! ```
//!
//! Each action returns an explicit [`ToggleResult`]; failures are rendered
//! and the loop resumes. Only console I/O errors end the session.

use crate::error::ToggleResult;
use crate::registry::RegistryStore;
use crate::shell::{SessionAction, ShellHost};
use crate::toggle;
use crate::ui::{self, MenuStatus};
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// One of the three mutating menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DisableShowMoreOptions,
    EnableShowMoreOptions,
    RestartExplorer,
}

/// Selection at the main menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Action(Action),
    Quit,
    Unknown(String),
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        let choice = input.trim().to_ascii_uppercase();
        match choice.as_str() {
            "1" => MenuChoice::Action(Action::DisableShowMoreOptions),
            "2" => MenuChoice::Action(Action::EnableShowMoreOptions),
            "3" => MenuChoice::Action(Action::RestartExplorer),
            "Q" => MenuChoice::Quit,
            _ => MenuChoice::Unknown(choice),
        }
    }
}

/// Successful action: message to show and whether to offer restart/sign-out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub message: &'static str,
    pub offer_session_action: bool,
}

impl Action {
    fn outcome(&self) -> ActionOutcome {
        match self {
            Action::DisableShowMoreOptions => ActionOutcome {
                message: "Done: \"Show more options\" DISABLED (classic full context menu enabled).",
                offer_session_action: true,
            },
            Action::EnableShowMoreOptions => ActionOutcome {
                message: "Done: \"Show more options\" ENABLED (Windows 11 default restored).",
                offer_session_action: true,
            },
            Action::RestartExplorer => ActionOutcome {
                message: "Done: Explorer restarted.",
                offer_session_action: false,
            },
        }
    }
}

/// Whether the loop keeps going after a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Session<R, S, I, O> {
    registry: R,
    shell: S,
    input: I,
    output: O,
}

impl<R, S, I, O> Session<R, S, I, O>
where
    R: RegistryStore,
    S: ShellHost,
    I: BufRead,
    O: Write,
{
    pub fn new(registry: R, shell: S, input: I, output: O) -> Self {
        Self {
            registry,
            shell,
            input,
            output,
        }
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> ToggleResult<()> {
        ui::set_title(&mut self.output)?;

        loop {
            self.draw_header()?;
            ui::main_menu(&mut self.output)?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            let flow = match MenuChoice::parse(&line) {
                MenuChoice::Quit => Flow::Exit,
                MenuChoice::Unknown(choice) => {
                    info!(%choice, "unrecognized menu choice");
                    ui::warn(&mut self.output, "Unknown choice.")?;
                    self.pause()?
                }
                MenuChoice::Action(action) => match self.perform(action) {
                    Ok(outcome) => {
                        ui::info(&mut self.output, outcome.message)?;
                        if outcome.offer_session_action {
                            self.prompt_session_action()?
                        } else {
                            self.pause()?
                        }
                    }
                    Err(err) => {
                        warn!(?action, %err, "action failed");
                        ui::error(&mut self.output, &err.to_string())?;
                        self.pause()?
                    }
                },
            };

            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Mutate, notify, restart. A registry change made before a later failure stays applied.
    pub fn perform(&mut self, action: Action) -> ToggleResult<ActionOutcome> {
        info!(?action, "running action");
        match action {
            Action::DisableShowMoreOptions => {
                toggle::disable_show_more_options(&mut self.registry)?
            }
            Action::EnableShowMoreOptions => toggle::enable_show_more_options(&mut self.registry)?,
            Action::RestartExplorer => {}
        }

        self.shell.refresh();
        self.shell.restart_explorer()?;
        Ok(action.outcome())
    }

    fn draw_header(&mut self) -> ToggleResult<()> {
        ui::clear_screen(&mut self.output)?;
        let status = match toggle::is_show_more_options_disabled(&self.registry) {
            Ok(disabled) => MenuStatus::from(disabled),
            Err(err) => {
                warn!(%err, "could not read context menu state");
                MenuStatus::Unknown
            }
        };
        ui::header(&mut self.output, status)?;
        Ok(())
    }

    fn prompt_session_action(&mut self) -> ToggleResult<Flow> {
        ui::session_menu(&mut self.output)?;
        let Some(line) = self.read_line()? else {
            return Ok(Flow::Exit);
        };
        self.shell.session_action(SessionAction::parse(&line));
        Ok(Flow::Continue)
    }

    fn pause(&mut self) -> ToggleResult<Flow> {
        ui::pause_prompt(&mut self.output)?;
        Ok(match self.read_line()? {
            Some(_) => Flow::Continue,
            None => Flow::Exit,
        })
    }

    /// Next input line; `None` once input is closed
    fn read_line(&mut self) -> ToggleResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CLSID_PATH, INPROC_PATH};
    use crate::error::ToggleError;
    use crate::registry::MemoryRegistry;
    use std::io::Cursor;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Refresh,
        Restart,
        Session(SessionAction),
    }

    #[derive(Default)]
    struct FakeShell {
        calls: Vec<Call>,
        fail_restart: bool,
    }

    impl ShellHost for FakeShell {
        fn refresh(&mut self) {
            self.calls.push(Call::Refresh);
        }

        fn restart_explorer(&mut self) -> ToggleResult<()> {
            self.calls.push(Call::Restart);
            if self.fail_restart {
                return Err(ToggleError::Launch {
                    program: "explorer.exe".to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            Ok(())
        }

        fn session_action(&mut self, action: SessionAction) {
            self.calls.push(Call::Session(action));
        }
    }

    fn run_script(
        registry: MemoryRegistry,
        shell: FakeShell,
        script: &str,
    ) -> (MemoryRegistry, FakeShell, String) {
        let input = Cursor::new(script.to_string());
        let mut session = Session::new(registry, shell, input, Vec::new());
        session.run().unwrap();
        let Session {
            registry,
            shell,
            output,
            ..
        } = session;
        (registry, shell, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(
            MenuChoice::parse("1\n"),
            MenuChoice::Action(Action::DisableShowMoreOptions)
        );
        assert_eq!(
            MenuChoice::parse(" 2 "),
            MenuChoice::Action(Action::EnableShowMoreOptions)
        );
        assert_eq!(MenuChoice::parse("3"), MenuChoice::Action(Action::RestartExplorer));
        assert_eq!(MenuChoice::parse("q"), MenuChoice::Quit);
        assert_eq!(MenuChoice::parse("9"), MenuChoice::Unknown("9".to_string()));
    }

    #[test]
    fn test_quit_immediately() {
        let (registry, shell, output) =
            run_script(MemoryRegistry::new(), FakeShell::default(), "Q\n");
        assert!(registry.is_empty());
        assert!(shell.calls.is_empty());
        assert!(output.contains("status: ENABLED"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (_, shell, _) = run_script(MemoryRegistry::new(), FakeShell::default(), "");
        assert!(shell.calls.is_empty());
    }

    #[test]
    fn test_disable_flow_refreshes_before_restart() {
        let (registry, shell, output) =
            run_script(MemoryRegistry::new(), FakeShell::default(), "1\nC\nQ\n");

        assert!(toggle::is_show_more_options_disabled(&registry).unwrap());
        assert_eq!(
            shell.calls,
            vec![Call::Refresh, Call::Restart, Call::Session(SessionAction::Continue)]
        );
        assert!(output.contains("Done: \"Show more options\" DISABLED"));
        assert!(output.contains("status: DISABLED"));
    }

    #[test]
    fn test_enable_flow_with_sign_out() {
        let mut registry = MemoryRegistry::new();
        toggle::disable_show_more_options(&mut registry).unwrap();

        let (registry, shell, output) = run_script(registry, FakeShell::default(), "2\nl\nQ\n");

        assert!(!registry.contains_key(CLSID_PATH));
        assert!(!registry.contains_key(INPROC_PATH));
        assert_eq!(shell.calls[2], Call::Session(SessionAction::SignOut));
        assert!(output.contains("Done: \"Show more options\" ENABLED"));
    }

    #[test]
    fn test_restart_only_pauses_without_session_prompt() {
        let (registry, shell, output) =
            run_script(MemoryRegistry::new(), FakeShell::default(), "3\n\nQ\n");

        assert!(registry.is_empty());
        assert_eq!(shell.calls, vec![Call::Refresh, Call::Restart]);
        assert!(output.contains("Done: Explorer restarted."));
        assert!(!output.contains("[R] Restart Windows now"));
        assert!(output.contains("Press Enter to continue..."));
    }

    #[test]
    fn test_unknown_choice_warns_and_touches_nothing() {
        let (registry, shell, output) =
            run_script(MemoryRegistry::new(), FakeShell::default(), "9\n\nQ\n");

        assert!(registry.is_empty());
        assert!(shell.calls.is_empty());
        assert!(output.contains("WARN: Unknown choice."));
    }

    #[test]
    fn test_refused_key_creation_reports_and_continues() {
        let mut registry = MemoryRegistry::new();
        registry.deny_create(CLSID_PATH);

        let (registry, shell, output) = run_script(registry, FakeShell::default(), "1\n\nQ\n");

        assert!(output.contains("ERROR: Could not create registry key"));
        assert!(shell.calls.is_empty());
        assert!(!toggle::is_show_more_options_disabled(&registry).unwrap());
    }

    #[test]
    fn test_restart_failure_keeps_registry_change() {
        let shell = FakeShell {
            fail_restart: true,
            ..FakeShell::default()
        };

        let (registry, shell, output) = run_script(MemoryRegistry::new(), shell, "1\n\nQ\n");

        assert!(toggle::is_show_more_options_disabled(&registry).unwrap());
        assert_eq!(shell.calls, vec![Call::Refresh, Call::Restart]);
        assert!(output.contains("ERROR: Failed to launch explorer.exe"));
    }

    #[test]
    fn test_end_of_input_at_session_prompt_exits() {
        let (registry, shell, _) = run_script(MemoryRegistry::new(), FakeShell::default(), "1\n");

        assert!(toggle::is_show_more_options_disabled(&registry).unwrap());
        assert_eq!(shell.calls, vec![Call::Refresh, Call::Restart]);
    }
}
