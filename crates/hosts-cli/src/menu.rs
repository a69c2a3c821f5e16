//! Menu state machine
//!
//! The [`Dispatcher`] turns raw input lines into actions and action results
//! into operator messages. It does no I/O itself; [`crate::console`] feeds it
//! lines and prints what it returns.
//!
//! ```text
//! MenuWait --"1"/"2"--> Running(action) --complete--> MenuWait
//! MenuWait --"3"/EOF--> Exit
//! MenuWait --other----> MenuWait (reprompt)
//! ```

use std::fmt::Write as _;

use hosts_core::{FlushOutcome, UpdateReport};

const RULE: &str = "--------------------------------------------";

/// Operations offered by the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddOrUpdate,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MenuWait,
    Running(Action),
    Exit,
}

/// What the console should do with one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Execute the action, then report back through [`Dispatcher::complete`]
    Run(Action),
    /// Print the message and show the menu again
    Reprompt(String),
    /// Print the message and end the session
    Exit(String),
}

#[derive(Debug)]
pub struct Dispatcher {
    state: MenuState,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            state: MenuState::MenuWait,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == MenuState::Exit
    }

    /// The banner, options and prompt shown while waiting for a choice.
    pub fn menu(&self) -> String {
        format!(
            "{RULE}\nHosts File Updater Script\n{RULE}\n\
             1) Add/Update hosts entries\n\
             2) Remove hosts entries\n\
             3) Exit\n\
             {RULE}\n\
             Please select an option [1-3]: "
        )
    }

    /// Interpret one line typed at the prompt.
    pub fn handle_input(&mut self, input: &str) -> Transition {
        match self.state {
            MenuState::Exit => return Transition::Exit(String::new()),
            MenuState::Running(_) => {
                return Transition::Reprompt(
                    "An operation is still running. Please wait.\n".to_string(),
                );
            }
            MenuState::MenuWait => {}
        }

        let action = match input.trim().parse::<u32>() {
            Ok(1) => Action::AddOrUpdate,
            Ok(2) => Action::Remove,
            Ok(3) => {
                self.state = MenuState::Exit;
                return Transition::Exit("Exiting.\n".to_string());
            }
            _ => {
                tracing::debug!(input = input.trim(), "Rejected menu input");
                return Transition::Reprompt("Invalid option. Please try again.\n".to_string());
            }
        };

        self.state = MenuState::Running(action);
        Transition::Run(action)
    }

    /// The input stream ended; leave as if the operator chose Exit.
    pub fn end_of_input(&mut self) -> String {
        self.state = MenuState::Exit;
        "\nExiting.\n".to_string()
    }

    /// Return to the menu and describe how the running action ended.
    ///
    /// Outside `Running` there is nothing to complete: the state is left as
    /// is and the outcome is not rendered.
    pub fn complete<E: std::fmt::Display>(&mut self, outcome: &Result<UpdateReport, E>) -> String {
        let action = match self.state {
            MenuState::Running(action) => action,
            state => {
                tracing::warn!(?state, "Completion reported with no running action");
                return "Unexpected completion: no operation was running.\n".to_string();
            }
        };
        self.state = MenuState::MenuWait;

        match outcome {
            Ok(report) => render_report(action, report),
            Err(e) => format!("Error: {e}\nReturning to the menu.\n"),
        }
    }
}

fn render_report(action: Action, report: &UpdateReport) -> String {
    let mut out = String::new();

    if let Some(backup) = &report.backup {
        let _ = writeln!(out, "Backup created at: {backup}");
    }

    let summary = match (action, report.changed) {
        (Action::AddOrUpdate, true) => {
            format!("Hosts file has been updated ({} entries).", report.entries)
        }
        (Action::AddOrUpdate, false) => "Hosts file is already up to date.".to_string(),
        (Action::Remove, true) => {
            format!("Hosts entries have been removed ({} entries).", report.entries)
        }
        (Action::Remove, false) => "No blocker entries found; nothing to remove.".to_string(),
    };
    let _ = writeln!(out, "{summary}");

    match &report.flush {
        FlushOutcome::Flushed => out.push_str("DNS cache flushed.\n"),
        FlushOutcome::Skipped => {}
        FlushOutcome::Failed(message) => {
            let _ = writeln!(out, "Warning: failed to flush DNS cache: {message}");
        }
    }

    out
}
