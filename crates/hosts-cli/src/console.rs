//! Line-oriented menu session over any reader/writer pair

use std::io::{BufRead, Write};

use colored::Colorize;
use hosts_core::{CacheFlusher, Fetcher, HostsUpdater, UpdateReport};

use crate::menu::{Action, Dispatcher, Transition};

/// Runs the operation behind a menu choice
pub trait ActionExecutor {
    fn execute(&mut self, action: Action) -> hosts_core::Result<UpdateReport>;
}

impl<F: Fetcher, C: CacheFlusher> ActionExecutor for HostsUpdater<F, C> {
    fn execute(&mut self, action: Action) -> hosts_core::Result<UpdateReport> {
        match action {
            Action::AddOrUpdate => self.add_or_update(),
            Action::Remove => self.remove(),
        }
    }
}

/// Show the menu until the operator exits or the input ends.
///
/// Failed operations are reported and the menu is shown again; only console
/// I/O errors end the session early.
pub fn run_session<R, W, E>(mut input: R, output: &mut W, executor: &mut E) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
    E: ActionExecutor,
{
    let mut dispatcher = Dispatcher::new();
    let mut line = String::new();

    while !dispatcher.is_finished() {
        write!(output, "{}", dispatcher.menu())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            write!(output, "{}", dispatcher.end_of_input())?;
            break;
        }

        match dispatcher.handle_input(&line) {
            Transition::Run(action) => {
                writeln!(output, "{}", progress(action))?;
                output.flush()?;

                let outcome = executor.execute(action);
                let message = dispatcher.complete(&outcome);
                if outcome.is_err() {
                    write!(output, "{}", message.red())?;
                } else {
                    write!(output, "{message}")?;
                }
            }
            Transition::Reprompt(message) => write!(output, "{}", message.yellow())?,
            Transition::Exit(message) => write!(output, "{message}")?,
        }
        output.flush()?;
    }

    Ok(())
}

fn progress(action: Action) -> &'static str {
    match action {
        Action::AddOrUpdate => "Backing up and downloading the latest hosts entries...",
        Action::Remove => "Removing hosts blocker entries...",
    }
}
