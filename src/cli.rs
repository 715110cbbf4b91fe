use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "userstore",
    version,
    about = "CRUD access to the user_info table, over HTTP or as a scripted run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve the form and record routes until Ctrl-C.
    Serve,
    /// Insert, rename and delete a record, listing the table after each step.
    Walkthrough,
}

impl Cli {
    /// The chosen subcommand, `serve` when none is given.
    pub fn selected_command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}
