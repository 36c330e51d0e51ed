//! Turning a typed command line into an [`Operation`].
//!
//! [`tokenize`] validates the raw text and splits it into a [`ParsedCommand`];
//! `resolve` looks the command token up in the alias table and
//! [`operation`] applies the argument rules of that command.

use thiserror::Error;

use crate::week::DateRange;

mod resolver;
mod tokenizer;

pub use resolver::operation;
#[cfg(test)]
pub use resolver::{resolve, CommandKind};
pub use tokenizer::tokenize;

pub const INVALID_COMMAND: &str = "Invalid command - try again or ? for help";
pub const ADD_REQUIRES_TASK: &str = "Add command requires task description";

/// Trailing suffix on an add command that changes how the entry is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `**`: the entry is a break.
    Break,
    /// `***`: the entry is left out of totals.
    Ignore,
}

impl Marker {
    pub fn as_str(self) -> &'static str {
        match self {
            Marker::Break => "**",
            Marker::Ignore => "***",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub token: String,
    pub args: Vec<String>,
    pub marker: Option<Marker>,
}

#[cfg(test)]
impl ParsedCommand {
    pub fn is_break(&self) -> bool {
        self.marker == Some(Marker::Break)
    }

    pub fn is_ignore(&self) -> bool {
        self.marker == Some(Marker::Ignore)
    }
}

/// A task line for `POST /add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub words: Vec<String>,
    pub marker: Option<Marker>,
}

impl TaskEntry {
    pub fn description(&self) -> String {
        self.words.join(" ")
    }

    /// Arguments as the backend expects them: the words, then the marker.
    pub fn wire_args(&self) -> Vec<String> {
        let mut args = self.words.clone();
        if let Some(marker) = self.marker {
            args.push(marker.as_str().to_string());
        }
        args
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
}

impl ReportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub range: DateRange,
    pub format: ReportFormat,
}

/// One backend action, ready to dispatch. `ToggleHelp` is handled locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Hello,
    Add(TaskEntry),
    Report(ReportRequest),
    Stretch,
    Edit,
    ToggleHelp,
}

impl Operation {
    pub fn is_report(&self) -> bool {
        matches!(self, Operation::Report(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Hello => "hello",
            Operation::Add(_) => "add",
            Operation::Report(_) => "report",
            Operation::Stretch => "stretch",
            Operation::Edit => "edit",
            Operation::ToggleHelp => "toggle",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("{}", INVALID_COMMAND)]
    InvalidInput,
    #[error("{}", INVALID_COMMAND)]
    UnknownCommand(String),
    #[error("{}", ADD_REQUIRES_TASK)]
    MissingArgument,
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Backend(String),
}
