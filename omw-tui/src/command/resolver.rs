use time::Date;

use super::{
    CommandError, Marker, Operation, ParsedCommand, ReportFormat, ReportRequest, TaskEntry,
};
use crate::week;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWeek {
    This,
    Last,
}

/// What a command token names, before its arguments are looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Hello,
    /// `forced` is set for the `break` / `ignore` shortcuts.
    Add { forced: Option<Marker> },
    Report(ReportWeek),
    Stretch,
    Edit,
    ToggleHelp,
    Invalid,
}

const ALIASES: &[(&str, CommandKind)] = &[
    ("h", CommandKind::Hello),
    ("hello", CommandKind::Hello),
    ("a", CommandKind::Add { forced: None }),
    ("add", CommandKind::Add { forced: None }),
    ("r", CommandKind::Report(ReportWeek::This)),
    ("report", CommandKind::Report(ReportWeek::This)),
    ("l", CommandKind::Report(ReportWeek::Last)),
    ("last", CommandKind::Report(ReportWeek::Last)),
    ("s", CommandKind::Stretch),
    ("stretch", CommandKind::Stretch),
    ("e", CommandKind::Edit),
    ("edit", CommandKind::Edit),
    (
        "b",
        CommandKind::Add {
            forced: Some(Marker::Break),
        },
    ),
    (
        "break",
        CommandKind::Add {
            forced: Some(Marker::Break),
        },
    ),
    (
        "i",
        CommandKind::Add {
            forced: Some(Marker::Ignore),
        },
    ),
    (
        "ignore",
        CommandKind::Add {
            forced: Some(Marker::Ignore),
        },
    ),
    ("?", CommandKind::ToggleHelp),
    ("help", CommandKind::ToggleHelp),
    ("t", CommandKind::ToggleHelp),
    ("toggle", CommandKind::ToggleHelp),
];

/// Exact, case-sensitive alias lookup.
pub fn resolve(token: &str) -> CommandKind {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, kind)| *kind)
        .unwrap_or(CommandKind::Invalid)
}

/// Build the operation for a parsed line. Report ranges are relative to `today`.
/// Only add commands take a `**`/`***` marker.
pub fn operation(parsed: &ParsedCommand, today: Date) -> Result<Operation, CommandError> {
    let kind = resolve(&parsed.token);
    if parsed.marker.is_some() && !matches!(kind, CommandKind::Add { .. } | CommandKind::Invalid) {
        return Err(CommandError::InvalidInput);
    }

    match kind {
        CommandKind::Hello => Ok(Operation::Hello),
        CommandKind::Add { forced: None } => {
            if parsed.args.is_empty() {
                return Err(CommandError::MissingArgument);
            }
            Ok(Operation::Add(TaskEntry {
                words: parsed.args.clone(),
                marker: parsed.marker,
            }))
        }
        CommandKind::Add {
            forced: Some(marker),
        } => {
            let words = if parsed.args.is_empty() {
                let default_task = match marker {
                    Marker::Break => "break",
                    Marker::Ignore => "ignore",
                };
                vec![default_task.to_string()]
            } else {
                parsed.args.clone()
            };
            Ok(Operation::Add(TaskEntry {
                words,
                marker: Some(marker),
            }))
        }
        CommandKind::Report(which) => {
            let range = match which {
                ReportWeek::This => week::current_week(today),
                ReportWeek::Last => week::previous_week(today),
            };
            Ok(Operation::Report(ReportRequest {
                range,
                format: ReportFormat::Json,
            }))
        }
        CommandKind::Stretch => Ok(Operation::Stretch),
        CommandKind::Edit => Ok(Operation::Edit),
        CommandKind::ToggleHelp => Ok(Operation::ToggleHelp),
        CommandKind::Invalid => Err(CommandError::UnknownCommand(parsed.token.clone())),
    }
}
