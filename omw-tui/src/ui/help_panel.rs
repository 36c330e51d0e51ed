use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

pub const HELP: &[(&str, &str)] = &[
    ("h (hello)", "start day"),
    (
        "a (add) <task>",
        "add <task> entry with current time (use at end of task, not beginning)",
    ),
    ("a (add) <task> **", "add break <task> entry with current time"),
    (
        "a (add) <task> ***",
        "add ignored <task> entry with current time (ie: a commuting ***)",
    ),
    ("r (report)", "display this week's time report"),
    ("l (last)", "display last week's time report"),
    ("s (stretch)", "stretch last task to current time"),
    ("e (edit)", "edit current timesheet"),
    ("b (break) [task]", "shortcut to add break **"),
    ("i (ignore) [task]", "shortcut to add ignored ***"),
    ("? (help), t (toggle)", "toggle this help text display"),
];

/// Plain text form, for the non-interactive `exec` command.
pub fn help_text() -> Vec<String> {
    let width = HELP.iter().map(|(cmd, _)| cmd.len()).max().unwrap_or(0);
    HELP.iter()
        .map(|(cmd, desc)| format!("{:<width$}  {}", cmd, desc, width = width))
        .collect()
}

pub fn render_help_panel(frame: &mut Frame, area: Rect) {
    let width = HELP.iter().map(|(cmd, _)| cmd.len()).max().unwrap_or(0);
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(cmd, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}  ", cmd, width = width),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(*desc),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Help ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{resolve, CommandKind};

    #[test]
    fn every_listed_shortcut_resolves() {
        for (cmd, _) in HELP {
            let token = cmd.split_whitespace().next().unwrap();
            assert_ne!(resolve(token), CommandKind::Invalid, "{token}");
        }
    }

    #[test]
    fn help_text_is_aligned() {
        let lines = help_text();
        assert_eq!(lines.len(), HELP.len());
        let column = lines[0].find("start day").unwrap();
        assert_eq!(lines[5].find("display last week").unwrap(), column);
    }
}
