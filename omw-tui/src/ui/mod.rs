use crate::app::{App, Severity};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

mod help_panel;
mod report_panel;

pub use help_panel::help_text;
pub use report_panel::report_text;

const LABEL: &str = " omw ";
const PROMPT: &str = "> ";

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Command input
            Constraint::Length(1), // Status line
            Constraint::Min(0),    // Help / report panels
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    render_title(frame, root[0], app);
    render_input(frame, root[1], app);
    render_status(frame, root[2], app);
    render_panels(frame, root[3], app);
    render_key_hints(frame, root[4]);
}

fn render_title(frame: &mut Frame, area: Rect, app: &mut App) {
    let throbber_area = Rect {
        x: area.x + 1,
        y: area.y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: 1,
    };

    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_busy() {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);

    let title = Line::from(vec![
        Span::styled(LABEL, Style::default().fg(Color::Yellow)),
        Span::styled(app.api_url.clone(), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(title), label_area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let (before, after) = app.input.split_at_cursor();
    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{}{}", before, after),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(paragraph, area);

    let cursor_x = area.x + 1 + PROMPT.len() as u16 + before.chars().count() as u16;
    frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let style = match app.output.severity {
        Severity::Error => Style::default().fg(Color::Red),
        Severity::Normal => Style::default().fg(Color::Gray),
    };
    let text = format!(" {}", app.output.status_text);
    frame.render_widget(Paragraph::new(Span::styled(text, style)), area);
}

fn render_panels(frame: &mut Frame, area: Rect, app: &App) {
    match (app.output.help_visible, app.output.report_visible) {
        (true, true) => {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(area);
            help_panel::render_help_panel(frame, cols[0]);
            report_panel::render_report_panel(frame, app, cols[1]);
        }
        (true, false) => help_panel::render_help_panel(frame, area),
        (false, true) => report_panel::render_report_panel(frame, app, area),
        (false, false) => {}
    }
}

fn render_key_hints(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let hints = Line::from(vec![
        Span::styled(" Enter", key),
        Span::raw(": Run  "),
        Span::styled("F1", key),
        Span::raw(": Help  "),
        Span::styled("F2", key),
        Span::raw(": Report  "),
        Span::styled("↑/↓", key),
        Span::raw(": Scroll  "),
        Span::styled("Esc", key),
        Span::raw(": Quit"),
    ]);
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
