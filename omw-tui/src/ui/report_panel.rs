use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};
use serde_json::Value;
use time::Date;

use crate::api::dto::{ReportDto, ReportEntryDto};
use crate::app::App;
use crate::week::format_date;

const NANOS_PER_MINUTE: i64 = 60_000_000_000;

/// A report payload split into a summary header and the entry listing.
#[derive(Debug, Default, PartialEq)]
pub struct ReportText {
    pub summary: Vec<String>,
    pub body: Vec<String>,
}

impl ReportText {
    pub fn lines(&self) -> impl Iterator<Item = &String> {
        self.summary.iter().chain(self.body.iter())
    }
}

fn format_duration(nanos: i64) -> String {
    let total_minutes = nanos / NANOS_PER_MINUTE;
    format!("{}h{:02}m", total_minutes / 60, total_minutes % 60)
}

fn day_label(date: Date) -> String {
    format_date(date).unwrap_or_else(|_| date.to_string())
}

fn entry_line(entry: &ReportEntryDto) -> String {
    let tag = match (entry.is_break, entry.ignore) {
        (true, _) => " [break]",
        (_, true) => " [ignored]",
        _ => "",
    };
    format!(
        "  ({}) {:02}:{:02}-{:02}:{:02}  {}{}",
        format_duration(entry.duration),
        entry.start_time.hour(),
        entry.start_time.minute(),
        entry.timestamp.hour(),
        entry.timestamp.minute(),
        entry.task,
        tag
    )
}

/// Backend reports get a summary and a per-day listing; any other JSON is
/// shown pretty-printed.
pub fn report_text(payload: &Value) -> ReportText {
    let Some(report) = ReportDto::from_value(payload) else {
        let pretty = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
        return ReportText {
            summary: Vec::new(),
            body: pretty.lines().map(str::to_string).collect(),
        };
    };

    let summary = vec![
        format!(
            "{} to {}",
            day_label(report.report_from.date()),
            day_label(report.report_to.date())
        ),
        format!(
            "Tasks: {}   Breaks: {}   Ignored: {}",
            format_duration(report.task_total_hours),
            format_duration(report.break_total_hours),
            format_duration(report.ignore_total_hours)
        ),
    ];

    let mut body = Vec::new();
    let mut current_day: Option<Date> = None;
    for entry in report.entries() {
        let day = entry.timestamp.date();
        if current_day != Some(day) {
            body.push(String::new());
            body.push(format!("{}, {}", day.weekday(), day_label(day)));
            current_day = Some(day);
        }
        body.push(entry_line(entry));
    }
    if body.is_empty() {
        body.push(String::new());
        body.push("No entries".to_string());
    }

    ReportText { summary, body }
}

pub fn render_report_panel(frame: &mut Frame, app: &App, area: Rect) {
    let text = report_text(&app.output.report_payload);
    let lines: Vec<Line> = text
        .summary
        .iter()
        .map(|s| Line::from(Span::styled(s.clone(), Style::default().fg(Color::Cyan))))
        .chain(text.body.iter().map(|s| Line::from(s.clone())))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Report ")
                .padding(Padding::horizontal(1)),
        )
        .scroll((app.report_scroll, 0));
    frame.render_widget(paragraph, area);
}
