use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Serialize)]
pub struct ArgsRequest<'a> {
    pub args: &'a [String],
}

#[derive(Serialize)]
pub struct EmptyRequest {}

/// Report as serialized by the omw backend. Durations are nanoseconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDto {
    #[serde(with = "time::serde::rfc3339")]
    pub report_from: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub report_to: OffsetDateTime,
    pub task_total_hours: i64,
    pub break_total_hours: i64,
    pub ignore_total_hours: i64,
    // The backend sends `null` for an empty week.
    #[serde(default)]
    pub entries: Option<Vec<ReportEntryDto>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntryDto {
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub duration: i64,
    pub task: String,
    pub ignore: bool,
    #[serde(rename = "break")]
    pub is_break: bool,
}

impl ReportDto {
    /// Typed view of a report payload, if it has the backend's report shape.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    pub fn entries(&self) -> &[ReportEntryDto] {
        self.entries.as_deref().unwrap_or_default()
    }
}
