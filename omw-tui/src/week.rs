use std::fmt;
use std::sync::OnceLock;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, UtcOffset};

/// The only date shape the backend parses.
const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Working days covered by a report, Monday through Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    /// The same range moved back a whole week.
    pub fn previous(self) -> Self {
        Self {
            start: self.start - Duration::days(7),
            end: self.end - Duration::days(7),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = format_date(self.start).map_err(|_| fmt::Error)?;
        let end = format_date(self.end).map_err(|_| fmt::Error)?;
        write!(f, "{} to {}", start, end)
    }
}

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// The local UTC offset, looked up once. The first call has to happen while
/// the process is still single-threaded, otherwise the lookup fails and UTC
/// is used.
pub fn capture_local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

/// Today's date on the local clock.
pub fn local_today() -> Date {
    OffsetDateTime::now_utc()
        .to_offset(capture_local_offset())
        .date()
}

/// Monday to Friday of the week containing `today`. Sunday belongs to the
/// week that started six days earlier.
pub fn current_week(today: Date) -> DateRange {
    let days_from_monday = today.weekday().number_days_from_monday() as i64;
    let monday = today - Duration::days(days_from_monday);
    DateRange {
        start: monday,
        end: monday + Duration::days(4),
    }
}

pub fn previous_week(today: Date) -> DateRange {
    current_week(today).previous()
}

/// `YYYY-MM-DD`, zero padded.
pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(DATE_FORMAT)
}
