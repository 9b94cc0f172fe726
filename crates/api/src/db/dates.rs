use time::{macros::format_description, Date, Duration};

#[derive(thiserror::Error, Debug)]
pub enum DateError {
    #[error("'{0}' is not ten characters of YYYY-MM-DD")]
    Shape(String),
    #[error(transparent)]
    Parse(#[from] time::error::Parse),
}

/// Length of the trailing "year" used by the precipitation and tobs queries
pub const YEAR_WINDOW_DAYS: i64 = 366;

/// Parse a strict `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> Result<Date, DateError> {
    // `[year]` alone would also take a leading sign
    if value.len() != 10 || !value.as_bytes()[0].is_ascii_digit() {
        return Err(DateError::Shape(value.to_owned()));
    }
    Ok(Date::parse(
        value,
        format_description!("[year repr:full sign:automatic]-[month]-[day]"),
    )?)
}

/// Format a date the way the dataset stores it (`YYYY-MM-DD`)
pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(format_description!("[year]-[month]-[day]"))
}

/// Inclusive date range ending at the newest measurement in the dataset.
///
/// Anchored on dataset contents, never on the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub start: Date,
    pub end: Date,
}

impl YearWindow {
    pub fn ending_at(latest: Date) -> Self {
        let start = latest
            .checked_sub(Duration::days(YEAR_WINDOW_DAYS))
            .unwrap_or(Date::MIN);
        Self { start, end: latest }
    }
}
