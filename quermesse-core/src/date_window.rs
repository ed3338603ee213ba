//! Date window for calendar requests.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::error::{QuermesseError, QuermesseResult};

/// Inclusive time window sent to the calendar service as timeMin/timeMax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> QuermesseResult<Self> {
        if start > end {
            return Err(QuermesseError::InvalidInput(format!(
                "Window start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(DateWindow { start, end })
    }

    /// Whole calendar month: first day 00:00:00 to last day 23:59:59 (UTC)
    pub fn month(year: i32, month: u32) -> QuermesseResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            QuermesseError::InvalidInput(format!("Invalid month {:04}-{:02}", year, month))
        })?;

        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let last = next_first
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| {
                QuermesseError::InvalidInput(format!("Invalid month {:04}-{:02}", year, month))
            })?;

        Self::new(start_of_day(first), end_of_day(last))
    }

    /// The month containing `today`
    pub fn current_month(today: NaiveDate) -> Self {
        let (first, last) = month_bounds(today);

        DateWindow {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    /// Build a window from CLI arguments.
    /// - `month`: YYYY-MM, takes the whole month
    /// - `from` / `to`: YYYY-MM-DD bounds; a missing side is taken from the month of the
    ///   given side (`--from` alone runs to the end of its month, `--to` alone starts on
    ///   the first of its month)
    /// - nothing given: the month of `today`
    pub fn from_args(
        month: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
        today: NaiveDate,
    ) -> QuermesseResult<Self> {
        if let Some(month) = month {
            if from.is_some() || to.is_some() {
                return Err(QuermesseError::InvalidInput(
                    "Use either --month or --from/--to, not both".into(),
                ));
            }
            let (year, month) = parse_month(month)?;
            return Self::month(year, month);
        }

        let from = from.map(parse_date).transpose()?;
        let to = to.map(parse_date).transpose()?;

        let (first, last) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            (Some(from), None) => (from, month_bounds(from).1),
            (None, Some(to)) => (month_bounds(to).0, to),
            (None, None) => return Ok(Self::current_month(today)),
        };

        Self::new(start_of_day(first), end_of_day(last))
    }

    pub fn start_rfc3339(&self) -> String {
        self.start.to_rfc3339()
    }

    pub fn end_rfc3339(&self) -> String {
        self.end.to_rfc3339()
    }
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> QuermesseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        QuermesseError::InvalidInput(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}

/// Parse YYYY-MM into (year, month)
fn parse_month(s: &str) -> QuermesseResult<(i32, u32)> {
    let invalid =
        || QuermesseError::InvalidInput(format!("Invalid month format '{}'. Expected YYYY-MM", s));

    let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) {
        return Err(invalid());
    }

    Ok((year, month))
}

/// First and last day of the month containing `date`
fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(date);
    (first, last)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let end = chrono::NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(chrono::NaiveTime::MIN);
    date.and_time(end).and_utc()
}
