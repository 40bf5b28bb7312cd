//! ISO-8601 week and month arithmetic.
//!
//! Week 1 of a year is the week containing the year's first Thursday and
//! weeks run Monday through Sunday. Some years have 53 weeks, so nothing in
//! here assumes a fixed 52-week year.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EngineError, EngineResult};

/// A validated (ISO year, ISO week) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn new(year: i32, week: u32) -> EngineResult<Self> {
        validate_year(year)?;
        let last = weeks_in_year(year)?;
        if week == 0 || week > last {
            return Err(EngineError::InvalidWeek { year, week });
        }
        Ok(Self { year, week })
    }

    /// The ISO week a calendar date falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    pub fn next(self) -> Self {
        let last = weeks_in_year(self.year).unwrap_or(52);
        if self.week >= last {
            Self {
                year: self.year + 1,
                week: 1,
            }
        } else {
            Self {
                year: self.year,
                week: self.week + 1,
            }
        }
    }

    pub fn monday(self) -> NaiveDate {
        self.date_range().0
    }

    /// Monday and Sunday of this week.
    pub fn date_range(self) -> (NaiveDate, NaiveDate) {
        let monday = NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
            .unwrap_or(NaiveDate::MIN);
        (monday, monday + Duration::days(6))
    }

    /// Days of this week falling in each calendar month, in date order.
    pub fn month_overlap(self) -> Vec<(MonthKey, u32)> {
        let (monday, _) = self.date_range();
        let mut out: Vec<(MonthKey, u32)> = Vec::with_capacity(2);
        for offset in 0..7 {
            let day = monday + Duration::days(offset);
            let key = MonthKey {
                year: day.year(),
                month: day.month(),
            };
            match out.last_mut() {
                Some((last, days)) if *last == key => *days += 1,
                _ => out.push((key, 1)),
            }
        }
        out
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// A (year, month) bucket used by the revenue forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        validate_year(year)?;
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn label(self, locale: Locale) -> String {
        format!("{} {}", locale.month_name(self.month), self.year)
    }
}

/// Display languages for month labels. Always passed explicitly so output
/// never depends on the host locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    English,
    Swedish,
}

impl Locale {
    const ENGLISH_MONTHS: [&'static str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    const SWEDISH_MONTHS: [&'static str; 12] = [
        "januari",
        "februari",
        "mars",
        "april",
        "maj",
        "juni",
        "juli",
        "augusti",
        "september",
        "oktober",
        "november",
        "december",
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Some(Locale::English),
            "sv" | "sv-se" | "swedish" => Some(Locale::Swedish),
            _ => None,
        }
    }

    /// `month` must already be validated to 1..=12.
    fn month_name(self, month: u32) -> &'static str {
        let idx = (month.clamp(1, 12) - 1) as usize;
        match self {
            Locale::English => Self::ENGLISH_MONTHS[idx],
            Locale::Swedish => Self::SWEDISH_MONTHS[idx],
        }
    }
}

/// Source of "today". The engine never reads wall-clock time directly.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date, for tests and replayed reports.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

fn validate_year(year: i32) -> EngineResult<()> {
    if year < 0 {
        return Err(EngineError::InvalidYear { year });
    }
    Ok(())
}

/// Number of ISO weeks (52 or 53) in `year`.
pub fn weeks_in_year(year: i32) -> EngineResult<u32> {
    validate_year(year)?;
    // Dec 28 always falls in the last ISO week of its year.
    NaiveDate::from_ymd_opt(year, 12, 28)
        .map(|date| date.iso_week().week())
        .ok_or(EngineError::InvalidYear { year })
}

pub fn current_year_week(clock: &dyn Clock) -> WeekKey {
    WeekKey::from_date(clock.today())
}

/// Inclusive sequence of weeks from `(year_from, week_from)` to
/// `(year_to, week_to)`. A reversed range is empty.
pub fn week_range(
    year_from: i32,
    week_from: u32,
    year_to: i32,
    week_to: u32,
) -> EngineResult<Vec<WeekKey>> {
    let start = WeekKey::new(year_from, week_from)?;
    let end = WeekKey::new(year_to, week_to)?;
    let mut weeks = Vec::new();
    let mut current = start;
    while current <= end {
        weeks.push(current);
        current = current.next();
    }
    Ok(weeks)
}

pub fn week_date_range(year: i32, week: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    Ok(WeekKey::new(year, week)?.date_range())
}

pub fn month_label(month: u32, year: i32, locale: Locale) -> EngineResult<String> {
    Ok(MonthKey::new(year, month)?.label(locale))
}

/// Inclusive sequence of months. A reversed range is empty.
pub fn month_range(
    year_from: i32,
    month_from: u32,
    year_to: i32,
    month_to: u32,
) -> EngineResult<Vec<MonthKey>> {
    let start = MonthKey::new(year_from, month_from)?;
    let end = MonthKey::new(year_to, month_to)?;
    let mut months = Vec::new();
    let mut current = start;
    while current <= end {
        months.push(current);
        current = current.next();
    }
    Ok(months)
}
