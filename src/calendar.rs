use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::EngineError;
use crate::model::CalendarId;
use crate::week::WeekKey;

/// A working calendar: the hours of a normal full-time week and the hours
/// deducted for holidays in specific ISO weeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorkCalendarConfig", into = "WorkCalendarConfig")]
pub struct WorkCalendar {
    id: CalendarId,
    name: String,
    base_hours_per_week: f64,
    working_days: Vec<Weekday>,
    holiday_weeks: BTreeMap<WeekKey, f64>,
}

/// Serialized form of a [`WorkCalendar`].
///
/// Holidays may be given as explicit per-week deductions, as dates, or both.
/// A dated holiday on a working day deducts one working day's share of the
/// base hours from its ISO week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCalendarConfig {
    pub id: CalendarId,
    pub name: String,
    pub base_hours_per_week: f64,
    #[serde(default)]
    pub holiday_weeks: Vec<HolidayWeek>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holidays: Vec<NaiveDate>,
    #[serde(default = "default_working_days")]
    pub working_days: Vec<Weekday>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HolidayWeek {
    pub year: i32,
    pub week: u32,
    pub hours: f64,
}

impl WorkCalendar {
    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn new(id: CalendarId, name: impl Into<String>, base_hours_per_week: f64) -> Self {
        Self {
            id,
            name: name.into(),
            base_hours_per_week,
            working_days: default_working_days(),
            holiday_weeks: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> CalendarId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_hours_per_week(&self) -> f64 {
        self.base_hours_per_week
    }

    pub fn working_days(&self) -> &[Weekday] {
        &self.working_days
    }

    /// Hours removed from the base week by holidays, 0 when none.
    pub fn holiday_deduction(&self, week: WeekKey) -> f64 {
        self.holiday_weeks.get(&week).copied().unwrap_or(0.0)
    }

    pub fn holiday_weeks(&self) -> impl Iterator<Item = (WeekKey, f64)> + '_ {
        self.holiday_weeks.iter().map(|(week, hours)| (*week, *hours))
    }

    /// Add deducted hours to a week. Repeated entries for a week accumulate.
    pub fn add_holiday_hours(&mut self, week: WeekKey, hours: f64) {
        *self.holiday_weeks.entry(week).or_insert(0.0) += hours;
    }

    pub fn with_holiday_hours(mut self, week: WeekKey, hours: f64) -> Self {
        self.add_holiday_hours(week, hours);
        self
    }

    /// Set custom working days (e.g. Mon-Sat for 6-day weeks). Only affects
    /// holidays added by date afterwards.
    pub fn set_working_days(&mut self, days: Vec<Weekday>) {
        let mut days: Vec<Weekday> = Self::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| days.contains(day))
            .collect();
        days.dedup();
        self.working_days = days;
    }

    /// Hours one working day is worth under this calendar.
    pub fn hours_per_working_day(&self) -> f64 {
        if self.working_days.is_empty() {
            return 0.0;
        }
        self.base_hours_per_week / self.working_days.len() as f64
    }

    /// Add a holiday by date. Dates on non-working days deduct nothing and a
    /// week never loses more than its base hours.
    pub fn add_holiday(&mut self, date: NaiveDate) {
        if !self.working_days.contains(&date.weekday()) {
            return;
        }
        let week = WeekKey::from_date(date);
        let per_day = self.hours_per_working_day();
        let base = self.base_hours_per_week;
        let entry = self.holiday_weeks.entry(week).or_insert(0.0);
        *entry = (*entry + per_day).min(base);
    }

    /// Add multiple holidays at once. Duplicate dates count once.
    pub fn add_holidays(&mut self, dates: &[NaiveDate]) {
        let unique: HashSet<NaiveDate> = dates.iter().copied().collect();
        let mut unique: Vec<NaiveDate> = unique.into_iter().collect();
        unique.sort();
        for date in unique {
            self.add_holiday(date);
        }
    }

    /// Add the same holiday date for multiple years.
    pub fn add_recurring_holiday(&mut self, month: u32, day: u32, start_year: i32, end_year: i32) {
        let dates: Vec<NaiveDate> = (start_year..=end_year)
            .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
            .collect();
        self.add_holidays(&dates);
    }

    pub fn to_config(&self) -> WorkCalendarConfig {
        WorkCalendarConfig::from(self.clone())
    }
}

impl TryFrom<WorkCalendarConfig> for WorkCalendar {
    type Error = EngineError;

    fn try_from(config: WorkCalendarConfig) -> Result<Self, Self::Error> {
        let mut calendar = WorkCalendar::new(config.id, config.name, config.base_hours_per_week);
        calendar.set_working_days(config.working_days);
        for entry in config.holiday_weeks {
            let week = WeekKey::new(entry.year, entry.week)?;
            calendar.add_holiday_hours(week, entry.hours);
        }
        calendar.add_holidays(&config.holidays);
        Ok(calendar)
    }
}

impl From<WorkCalendar> for WorkCalendarConfig {
    fn from(calendar: WorkCalendar) -> Self {
        let holiday_weeks = calendar
            .holiday_weeks
            .iter()
            .map(|(week, hours)| HolidayWeek {
                year: week.year,
                week: week.week,
                hours: *hours,
            })
            .collect();
        Self {
            id: calendar.id,
            name: calendar.name,
            base_hours_per_week: calendar.base_hours_per_week,
            holiday_weeks,
            holidays: Vec::new(),
            working_days: calendar.working_days,
        }
    }
}

fn default_working_days() -> Vec<Weekday> {
    vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
}
