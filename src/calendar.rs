use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("work calendar requires at least one working day")]
    NoWorkingDays,
}

/// Working weekdays plus explicit holidays. The default calendar is a plain
/// Monday to Friday week with no holidays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCalendar {
    holidays: HashSet<NaiveDate>,
    non_working_days: HashSet<Weekday>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalendarConfig {
    working_days: Vec<Weekday>,
    #[serde(default)]
    holidays: Vec<NaiveDate>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self {
            holidays: HashSet::new(),
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
        }
    }
}

/// Counts Monday to Friday dates in `[start, end]`, both ends included.
/// Returns 0 when `start > end`.
pub fn count_business_days(start: NaiveDate, end: NaiveDate) -> i64 {
    WorkCalendar::default().count_available_days(start, end)
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

    pub fn custom<I, J>(working_days: I, holidays: J) -> Result<Self, CalendarError>
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        let config = WorkCalendarConfig::new(working_days, holidays);
        Self::from_config(&config)
    }

    pub fn from_config(config: &WorkCalendarConfig) -> Result<Self, CalendarError> {
        let working_set: HashSet<Weekday> = config.working_days.iter().copied().collect();
        if working_set.is_empty() {
            return Err(CalendarError::NoWorkingDays);
        }
        let non_working_days = Self::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !working_set.contains(day))
            .collect();

        Ok(Self {
            holidays: config.holidays.iter().copied().collect(),
            non_working_days,
        })
    }

    pub fn to_config(&self) -> WorkCalendarConfig {
        WorkCalendarConfig::from(self)
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    /// Add the same holiday for every year in `start_year..=end_year`.
    /// Dates that do not exist in a given year (Feb 29) are skipped.
    pub fn add_recurring_holiday(&mut self, month: u32, day: u32, start_year: i32, end_year: i32) {
        for year in start_year..=end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(date);
            }
        }
    }

    /// Replace the working week, e.g. Mon-Sat for six-day weeks.
    pub fn set_working_days(&mut self, days: &[Weekday]) -> Result<(), CalendarError> {
        if days.is_empty() {
            return Err(CalendarError::NoWorkingDays);
        }
        self.non_working_days = Self::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !days.contains(day))
            .collect();
        Ok(())
    }

    pub fn is_available(&self, date: NaiveDate) -> bool {
        !self.holidays.contains(&date) && self.is_working_weekday(date.weekday())
    }

    fn is_working_weekday(&self, weekday: Weekday) -> bool {
        !self.non_working_days.contains(&weekday)
    }

    /// Count available days in `[start, end]`; an inverted range counts 0.
    /// Whole weeks are counted arithmetically; only the trailing partial
    /// week and the holiday set are walked.
    pub fn count_available_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        if start > end {
            return 0;
        }
        let span = (end - start).num_days() + 1;
        let per_week = (7 - self.non_working_days.len()) as i64;
        let tail = std::iter::successors(Some(start.weekday()), |wd| Some(wd.succ()))
            .take((span % 7) as usize)
            .filter(|wd| self.is_working_weekday(*wd))
            .count() as i64;
        let holidays = self
            .holidays
            .iter()
            .filter(|date| (start..=end).contains(*date) && self.is_working_weekday(date.weekday()))
            .count() as i64;
        (span / 7) * per_week + tail - holidays
    }
}

impl WorkCalendarConfig {
    pub fn new<I, J>(working_days: I, holidays: J) -> Self
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        let mut working_days: Vec<Weekday> = working_days.into_iter().collect();
        working_days.sort_by_key(|wd| wd.num_days_from_monday());
        working_days.dedup();

        let holidays: BTreeSet<NaiveDate> = holidays.into_iter().collect();
        Self {
            working_days,
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn working_days(&self) -> &[Weekday] {
        &self.working_days
    }

    pub fn holidays(&self) -> &[NaiveDate] {
        &self.holidays
    }
}

impl Default for WorkCalendarConfig {
    fn default() -> Self {
        WorkCalendar::default().to_config()
    }
}

impl From<&WorkCalendar> for WorkCalendarConfig {
    fn from(calendar: &WorkCalendar) -> Self {
        let working_days = WorkCalendar::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !calendar.non_working_days.contains(day));
        Self::new(working_days, calendar.holidays.iter().copied())
    }
}
