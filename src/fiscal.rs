//! April-to-March fiscal years and the appraisal type (project end vs year
//! end) each year in the rolling window is reviewed under.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fiscal years offered for appraisal: the current one and the
/// three before it.
pub const WINDOW_LEN: usize = 4;

const FISCAL_START_MONTH: u32 = 4;

/// Fiscal year starting April 1 of `start_year` and ending March 31 of the
/// following year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FiscalYear {
    start_year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fiscal year label '{0}', expected e.g. 'FY (24 - 25)'")]
pub struct FiscalYearParseError(String);

impl FiscalYear {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= FISCAL_START_MONTH {
            Self::new(date.year())
        } else {
            Self::new(date.year() - 1)
        }
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn previous(&self) -> Self {
        Self::new(self.start_year - 1)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year, FISCAL_START_MONTH, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year + 1, 3, 31)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::containing(date) == *self
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FY ({:02} - {:02})",
            self.start_year.rem_euclid(100),
            (self.start_year + 1).rem_euclid(100)
        )
    }
}

impl FromStr for FiscalYear {
    type Err = FiscalYearParseError;

    /// Labels carry two-digit years, which always resolve to the 2000s.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FiscalYearParseError(s.to_string());
        let inner = s
            .trim()
            .strip_prefix("FY")
            .map(str::trim)
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let (first, second) = inner.split_once('-').ok_or_else(invalid)?;
        let first: i32 = first.trim().parse().map_err(|_| invalid())?;
        let second: i32 = second.trim().parse().map_err(|_| invalid())?;
        if !(0..100).contains(&first) || (first + 1) % 100 != second {
            return Err(invalid());
        }
        Ok(Self::new(2000 + first))
    }
}

/// The current fiscal year followed by the three before it, newest first.
pub fn fiscal_year_window(today: NaiveDate) -> Vec<FiscalYear> {
    let current = FiscalYear::containing(today);
    std::iter::successors(Some(current), |fy| Some(fy.previous()))
        .take(WINDOW_LEN)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppraisalKind {
    #[serde(rename = "PEA")]
    ProjectEnd,
    #[serde(rename = "YEA")]
    YearEnd,
}

impl AppraisalKind {
    pub fn code(&self) -> &'static str {
        match self {
            AppraisalKind::ProjectEnd => "PEA",
            AppraisalKind::YearEnd => "YEA",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AppraisalKind::ProjectEnd => "Project End Appraisal",
            AppraisalKind::YearEnd => "Year End Appraisal",
        }
    }
}

impl FromStr for AppraisalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PEA" | "PROJECT_END" => Ok(AppraisalKind::ProjectEnd),
            "YEA" | "YEAR_END" => Ok(AppraisalKind::YearEnd),
            other => Err(format!("unknown appraisal kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppraisalBuckets {
    pub project_end: Vec<FiscalYear>,
    pub year_end: Vec<FiscalYear>,
}

impl AppraisalBuckets {
    pub fn years(&self, kind: AppraisalKind) -> &[FiscalYear] {
        match kind {
            AppraisalKind::ProjectEnd => &self.project_end,
            AppraisalKind::YearEnd => &self.year_end,
        }
    }
}

/// Split `window` into project-end and year-end appraisal years.
///
/// The fiscal year an employee joined in is reviewed as a project-end
/// appraisal; every other year is a year-end appraisal. Employees who joined
/// in April start on a fiscal boundary and only ever get year-end
/// appraisals. Without a join date nothing is offered.
pub fn classify_appraisals(
    join_date: Option<NaiveDate>,
    window: &[FiscalYear],
) -> AppraisalBuckets {
    let Some(join_date) = join_date else {
        return AppraisalBuckets::default();
    };

    let joined_on_boundary = join_date.month() == FISCAL_START_MONTH;
    let join_fy = FiscalYear::containing(join_date);

    let (project_end, year_end) = window
        .iter()
        .copied()
        .partition(|fy| !joined_on_boundary && *fy == join_fy);

    AppraisalBuckets {
        project_end,
        year_end,
    }
}

/// Appraisal years offered to one employee plus the selection rules of the
/// performance page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppraisalPlan {
    pub current: FiscalYear,
    #[serde(flatten)]
    pub buckets: AppraisalBuckets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppraisalSelection {
    pub kind: AppraisalKind,
    pub year: Option<FiscalYear>,
}

impl AppraisalPlan {
    pub fn new(join_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        let current = FiscalYear::containing(today);
        let window = fiscal_year_window(today);
        let buckets = classify_appraisals(join_date, &window);
        tracing::debug!(
            ?join_date,
            %today,
            project_end = buckets.project_end.len(),
            year_end = buckets.year_end.len(),
            "classified appraisal years"
        );
        Self {
            current,
            buckets,
        }
    }

    pub fn available_kinds(&self) -> Vec<AppraisalKind> {
        [AppraisalKind::ProjectEnd, AppraisalKind::YearEnd]
            .into_iter()
            .filter(|kind| !self.buckets.years(*kind).is_empty())
            .collect()
    }

    /// Project-end review first when there is one, otherwise year-end.
    pub fn default_selection(&self) -> AppraisalSelection {
        let kind = if self.buckets.project_end.is_empty() {
            AppraisalKind::YearEnd
        } else {
            AppraisalKind::ProjectEnd
        };
        self.select_kind(kind)
    }

    /// Switching kind resets the year to the first year of that kind.
    pub fn select_kind(&self, kind: AppraisalKind) -> AppraisalSelection {
        AppraisalSelection {
            kind,
            year: self.buckets.years(kind).first().copied(),
        }
    }

    /// Tasks may only be added against the running fiscal year.
    pub fn can_add_tasks(&self, selected: FiscalYear) -> bool {
        selected == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn april_rolls_over_the_fiscal_year() {
        assert_eq!(FiscalYear::containing(d(2025, 3, 31)), FiscalYear::new(2024));
        assert_eq!(FiscalYear::containing(d(2025, 4, 1)), FiscalYear::new(2025));
    }

    #[test]
    fn label_formats_two_digit_years() {
        assert_eq!(FiscalYear::new(2024).to_string(), "FY (24 - 25)");
        assert_eq!(FiscalYear::new(2099).to_string(), "FY (99 - 00)");
        assert_eq!(FiscalYear::new(2005).to_string(), "FY (05 - 06)");
    }

    #[test]
    fn label_parses_back() {
        assert_eq!("FY (24 - 25)".parse::<FiscalYear>().unwrap(), FiscalYear::new(2024));
        assert_eq!("FY(05-06)".parse::<FiscalYear>().unwrap(), FiscalYear::new(2005));
        assert!("FY (24 - 26)".parse::<FiscalYear>().is_err());
        assert!("2024".parse::<FiscalYear>().is_err());
    }

    #[test]
    fn bounds_cover_april_to_march() {
        let fy = FiscalYear::new(2024);
        assert_eq!(fy.first_day(), Some(d(2024, 4, 1)));
        assert_eq!(fy.last_day(), Some(d(2025, 3, 31)));
        assert!(fy.contains(d(2025, 1, 15)));
        assert!(!fy.contains(d(2025, 4, 1)));
    }
}
