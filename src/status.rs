use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Future,
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Future => "Future",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Both `start` and `end` belong to `InProgress`.
pub fn classify_status(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> ProjectStatus {
    if today < start {
        ProjectStatus::Future
    } else if today > end {
        ProjectStatus::Completed
    } else {
        ProjectStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn boundaries_are_in_progress() {
        let start = d(2025, 1, 6);
        let end = d(2025, 1, 10);
        assert_eq!(classify_status(start, end, start), ProjectStatus::InProgress);
        assert_eq!(classify_status(start, end, end), ProjectStatus::InProgress);
        assert_eq!(classify_status(start, end, d(2025, 1, 5)), ProjectStatus::Future);
        assert_eq!(classify_status(start, end, d(2025, 1, 11)), ProjectStatus::Completed);
    }

    #[test]
    fn labels_match_portal_wording() {
        assert_eq!(ProjectStatus::InProgress.to_string(), "In Progress");
    }
}
