//! Task progress, the performance overview card and the dashboard task KPIs.

use crate::work_item::parse_api_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One task as returned by `/api/tasks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub assigned_by: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub archived: bool,
}

impl TaskRecord {
    fn assigned_on(&self) -> Option<NaiveDate> {
        self.assigned_date
            .as_deref()
            .and_then(|raw| parse_api_date("assignedDate", raw).ok())
    }

    fn due_on(&self) -> Option<NaiveDate> {
        self.due_date
            .as_deref()
            .and_then(|raw| parse_api_date("dueDate", raw).ok())
    }

    /// Elapsed share of the assigned..due window. Missing or unparsable
    /// dates count as finished.
    pub fn progress(&self, today: NaiveDate) -> f64 {
        match (self.assigned_on(), self.due_on()) {
            (Some(assigned), Some(due)) => progress_percent(assigned, due, today),
            _ => 100.0,
        }
    }
}

/// Percentage of `[assigned, due]` elapsed at `today`, clamped to 0..=100.
/// An empty or inverted window is reported as 100.
pub fn progress_percent(assigned: NaiveDate, due: NaiveDate, today: NaiveDate) -> f64 {
    let total = (due - assigned).num_days();
    if total <= 0 {
        return 100.0;
    }
    let elapsed = (today - assigned).num_days();
    (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    Low,
    Medium,
    High,
}

impl ProgressBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 85.0 {
            ProgressBand::High
        } else if percent >= 50.0 {
            ProgressBand::Medium
        } else {
            ProgressBand::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ProgressBand::Low => "#f44336",
            ProgressBand::Medium => "#ffeb3b",
            ProgressBand::High => "#4caf50",
        }
    }
}

pub fn filter_assigned_to<'a>(tasks: &'a [TaskRecord], employee_id: &str) -> Vec<&'a TaskRecord> {
    tasks
        .iter()
        .filter(|task| task.assigned_to == employee_id)
        .collect()
}

/// "My Overview" card of the performance page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOverview {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub average_rating: f64,
}

impl TaskOverview {
    pub fn from_tasks<'a, I>(tasks: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a TaskRecord>,
    {
        let mut total = 0;
        let mut completed = 0;
        let mut rating_sum = 0.0;
        for task in tasks {
            total += 1;
            if task.progress(today) >= 100.0 {
                completed += 1;
            }
            rating_sum += task.rating.unwrap_or(0.0);
        }
        let average_rating = if total == 0 {
            0.0
        } else {
            round_to_hundredths(rating_sum / total as f64)
        };
        Self {
            total,
            pending: total - completed,
            completed,
            average_rating,
        }
    }

    /// Whole stars shown for the average rating.
    pub fn stars(&self) -> u8 {
        self.average_rating.round().clamp(0.0, 5.0) as u8
    }
}

/// Tasks KPI card of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTaskCounts {
    pub assigned: usize,
    pub pending: usize,
}

impl DashboardTaskCounts {
    /// `assigned` skips archived tasks; `pending` counts every task due today
    /// or later, archived or not.
    pub fn from_tasks(tasks: &[TaskRecord], today: NaiveDate) -> Self {
        let assigned = tasks.iter().filter(|task| !task.archived).count();
        let pending = tasks
            .iter()
            .filter(|task| task.due_on().is_some_and(|due| due >= today))
            .count();
        Self { assigned, pending }
    }
}

pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round_to_hundredths(3.14159), 3.14);
        assert_eq!(round_to_hundredths(2.005_1), 2.01);
    }
}
