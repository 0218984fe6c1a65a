use crate::item_validation::{self, WorkItemError};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A date-ranged unit of work (a project assignment on the dashboard).
/// Both dates are included in the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl WorkItem {
    /// Build an item without checking the range. Engine functions accept
    /// inverted ranges and count them as zero days.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            start_date,
            end_date,
        }
    }

    pub fn try_new(
        id: impl Into<String>,
        label: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, WorkItemError> {
        let item = Self::new(id, label, start_date, end_date);
        item_validation::validate_item(&item)?;
        Ok(item)
    }
}

/// Parse a date as sent by the portal API. Accepts `YYYY-MM-DD`, RFC 3339
/// timestamps and naive ISO datetimes; only the calendar date is kept.
pub fn parse_api_date(field: &'static str, input: &str) -> Result<NaiveDate, WorkItemError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamp.date_naive());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(stamp.date());
    }
    Err(WorkItemError::InvalidDate {
        field,
        input: input.to_string(),
    })
}

/// One project as returned by `/api/projects/employee/:id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub assigned_to: Vec<String>,
}

impl TryFrom<ProjectPayload> for WorkItem {
    type Error = WorkItemError;

    fn try_from(payload: ProjectPayload) -> Result<Self, Self::Error> {
        let start = parse_api_date("startDate", &payload.start_date)?;
        let end = parse_api_date("endDate", &payload.end_date)?;
        WorkItem::try_new(payload.id, payload.project_name, start, end)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectsResponse {
    #[serde(default)]
    pub projects: Vec<ProjectPayload>,
}

impl ProjectsResponse {
    /// Projects assigned to `employee_id`, converted to work items. Payloads
    /// that fail validation are logged and skipped so one bad record does not
    /// hide the rest of the timeline.
    pub fn into_work_items(self, employee_id: &str) -> Vec<WorkItem> {
        let mut items: Vec<WorkItem> = Vec::with_capacity(self.projects.len());
        for payload in self.projects {
            if !payload.assigned_to.iter().any(|id| id == employee_id) {
                continue;
            }
            let id = payload.id.clone();
            match WorkItem::try_from(payload) {
                Ok(item) if items.iter().any(|existing| existing.id == item.id) => {
                    tracing::warn!(project = %id, "skipping duplicate project");
                }
                Ok(item) => items.push(item),
                Err(err) => tracing::warn!(project = %id, "skipping project: {err}"),
            }
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_plain_and_timestamped_dates() {
        assert_eq!(parse_api_date("f", "2025-01-06").unwrap(), d(2025, 1, 6));
        assert_eq!(
            parse_api_date("f", "2025-01-06T00:00:00.000Z").unwrap(),
            d(2025, 1, 6)
        );
        assert_eq!(
            parse_api_date("f", "2025-01-06T18:30:00").unwrap(),
            d(2025, 1, 6)
        );
        assert!(matches!(
            parse_api_date("startDate", "not a date"),
            Err(WorkItemError::InvalidDate { field: "startDate", .. })
        ));
    }

    #[test]
    fn try_new_rejects_inverted_range() {
        let err = WorkItem::try_new("p1", "Portal", d(2025, 1, 10), d(2025, 1, 6)).unwrap_err();
        assert!(matches!(err, WorkItemError::EndBeforeStart { .. }));
    }

    #[test]
    fn response_keeps_only_assigned_and_valid_projects() {
        let body = r#"{
            "projects": [
                {"_id": "a", "projectName": "Portal", "startDate": "2025-01-06T00:00:00.000Z",
                 "endDate": "2025-01-10T00:00:00.000Z", "assignedTo": ["E7"]},
                {"_id": "b", "projectName": "Other", "startDate": "2025-01-06",
                 "endDate": "2025-01-10", "assignedTo": ["E8"]},
                {"_id": "c", "projectName": "Broken", "startDate": "2025-02-10",
                 "endDate": "2025-02-01", "assignedTo": ["E7"]}
            ]
        }"#;
        let response: ProjectsResponse = serde_json::from_str(body).unwrap();
        let items = response.into_work_items("E7");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "a");
        assert_eq!(items[0].label, "Portal");
        assert_eq!(items[0].end_date, d(2025, 1, 10));
    }
}
