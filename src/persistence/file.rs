use super::{PersistenceError, PersistenceResult};
use crate::{
    calendar::{WorkCalendar, WorkCalendarConfig},
    timeline::TimelineAttribution,
    work_item::WorkItem,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Everything needed to recompute a dashboard: the items plus the inputs
/// that are otherwise read from the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<WorkCalendarConfig>,
    pub items: Vec<WorkItem>,
}

impl TimelineSnapshot {
    pub fn work_calendar(&self) -> PersistenceResult<WorkCalendar> {
        match &self.calendar {
            Some(config) => Ok(WorkCalendar::from_config(config)?),
            None => Ok(WorkCalendar::default()),
        }
    }
}

pub fn save_snapshot_to_json<P: AsRef<Path>>(
    snapshot: &TimelineSnapshot,
    path: P,
) -> PersistenceResult<()> {
    super::validate_items(&snapshot.items)?;
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, snapshot)?;
    tracing::info!(path = %path.as_ref().display(), items = snapshot.items.len(), "saved snapshot");
    Ok(())
}

pub fn load_snapshot_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<TimelineSnapshot> {
    let file = File::open(path.as_ref())?;
    let snapshot: TimelineSnapshot = serde_json::from_reader(file)?;
    super::validate_items(&snapshot.items)?;
    snapshot.work_calendar()?;
    tracing::info!(path = %path.as_ref().display(), items = snapshot.items.len(), "loaded snapshot");
    Ok(snapshot)
}

pub fn save_attribution_to_json<P: AsRef<Path>>(
    attribution: &TimelineAttribution,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, attribution)?;
    Ok(())
}

#[derive(Default, Serialize, Deserialize)]
struct WorkItemCsvRecord {
    id: String,
    label: String,
    start_date: String,
    end_date: String,
}

impl From<&WorkItem> for WorkItemCsvRecord {
    fn from(item: &WorkItem) -> Self {
        Self {
            id: item.id.clone(),
            label: item.label.clone(),
            start_date: format_date(item.start_date),
            end_date: format_date(item.end_date),
        }
    }
}

impl WorkItemCsvRecord {
    fn into_item(self) -> PersistenceResult<WorkItem> {
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;
        Ok(WorkItem::new(self.id, self.label, start, end))
    }
}

pub fn save_items_to_csv<P: AsRef<Path>>(items: &[WorkItem], path: P) -> PersistenceResult<()> {
    super::validate_items(items)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for item in items {
        writer.serialize(WorkItemCsvRecord::from(item))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_items_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<WorkItem>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut items = Vec::new();
    for record in reader.deserialize::<WorkItemCsvRecord>() {
        items.push(record?.into_item()?);
    }

    if items.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no work items".into(),
        ));
    }

    super::validate_items(&items)?;
    Ok(items)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_date(input: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}
