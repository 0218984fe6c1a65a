use crate::calendar::CalendarError;
use crate::item_validation::{self, WorkItemError};
use crate::work_item::WorkItem;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid work item: {0}")]
    InvalidItem(#[from] WorkItemError),
    #[error("invalid calendar: {0}")]
    InvalidCalendar(#[from] CalendarError),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub fn validate_items(items: &[WorkItem]) -> PersistenceResult<()> {
    item_validation::validate_item_collection(items)?;
    Ok(())
}

pub mod file;

pub use file::{
    TimelineSnapshot, load_items_from_csv, load_snapshot_from_json, save_attribution_to_json,
    save_items_to_csv, save_snapshot_to_json,
};
