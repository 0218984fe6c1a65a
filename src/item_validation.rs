use crate::work_item::WorkItem;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkItemError {
    #[error("work item requires a non-empty id")]
    MissingId,
    #[error("work item {id} ends on {end} before it starts on {start}")]
    EndBeforeStart {
        id: String,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    #[error("duplicate work item id {0}")]
    DuplicateId(String),
    #[error("invalid date '{input}' for {field}")]
    InvalidDate { field: &'static str, input: String },
}

pub fn validate_item(item: &WorkItem) -> Result<(), WorkItemError> {
    if item.id.trim().is_empty() {
        return Err(WorkItemError::MissingId);
    }
    if item.start_date > item.end_date {
        return Err(WorkItemError::EndBeforeStart {
            id: item.id.clone(),
            start: item.start_date,
            end: item.end_date,
        });
    }
    Ok(())
}

pub fn validate_item_collection(items: &[WorkItem]) -> Result<(), WorkItemError> {
    let mut seen_ids = HashSet::with_capacity(items.len());
    for item in items {
        if !seen_ids.insert(item.id.as_str()) {
            return Err(WorkItemError::DuplicateId(item.id.clone()));
        }
        validate_item(item)?;
    }
    Ok(())
}
