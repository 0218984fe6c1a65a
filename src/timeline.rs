//! Day-by-day attribution of work items for the dashboard timeline chart.
//!
//! Every business day touched by a work item lands in `Completed`,
//! `InProgress` or `Future`. Gaps between consecutive items (sorted by start
//! date) land in `Idle`.
//! Overlapping items are accounted independently, so overlapping days count
//! once per item.

use crate::calendar::WorkCalendar;
use crate::status::{ProjectStatus, classify_status};
use crate::work_item::WorkItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Completed,
    InProgress,
    Idle,
    Future,
}

impl Category {
    /// Chart order.
    pub const ORDERED: [Category; 4] = [
        Category::Completed,
        Category::InProgress,
        Category::Idle,
        Category::Future,
    ];

    pub fn chart_name(&self) -> &'static str {
        match self {
            Category::Completed => "Completed days",
            Category::InProgress => "In Progress days",
            Category::Idle => "Idle days",
            Category::Future => "Future days",
        }
    }
}

/// Inclusive date range shown next to an attribution entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}",
            self.start.format("%a %b %d %Y"),
            self.end.format("%a %b %d %Y")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionEntry {
    /// Work item the days belong to; `None` for idle gaps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<DateSpan>,
    pub days: i64,
}

impl AttributionEntry {
    fn for_item(item: &WorkItem, start: NaiveDate, end: NaiveDate, days: i64) -> Self {
        Self {
            item_id: Some(item.id.clone()),
            label: format!("{}: {} working days", item.label, days),
            range: Some(DateSpan::new(start, end)),
            days,
        }
    }

    fn idle_gap(start: NaiveDate, end: NaiveDate, days: i64) -> Self {
        Self {
            item_id: None,
            label: format!("{days} idle working days"),
            range: Some(DateSpan::new(start, end)),
            days,
        }
    }

    pub fn range_description(&self) -> String {
        self.range
            .map(|span| span.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub total: i64,
    pub entries: Vec<AttributionEntry>,
}

impl CategoryBreakdown {
    fn push(&mut self, entry: AttributionEntry) {
        self.total += entry.days;
        self.entries.push(entry);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineAttribution {
    pub completed: CategoryBreakdown,
    pub in_progress: CategoryBreakdown,
    pub idle: CategoryBreakdown,
    pub future: CategoryBreakdown,
}

impl TimelineAttribution {
    /// Placeholder for an empty item list: the whole chart is idle.
    fn no_items() -> Self {
        let mut attribution = Self::default();
        attribution.idle.push(AttributionEntry {
            item_id: None,
            label: "No items".to_string(),
            range: None,
            days: 1,
        });
        attribution
    }

    pub fn category(&self, category: Category) -> &CategoryBreakdown {
        match category {
            Category::Completed => &self.completed,
            Category::InProgress => &self.in_progress,
            Category::Idle => &self.idle,
            Category::Future => &self.future,
        }
    }

    fn category_mut(&mut self, category: Category) -> &mut CategoryBreakdown {
        match category {
            Category::Completed => &mut self.completed,
            Category::InProgress => &mut self.in_progress,
            Category::Idle => &mut self.idle,
            Category::Future => &mut self.future,
        }
    }

    pub fn total(&self, category: Category) -> i64 {
        self.category(category).total
    }

    pub fn grand_total(&self) -> i64 {
        Category::ORDERED.iter().map(|c| self.total(*c)).sum()
    }

    pub fn chart_data(&self) -> Vec<ChartSlice> {
        Category::ORDERED
            .iter()
            .map(|category| ChartSlice {
                name: category.chart_name().to_string(),
                value: self.total(*category),
            })
            .collect()
    }

    pub fn to_cli_summary(&self) -> String {
        Category::ORDERED
            .iter()
            .map(|category| format!("{}={}", category.chart_name(), self.total(*category)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Attribute business days (Mon-Fri) of `items` relative to `today`.
pub fn build_attribution(items: &[WorkItem], today: NaiveDate) -> TimelineAttribution {
    build_attribution_with_calendar(items, today, &WorkCalendar::default())
}

pub fn build_attribution_with_calendar(
    items: &[WorkItem],
    today: NaiveDate,
    calendar: &WorkCalendar,
) -> TimelineAttribution {
    if items.is_empty() {
        return TimelineAttribution::no_items();
    }

    let mut sorted: Vec<&WorkItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.start_date);

    let mut attribution = TimelineAttribution::default();
    // Running maximum of end dates seen so far, not the previous item's end.
    let mut last_end: Option<NaiveDate> = None;

    for item in sorted {
        let start = item.start_date;
        let end = item.end_date;

        if let Some(gap) = last_end.and_then(|prev| idle_gap(prev, start)) {
            let days = calendar.count_available_days(gap.start, gap.end);
            if days > 0 {
                attribution
                    .idle
                    .push(AttributionEntry::idle_gap(gap.start, gap.end, days));
            }
        }

        let total = calendar.count_available_days(start, end);
        match classify_status(start, end, today) {
            ProjectStatus::Future => attribution
                .category_mut(Category::Future)
                .push(AttributionEntry::for_item(item, start, end, total)),
            ProjectStatus::Completed => attribution
                .category_mut(Category::Completed)
                .push(AttributionEntry::for_item(item, start, end, total)),
            ProjectStatus::InProgress => {
                let elapsed = calendar.count_available_days(start, today);
                let remaining = total - elapsed;
                attribution
                    .completed
                    .push(AttributionEntry::for_item(item, start, today, elapsed));
                if remaining > 0 {
                    if let Some(tomorrow) = today.succ_opt() {
                        attribution
                            .in_progress
                            .push(AttributionEntry::for_item(item, tomorrow, end, remaining));
                    }
                }
            }
        }

        last_end = Some(last_end.map_or(end, |prev| prev.max(end)));
    }

    tracing::debug!(
        items = items.len(),
        %today,
        summary = %attribution.to_cli_summary(),
        "built timeline attribution"
    );
    attribution
}

/// Raw gap strictly between `last_end` and `start`, weekends included.
/// Back-to-back or overlapping ranges have no gap.
fn idle_gap(last_end: NaiveDate, start: NaiveDate) -> Option<DateSpan> {
    let gap_start = last_end.succ_opt()?;
    if start <= gap_start {
        return None;
    }
    let gap_end = start.pred_opt()?;
    Some(DateSpan::new(gap_start, gap_end))
}

/// Items whose range contains `today`, in input order.
pub fn in_progress_items(items: &[WorkItem], today: NaiveDate) -> Vec<&WorkItem> {
    items
        .iter()
        .filter(|item| {
            classify_status(item.start_date, item.end_date, today) == ProjectStatus::InProgress
        })
        .collect()
}
