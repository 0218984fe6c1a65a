pub mod calendar;
pub mod config;
pub mod employee;
pub mod fiscal;
#[cfg(feature = "http_api")]
pub mod http_api;
pub(crate) mod item_validation;
pub mod leave;
pub mod logging;
pub mod persistence;
pub mod progress;
pub mod review;
pub mod status;
pub mod timeline;
pub mod work_item;

pub use calendar::{CalendarError, WorkCalendar, WorkCalendarConfig, count_business_days};
pub use config::{ConfigError, PortalConfig};
pub use employee::{EmployeeProfile, OnboardingFlags, experience_years};
pub use fiscal::{
    AppraisalBuckets, AppraisalKind, AppraisalPlan, AppraisalSelection, FiscalYear,
    FiscalYearParseError, classify_appraisals, fiscal_year_window,
};
pub use item_validation::WorkItemError;
pub use leave::{LeaveMonth, LeaveSummary};
pub use persistence::{
    PersistenceError, TimelineSnapshot, load_items_from_csv, load_snapshot_from_json,
    save_attribution_to_json, save_items_to_csv, save_snapshot_to_json, validate_items,
};
pub use progress::{
    DashboardTaskCounts, ProgressBand, TaskOverview, TaskRecord, filter_assigned_to,
    progress_percent,
};
pub use review::{FinalReview, ReviewError, ReviewSubmission};
pub use status::{ProjectStatus, classify_status};
pub use timeline::{
    AttributionEntry, Category, CategoryBreakdown, ChartSlice, DateSpan, TimelineAttribution,
    build_attribution, build_attribution_with_calendar, in_progress_items,
};
pub use work_item::{ProjectPayload, ProjectsResponse, WorkItem, parse_api_date};
