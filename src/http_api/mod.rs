use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    AppraisalPlan, AppraisalSelection, ChartSlice, DashboardTaskCounts, FiscalYear,
    TaskOverview, TaskRecord, TimelineAttribution, WorkCalendar, WorkCalendarConfig, WorkItem,
    build_attribution_with_calendar, filter_assigned_to, fiscal_year_window, parse_api_date,
    validate_items,
};

#[derive(Clone)]
pub struct AppState {
    calendar: Arc<RwLock<WorkCalendar>>,
}

impl AppState {
    pub fn new(calendar: WorkCalendar) -> Self {
        Self {
            calendar: Arc::new(RwLock::new(calendar)),
        }
    }

    fn calendar(&self) -> Arc<RwLock<WorkCalendar>> {
        self.calendar.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                tracing::warn!("rejected request: {message}");
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

/// Requests may pin `today`; otherwise the server's local date is used.
fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}

#[derive(Debug, Deserialize)]
struct BusinessDaysRequest {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct TimelineRequest {
    items: Vec<WorkItem>,
    #[serde(default)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub today: NaiveDate,
    pub chart: Vec<ChartSlice>,
    pub attribution: TimelineAttribution,
}

#[derive(Debug, Deserialize)]
struct TodayQuery {
    #[serde(default)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FiscalYearView {
    pub start_year: i32,
    pub label: String,
}

impl From<FiscalYear> for FiscalYearView {
    fn from(fy: FiscalYear) -> Self {
        Self {
            start_year: fy.start_year(),
            label: fy.label(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FiscalWindowResponse {
    pub current: FiscalYearView,
    pub window: Vec<FiscalYearView>,
}

#[derive(Debug, Deserialize)]
struct AppraisalRequest {
    /// Raw `dateOfJoining` from the employee record.
    #[serde(default)]
    join_date: Option<String>,
    #[serde(default)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppraisalResponse {
    pub current: FiscalYearView,
    pub project_end: Vec<FiscalYearView>,
    pub year_end: Vec<FiscalYearView>,
    pub selection: AppraisalSelection,
}

#[derive(Debug, Deserialize)]
struct TaskOverviewRequest {
    tasks: Vec<TaskRecord>,
    #[serde(default)]
    employee_id: Option<String>,
    #[serde(default)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskOverviewResponse {
    pub overview: TaskOverview,
    pub dashboard: DashboardTaskCounts,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/calendar", get(get_calendar).put(update_calendar))
        .route("/business-days", post(business_days))
        .route("/timeline", post(timeline))
        .route("/fiscal-years", get(fiscal_years))
        .route("/appraisals", post(appraisals))
        .route("/tasks/overview", post(task_overview))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, calendar: WorkCalendar) -> std::io::Result<()> {
    let state = AppState::new(calendar);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "hr-portal HTTP API listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_calendar(State(state): State<AppState>) -> Json<WorkCalendarConfig> {
    let calendar = state.calendar();
    let config = calendar.read().to_config();
    Json(config)
}

async fn update_calendar(
    State(state): State<AppState>,
    Json(config): Json<WorkCalendarConfig>,
) -> Result<Json<WorkCalendarConfig>, ApiError> {
    let updated = WorkCalendar::from_config(&config).map_err(|e| ApiError::invalid(e.to_string()))?;
    let calendar = state.calendar();
    let current = {
        let mut guard = calendar.write();
        *guard = updated;
        guard.to_config()
    };
    Ok(Json(current))
}

async fn business_days(
    State(state): State<AppState>,
    Json(request): Json<BusinessDaysRequest>,
) -> Json<serde_json::Value> {
    let calendar = state.calendar();
    let days = calendar
        .read()
        .count_available_days(request.start, request.end);
    Json(json!({ "days": days }))
}

async fn timeline(
    State(state): State<AppState>,
    Json(request): Json<TimelineRequest>,
) -> Result<Json<TimelineResponse>, ApiError> {
    validate_items(&request.items).map_err(|e| ApiError::invalid(e.to_string()))?;
    let today = resolve_today(request.today);
    let calendar = state.calendar();
    let attribution = {
        let guard = calendar.read();
        build_attribution_with_calendar(&request.items, today, &guard)
    };
    Ok(Json(TimelineResponse {
        today,
        chart: attribution.chart_data(),
        attribution,
    }))
}

async fn fiscal_years(Query(query): Query<TodayQuery>) -> Json<FiscalWindowResponse> {
    let today = resolve_today(query.today);
    Json(FiscalWindowResponse {
        current: FiscalYear::containing(today).into(),
        window: fiscal_year_window(today)
            .into_iter()
            .map(FiscalYearView::from)
            .collect(),
    })
}

async fn appraisals(
    Json(request): Json<AppraisalRequest>,
) -> Result<Json<AppraisalResponse>, ApiError> {
    let join_date = request
        .join_date
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_api_date("join_date", raw))
        .transpose()
        .map_err(|e| ApiError::invalid(e.to_string()))?;
    let plan = AppraisalPlan::new(join_date, resolve_today(request.today));
    let selection = plan.default_selection();
    Ok(Json(AppraisalResponse {
        current: plan.current.into(),
        project_end: plan
            .buckets
            .project_end
            .iter()
            .copied()
            .map(FiscalYearView::from)
            .collect(),
        year_end: plan
            .buckets
            .year_end
            .iter()
            .copied()
            .map(FiscalYearView::from)
            .collect(),
        selection,
    }))
}

async fn task_overview(Json(request): Json<TaskOverviewRequest>) -> Json<TaskOverviewResponse> {
    let today = resolve_today(request.today);
    let overview = match request.employee_id.as_deref() {
        Some(employee_id) => {
            TaskOverview::from_tasks(filter_assigned_to(&request.tasks, employee_id), today)
        }
        None => TaskOverview::from_tasks(&request.tasks, today),
    };
    Json(TaskOverviewResponse {
        overview,
        dashboard: DashboardTaskCounts::from_tasks(&request.tasks, today),
    })
}
