use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    Clock, ConsultantCapacity, DashboardKpis, EngineError, RevenueForecast, Snapshot,
    SystemClock, TeamId, UtilizationReport, WeekKey, current_year_week, validate_snapshot,
};

#[derive(Clone)]
pub struct AppState {
    snapshot: Arc<RwLock<Snapshot>>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(snapshot: Snapshot) -> Self {
        Self::with_clock(snapshot, Arc::new(SystemClock))
    }

    pub fn with_clock(snapshot: Snapshot, clock: Arc<dyn Clock>) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
            clock,
        }
    }

    pub fn with_shared(snapshot: Arc<RwLock<Snapshot>>, clock: Arc<dyn Clock>) -> Self {
        Self { snapshot, clock }
    }

    fn snapshot(&self) -> Arc<RwLock<Snapshot>> {
        self.snapshot.clone()
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

impl From<EngineError> for ApiError {
    fn from(value: EngineError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct WeekQuery {
    year: i32,
    week: u32,
}

#[derive(Debug, Deserialize)]
struct OptionalWeekQuery {
    year: Option<i32>,
    week: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WeekRangeQuery {
    year_from: i32,
    week_from: u32,
    year_to: i32,
    week_to: u32,
    team_id: Option<TeamId>,
}

#[derive(Debug, Deserialize)]
struct MonthRangeQuery {
    year_from: i32,
    month_from: u32,
    year_to: i32,
    month_to: u32,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/snapshot", get(get_snapshot).put(replace_snapshot))
        .route("/week/current", get(current_week))
        .route("/capacity", get(capacity))
        .route("/utilization", get(utilization))
        .route("/kpis", get(kpis))
        .route("/forecast", get(forecast))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, snapshot: Snapshot) -> std::io::Result<()> {
    let state = AppState::new(snapshot);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_snapshot(State(state): State<AppState>) -> Json<Snapshot> {
    let snapshot = state.snapshot();
    let current = {
        let guard = snapshot.read();
        guard.clone()
    };
    Json(current)
}

async fn replace_snapshot(
    State(state): State<AppState>,
    Json(incoming): Json<Snapshot>,
) -> Result<StatusCode, ApiError> {
    validate_snapshot(&incoming).map_err(|err| ApiError::invalid(err.to_string()))?;
    info!(
        consultants = incoming.consultants.len(),
        allocations = incoming.allocations.len(),
        "snapshot replaced"
    );
    let snapshot = state.snapshot();
    {
        let mut guard = snapshot.write();
        *guard = incoming;
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn current_week(State(state): State<AppState>) -> Json<WeekKey> {
    Json(current_year_week(state.clock.as_ref()))
}

async fn capacity(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<Vec<ConsultantCapacity>>, ApiError> {
    let snapshot = state.snapshot();
    let table = {
        let guard = snapshot.read();
        guard.capacity(query.year, query.week)?
    };
    Ok(Json(table))
}

async fn utilization(
    State(state): State<AppState>,
    Query(query): Query<WeekRangeQuery>,
) -> Result<Json<UtilizationReport>, ApiError> {
    let snapshot = state.snapshot();
    let report = {
        let guard = snapshot.read();
        match query.team_id {
            Some(team_id) => guard.filter_team(team_id).aggregate(
                query.year_from,
                query.week_from,
                query.year_to,
                query.week_to,
            )?,
            None => guard.aggregate(
                query.year_from,
                query.week_from,
                query.year_to,
                query.week_to,
            )?,
        }
    };
    if report.skipped_count > 0 || !report.warnings.is_empty() {
        warn!(
            skipped = report.skipped_count,
            warnings = report.warnings.len(),
            "utilization report is partial"
        );
    }
    Ok(Json(report))
}

async fn kpis(
    State(state): State<AppState>,
    Query(query): Query<OptionalWeekQuery>,
) -> Result<Json<DashboardKpis>, ApiError> {
    let week = match (query.year, query.week) {
        (Some(year), Some(week)) => WeekKey::new(year, week)?,
        (None, None) => current_year_week(state.clock.as_ref()),
        _ => return Err(ApiError::invalid("year and week must be given together")),
    };
    let snapshot = state.snapshot();
    let kpis = {
        let guard = snapshot.read();
        guard.compute_kpis(week)
    };
    Ok(Json(kpis))
}

async fn forecast(
    State(state): State<AppState>,
    Query(query): Query<MonthRangeQuery>,
) -> Result<Json<RevenueForecast>, ApiError> {
    let snapshot = state.snapshot();
    let forecast = {
        let guard = snapshot.read();
        guard.forecast(
            query.year_from,
            query.month_from,
            query.year_to,
            query.month_to,
        )?
    };
    Ok(Json(forecast))
}
