use std::sync::Arc;

use axum::extract::State;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use spisovka_core::clock::SystemClock;
use spisovka_core::fetcher::HttpFetcher;
use spisovka_core::store::JsonFileStore;
use spisovka_core::{Case, CaseService, CheckReport};

use crate::config::AppConfig;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    service: Arc<CaseService>,
}

impl AppState {
    pub fn from_config(config: Arc<AppConfig>) -> Self {
        let store = Arc::new(JsonFileStore::new(
            config.cases_path.clone(),
            config.last_check_path.clone(),
        ));
        let service = Arc::new(CaseService::new(
            store,
            Arc::new(HttpFetcher::new()),
            Arc::new(SystemClock),
        ));
        Self::new(config, service)
    }

    pub fn new(config: Arc<AppConfig>, service: Arc<CaseService>) -> Self {
        Self { config, service }
    }
}

pub fn app_router(state: AppState) -> Router {
    // One allowed browser origin, with credentials. Wildcards cannot be
    // combined with credentials, so methods and headers mirror the request.
    let cors = CorsLayer::new()
        .allow_origin(state.config.allowed_origin.clone())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/list", get(list_cases))
        .route("/api/last-check", get(last_check))
        .route("/api/add", post(add_case))
        .route("/api/delete", delete(delete_case))
        .route("/api/check-all", get(check_all))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
    })
}

async fn list_cases(State(state): State<AppState>) -> Result<Json<Vec<Case>>, AppError> {
    Ok(Json(state.service.list()?))
}

#[derive(Debug, Serialize)]
struct LastCheckResponse {
    last_check: Option<String>,
}

async fn last_check(State(state): State<AppState>) -> Result<Json<LastCheckResponse>, AppError> {
    Ok(Json(LastCheckResponse {
        last_check: state.service.last_check()?,
    }))
}

#[derive(Debug, Deserialize)]
struct AddCaseRequest {
    url: String,
}

async fn add_case(
    State(state): State<AppState>,
    Json(request): Json<AddCaseRequest>,
) -> Result<Json<Case>, AppError> {
    let case = state.service.add(&request.url).await?;
    Ok(Json(case))
}

#[derive(Debug, Deserialize)]
struct DeleteCaseRequest {
    spisovka: String,
}

#[derive(Debug, Serialize)]
struct DeleteCaseResponse {
    message: &'static str,
}

async fn delete_case(
    State(state): State<AppState>,
    Json(request): Json<DeleteCaseRequest>,
) -> Result<Json<DeleteCaseResponse>, AppError> {
    state.service.delete(&request.spisovka)?;
    Ok(Json(DeleteCaseResponse { message: "Deleted" }))
}

async fn check_all(State(state): State<AppState>) -> Result<Json<Vec<CheckReport>>, AppError> {
    Ok(Json(state.service.check_all().await?))
}
