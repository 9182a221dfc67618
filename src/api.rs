//! HTTP API for the wage calculator.
//!
//! This module exposes a minimal REST API around the payroll engine
//! using the [`axum`](https://crates.io/crates/axum) framework.  A form
//! front end posts a [`PayrollInput`] and receives either the
//! breakdown or a validation error it can show next to the offending
//! fields.  The policy is loaded once and shared read-only between
//! requests.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::PayrollEngine;
use crate::error::ValidationError;
use crate::models::{CommitmentTier, PayrollBreakdown, PayrollInput, RateLevel};
use crate::policy::PayrollPolicy;
use crate::report::{PayrollReport, ReportLanguage};

/// Application state shared across requests.
pub struct AppState {
    pub policy: PayrollPolicy,
}

/// Error body returned for rejected requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Errors a handler can answer with.  Both render as an [`ErrorBody`].
pub enum ApiError {
    /// The input was read but failed validation: 422 Unprocessable Entity.
    Validation(ValidationError),
    /// The body could not be read as a [`PayrollInput`]; the status is
    /// the one axum chose for the rejection.
    InvalidBody { status: StatusCode, message: String },
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                err.code(),
                err.to_string(),
            ),
            Self::InvalidBody { status, message } => (status, "INVALID_BODY", message),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Unwraps a JSON body, turning axum's plain-text rejection into an
/// [`ApiError`] so every failure has the same shape.
fn extract_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        debug!(status = %rejection.status(), "rejected request body");
        ApiError::from(rejection)
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LevelOption {
    pub level: RateLevel,
    pub label: String,
    pub per_hour: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TierOption {
    pub tier: CommitmentTier,
    pub rate: Decimal,
}

/// The choices a form offers in its dropdowns.
#[derive(Debug, Serialize, Deserialize)]
pub struct FormOptions {
    pub policy: String,
    pub rate_levels: Vec<LevelOption>,
    pub commitment_tiers: Vec<TierOption>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    #[serde(default)]
    pub lang: ReportLanguage,
}

/// Build the API router around the given policy.
pub fn build_router(policy: PayrollPolicy) -> Router {
    let state = Arc::new(AppState { policy });
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/options", get(options_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/report", post(report_handler))
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Handler for GET /api/options
async fn options_handler(State(app_state): State<Arc<AppState>>) -> Json<FormOptions> {
    let policy = &app_state.policy;
    let rate_levels = RateLevel::ALL
        .into_iter()
        .map(|level| LevelOption {
            level,
            label: level.to_string(),
            per_hour: policy.bonus_rates.level_rate(level),
        })
        .collect();
    let commitment_tiers = CommitmentTier::ALL
        .into_iter()
        .map(|tier| TierOption {
            tier,
            rate: tier.rate(),
        })
        .collect();
    Json(FormOptions {
        policy: policy.name.clone(),
        rate_levels,
        commitment_tiers,
    })
}

/// Handler for POST /api/calculate
async fn calculate_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<PayrollInput>, JsonRejection>,
) -> Result<Json<PayrollBreakdown>, ApiError> {
    let input = extract_json(body)?;
    let breakdown = PayrollEngine::new(&app_state.policy).compute(&input)?;
    Ok(Json(breakdown))
}

/// Handler for POST /api/report?lang=en|tr
async fn report_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<ReportParams>,
    body: Result<Json<PayrollInput>, JsonRejection>,
) -> Result<Json<PayrollReport>, ApiError> {
    let input = extract_json(body)?;
    let breakdown = PayrollEngine::new(&app_state.policy).compute(&input)?;
    Ok(Json(PayrollReport::new(&breakdown, params.lang)))
}

/// Launch the API server on `addr`.  Blocks until the server
/// terminates (e.g. when interrupted).
pub async fn serve(addr: &str, policy: PayrollPolicy) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("invalid bind address '{addr}'"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    info!(%addr, policy = %policy.name, "server listening");
    axum::serve(listener, build_router(policy))
        .await
        .context("server error")
}
