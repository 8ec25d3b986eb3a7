//! # API REST
//!
//! REST API for recording patient vitals.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - API key and operator-role checks on every route but `/health`
//!
//! Vitals logic lives in `hms-core`; the AI summary call goes through `hms-assist`.

#![warn(rust_2018_idioms)]

pub mod auth;
pub mod dto;

use axum::{
    extract::{Path as AxumPath, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dto::{
    AssessRes, HealthRes, ListVitalsRes, PatientVitalsReq, RecordVitalsRes, SummaryRes,
    VitalsInputReq,
};
use hms_assist::AssistClient;
use hms_core::vitals::{VitalsEngine, VitalsInput};
use hms_core::{CoreConfig, PatientId, Permission, VitalsStore};

type ApiError = (StatusCode, &'static str);

#[derive(Debug, thiserror::Error)]
pub enum ApiConfigError {
    #[error("API key cannot be empty")]
    EmptyApiKey,
}

/// Settings owned by the REST layer, resolved at startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    api_key: String,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ApiConfigError::EmptyApiKey);
        }
        Ok(Self { api_key })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiConfig>,
    pub core: Arc<CoreConfig>,
    pub store: Arc<dyn VitalsStore>,
    /// `None` when no AI endpoint is configured.
    pub assist: Option<Arc<AssistClient>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, assess_vitals, record_vitals, list_vitals, summarise_vitals),
    components(schemas(
        HealthRes,
        AssessRes,
        RecordVitalsRes,
        ListVitalsRes,
        SummaryRes,
        PatientVitalsReq,
        VitalsInputReq,
        dto::PatientReq,
        dto::RiskFlagsReq,
        dto::CustomVitalReq,
    ))
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/vitals/assess", post(assess_vitals))
        .route(
            "/patients/:patient_id/vitals",
            get(list_vitals).post(record_vitals),
        )
        .route("/patients/:patient_id/vitals/summary", post(summarise_vitals))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn parse_patient_id(raw: &str) -> Result<PatientId, ApiError> {
    PatientId::parse(raw).map_err(|_| (StatusCode::BAD_REQUEST, "Invalid patient id"))
}

fn build_engine(vitals: VitalsInputReq) -> Result<VitalsEngine, ApiError> {
    VitalsInput::from(vitals)
        .to_engine()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid vitals input"))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "HMS REST API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/vitals/assess",
    request_body = VitalsInputReq,
    responses(
        (status = 200, description = "Derived view and validation report", body = AssessRes),
        (status = 400, description = "Invalid vitals input"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Operator role lacks permission")
    )
)]
/// Runs the vitals engine over the input without storing anything.
#[axum::debug_handler]
async fn assess_vitals(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<VitalsInputReq>,
) -> Result<Json<AssessRes>, ApiError> {
    auth::authorise(&headers, state.api.api_key(), Permission::RecordVitals)?;

    let mut engine = build_engine(req)?;
    let report = engine.validate();
    Ok(Json(AssessRes {
        view: engine.view(),
        report,
    }))
}

#[utoipa::path(
    post,
    path = "/patients/{patient_id}/vitals",
    request_body = PatientVitalsReq,
    params(("patient_id" = String, Path, description = "Canonical patient UUID")),
    responses(
        (status = 201, description = "Vitals recorded", body = RecordVitalsRes),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Operator role lacks permission"),
        (status = 422, description = "Vitals failed validation"),
        (status = 500, description = "Internal server error")
    )
)]
/// Validates and stores one vitals record, stamped with the calling operator.
///
/// # Errors
/// Returns `422 Unprocessable Entity` with the validation report when any field is invalid,
/// and `500 Internal Server Error` if the record cannot be written.
#[axum::debug_handler]
async fn record_vitals(
    State(state): State<AppState>,
    AxumPath(patient_id): AxumPath<String>,
    headers: HeaderMap,
    Json(req): Json<PatientVitalsReq>,
) -> Result<Response, ApiError> {
    let operator = auth::authorise(&headers, state.api.api_key(), Permission::RecordVitals)?;
    let patient_id = parse_patient_id(&patient_id)?;
    let patient = req
        .patient
        .into_context(patient_id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid patient details"))?;

    let mut engine = build_engine(req.vitals)?;
    let report = engine.validate();
    if !report.valid {
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(report)).into_response());
    }

    let recorded_by = hms_core::vitals::recorded_by(Some(&operator), &state.core);
    let payload = engine.to_submission_payload(&patient, recorded_by, chrono::Utc::now());
    match state.store.save(&payload).await {
        Ok(record_id) => Ok((
            StatusCode::CREATED,
            Json(RecordVitalsRes {
                record_id: record_id.to_string(),
                payload,
            }),
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Save vitals error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/patients/{patient_id}/vitals",
    params(("patient_id" = String, Path, description = "Canonical patient UUID")),
    responses(
        (status = 200, description = "Stored vitals, oldest first", body = ListVitalsRes),
        (status = 400, description = "Invalid patient id"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Operator role lacks permission"),
        (status = 500, description = "Internal server error")
    )
)]
/// Lists a patient's stored vitals records.
#[axum::debug_handler]
async fn list_vitals(
    State(state): State<AppState>,
    AxumPath(patient_id): AxumPath<String>,
    headers: HeaderMap,
) -> Result<Json<ListVitalsRes>, ApiError> {
    auth::authorise(&headers, state.api.api_key(), Permission::OpdQueue)?;
    let patient_id = parse_patient_id(&patient_id)?;

    match state.store.list(&patient_id).await {
        Ok(records) => Ok(Json(ListVitalsRes { records })),
        Err(e) => {
            tracing::error!("List vitals error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/patients/{patient_id}/vitals/summary",
    request_body = PatientVitalsReq,
    params(("patient_id" = String, Path, description = "Canonical patient UUID")),
    responses(
        (status = 200, description = "AI summary of the vitals", body = SummaryRes),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Operator role lacks permission"),
        (status = 502, description = "AI service failed"),
        (status = 503, description = "AI service not configured")
    )
)]
/// Renders the vitals as a prompt and asks the AI collaborator for a summary.
#[axum::debug_handler]
async fn summarise_vitals(
    State(state): State<AppState>,
    AxumPath(patient_id): AxumPath<String>,
    headers: HeaderMap,
    Json(req): Json<PatientVitalsReq>,
) -> Result<Json<SummaryRes>, ApiError> {
    auth::authorise(&headers, state.api.api_key(), Permission::RequestAiSummary)?;
    let patient_id = parse_patient_id(&patient_id)?;
    let patient = req
        .patient
        .into_context(patient_id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid patient details"))?;

    let Some(assist) = state.assist.as_ref() else {
        return Err((StatusCode::SERVICE_UNAVAILABLE, "AI assist is not configured"));
    };

    let engine = build_engine(req.vitals)?;
    let prompt = engine.render_summary(&patient);
    match assist.summarise(&prompt).await {
        Ok(summary) => Ok(Json(SummaryRes { prompt, summary })),
        Err(e) => {
            tracing::warn!("AI summary error: {:?}", e);
            Err((StatusCode::BAD_GATEWAY, "AI summary failed"))
        }
    }
}
