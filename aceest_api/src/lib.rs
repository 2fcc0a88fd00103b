#![forbid(unsafe_code)]

//! HTTP layer for the ACEest Fitness workout log.
//!
//! Maps requests onto [`WorkoutStore`] operations and results back onto
//! JSON (or HTML for the view page). The store itself is created by the
//! caller and shared through [`AppState`].

pub mod error;
pub mod view;

use aceest_core::catalog::{DietPlan, ExerciseSuggestion};
use aceest_core::{
    get_reference_catalog, Category, Listing, Progress, Summary, WorkoutInput, WorkoutStore,
};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

pub use error::ApiError;

/// Shared handler state
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub store: Arc<WorkoutStore>,
}

impl AppState {
    pub fn new(store: Arc<WorkoutStore>) -> Self {
        Self { store }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/workouts", get(list_workouts).post(add_workout))
        .route("/summary", get(summary))
        .route("/progress", get(progress))
        .route("/reference/exercises", get(reference_exercises))
        .route("/reference/diet", get(reference_diet))
        .route("/view", get(view_page))
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "ACEest Fitness API is running",
        "docs": [
            "/health",
            "/workouts",
            "/summary",
            "/progress",
            "/reference/exercises",
            "/reference/diet",
            "/view",
        ],
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_workouts(State(state): State<AppState>) -> Json<Listing> {
    Json(state.store.list())
}

async fn add_workout(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if !is_json_content_type(&headers) {
        tracing::warn!("Rejected workout submission without a JSON content type");
        return Err(ApiError::UnsupportedMediaType);
    }

    let input = decode_input(&body)?;
    let (category, entry) = state.store.submit(&input).map_err(|e| {
        tracing::warn!("Rejected workout submission: {}", e);
        ApiError::from(e)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Workout added",
            "category": category,
            "entry": entry,
        })),
    ))
}

async fn summary(State(state): State<AppState>) -> Json<Summary> {
    Json(state.store.summarize())
}

async fn progress(State(state): State<AppState>) -> Json<Progress> {
    Json(state.store.progress())
}

async fn reference_exercises() -> Json<&'static BTreeMap<Category, Vec<ExerciseSuggestion>>> {
    Json(&get_reference_catalog().exercises)
}

async fn reference_diet() -> Json<&'static [DietPlan]> {
    Json(get_reference_catalog().diet.as_slice())
}

async fn view_page(State(state): State<AppState>) -> Html<String> {
    let store = &state.store;
    Html(view::render_page(
        &store.list(),
        &store.summarize(),
        &store.progress(),
    ))
}

/// `application/json` or any `application/*+json` media type
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = value
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn decode_input(body: &[u8]) -> Result<WorkoutInput, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::BadPayload("Request body must be valid JSON".into()))?;

    if !value.is_object() {
        return Err(ApiError::BadPayload(
            "Request body must be a JSON object".into(),
        ));
    }

    serde_json::from_value(value).map_err(|e| ApiError::BadPayload(e.to_string()))
}
