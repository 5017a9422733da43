//! Read-only REST endpoints exposing onboarding progress to rendering code.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use super::steps::StepId;
use super::tracker::{ProgressTracker, StepView};

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub tracker: Arc<RwLock<ProgressTracker>>,
}

/// GET /api/onboarding/session
///
/// Current step, review mode, percentage and the per-step status table.
async fn get_session(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    Json(state.tracker.read().await.session())
}

/// GET /api/onboarding/steps/{step}
///
/// Status of one step, addressed by wire name, completion key or resource
/// segment. 404 for unknown steps.
async fn get_step(
    State(state): State<OnboardingRouteState>,
    Path(step): Path<String>,
) -> impl IntoResponse {
    let Ok(step) = step.parse::<StepId>() else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("Unknown step: {step}") })),
        )
            .into_response();
    };

    let tracker = state.tracker.read().await;
    let descriptor = step.descriptor();
    Json(StepView {
        id: step,
        title: descriptor.title,
        description: descriptor.description,
        status: tracker.status_of(step),
        navigable: tracker.can_navigate_to(step),
    })
    .into_response()
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/api/onboarding/session", get(get_session))
        .route("/api/onboarding/steps/{step}", get(get_step))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
