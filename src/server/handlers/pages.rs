use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Form,
};
use serde_json::json;
use tracing::error;

use crate::server::app::AppState;
use crate::server::forms::PlanForm;
use crate::services::PlanError;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    render(&state, "index", &json!({ "messages": [] }))
}

pub async fn create_plan(
    State(state): State<AppState>,
    Form(form): Form<PlanForm>,
) -> Result<Html<String>, StatusCode> {
    let params = match form.validate() {
        Ok(params) => params,
        Err(message) => return index_with_error(&state, message),
    };

    match state.plans.create_plan(params).await {
        Ok(report) => render(&state, "plan", &json!({ "plan": report, "messages": [] })),
        Err(PlanError::UnknownLocation(location)) => index_with_error(
            &state,
            &format!("Could not find weather data for location: {}", location),
        ),
        Err(err) => {
            error!("Failed to create farm plan: {}", err);
            index_with_error(
                &state,
                "An error occurred while creating your farm plan. Please try again.",
            )
        }
    }
}

pub async fn view_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, StatusCode> {
    match state.plans.plan_report(id).await {
        Ok(Some(report)) => render(&state, "plan", &json!({ "plan": report, "messages": [] })),
        Ok(None) => history_with_error(&state, "Plan not found or an error occurred.").await,
        Err(err) => {
            error!("Failed to load plan {}: {}", id, err);
            history_with_error(&state, "Plan not found or an error occurred.").await
        }
    }
}

pub async fn history(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    match state.plans.recent_plans().await {
        Ok(plans) => render(&state, "history", &json!({ "plans": plans, "messages": [] })),
        Err(err) => {
            error!("Failed to load plan history: {}", err);
            render(
                &state,
                "history",
                &json!({
                    "plans": [],
                    "messages": [error_message("An error occurred while loading your history.")],
                }),
            )
        }
    }
}

/// Unknown paths get the planning form back, like the rest of the error
/// paths, but with a 404 status.
pub async fn not_found(
    State(state): State<AppState>,
) -> Result<(StatusCode, Html<String>), StatusCode> {
    let body = render(&state, "index", &json!({ "messages": [] }))?;
    Ok((StatusCode::NOT_FOUND, body))
}

fn index_with_error(state: &AppState, message: &str) -> Result<Html<String>, StatusCode> {
    render(
        state,
        "index",
        &json!({ "messages": [error_message(message)] }),
    )
}

async fn history_with_error(state: &AppState, message: &str) -> Result<Html<String>, StatusCode> {
    let plans = state.plans.recent_plans().await.unwrap_or_default();
    render(
        state,
        "history",
        &json!({ "plans": plans, "messages": [error_message(message)] }),
    )
}

fn error_message(text: &str) -> serde_json::Value {
    json!({ "category": "error", "text": text })
}

fn render(
    state: &AppState,
    name: &str,
    data: &serde_json::Value,
) -> Result<Html<String>, StatusCode> {
    state.templates.render(name, data).map(Html).map_err(|err| {
        error!("Failed to render template {}: {}", name, err);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
