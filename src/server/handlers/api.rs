use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::farm::{FarmParams, LightAccess, WaterAvailability};
use crate::server::app::AppState;
use crate::services::PlanError;
use crate::weather::WeatherError;

pub async fn weather(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> (StatusCode, Json<Value>) {
    match state.plans.weather().current_weather(&location).await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": snapshot })),
        ),
        Err(WeatherError::UnknownLocation(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Location not found" })),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_area")]
    pub area_size: f64,
    #[serde(default = "default_budget")]
    pub budget: f64,
    #[serde(default)]
    pub water_availability: String,
    #[serde(default)]
    pub light_access: String,
}

fn default_area() -> f64 {
    50.0
}

fn default_budget() -> f64 {
    5000.0
}

impl RecommendRequest {
    fn into_params(self) -> FarmParams {
        FarmParams {
            location: self.location,
            area_size: self.area_size,
            budget: self.budget,
            water_availability: WaterAvailability::parse(&self.water_availability)
                .unwrap_or(WaterAvailability::Medium),
            light_access: LightAccess::parse(&self.light_access)
                .unwrap_or(LightAccess::Artificial),
        }
    }
}

/// Returns every scored candidate, without yield details. The full plan
/// pipeline is only run through the form flow.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> (StatusCode, Json<Value>) {
    let params = request.into_params();
    match state.plans.quick_recommendations(&params).await {
        Ok((recommendations, weather)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "recommendations": recommendations,
                "weather_data": weather,
            })),
        ),
        Err(PlanError::UnknownLocation(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Location not found" })),
        ),
        Err(err) => {
            error!("Crop recommendation API error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Internal server error" })),
            )
        }
    }
}
