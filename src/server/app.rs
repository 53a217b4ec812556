use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use handlebars::Handlebars;
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{api, health, pages};
use super::{assets, templates};
use crate::advisor::FarmAdvisor;
use crate::services::PlanService;
use crate::weather::WeatherService;

#[derive(Clone)]
pub struct AppState {
    pub plans: PlanService,
    pub templates: Arc<Handlebars<'static>>,
}

pub async fn create_app(
    db: DatabaseConnection,
    weather: WeatherService,
    advisor: Arc<FarmAdvisor>,
    cors_origin: Option<&str>,
) -> Result<Router> {
    let templates = Arc::new(templates::get_templates()?);
    let state = AppState {
        plans: PlanService::new(db, weather, advisor),
        templates,
    };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        // HTML pages
        .route("/", get(pages::index))
        .route("/plan", post(pages::create_plan))
        .route("/plan/:id", get(pages::view_plan))
        .route("/history", get(pages::history))
        // JSON API
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        // Embedded assets
        .route("/static/*path", get(assets::serve_static))
        .fallback(pages::not_found)
        // Add middleware
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/weather/:location", get(api::weather))
        .route("/crops/recommend", post(api::recommend))
}
