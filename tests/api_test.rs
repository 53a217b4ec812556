//! HTTP integration tests
//!
//! Tests for the planning form flow, the rendered pages, and the JSON API.
//! The upstream weather API is replaced by a local stub server.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::Query;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use axum_test::TestServer;
use once_cell::sync::Lazy;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

use vertigrow::advisor::FarmAdvisor;
use vertigrow::config::WeatherConfig;
use vertigrow::database::migrations::Migrator;
use vertigrow::server::app::create_app;
use vertigrow::weather::WeatherService;

/// Training is deterministic, so one advisor is shared across all tests.
static ADVISOR: Lazy<Arc<FarmAdvisor>> = Lazy::new(|| Arc::new(FarmAdvisor::train()));

/// Locations the stub weather API reports as unknown.
const UNKNOWN_LOCATIONS: &[&str] = &["Atlantis", ""];

async fn stub_weather(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let location = params.get("q").cloned().unwrap_or_default();
    if UNKNOWN_LOCATIONS.contains(&location.as_str()) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "cod": "404", "message": "city not found" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "name": location,
            "sys": { "country": "NL", "sunrise": 1_700_000_000i64, "sunset": 1_700_040_000i64 },
            "main": {
                "temp": 21.5,
                "feels_like": 21.0,
                "temp_min": 19.0,
                "temp_max": 24.0,
                "humidity": 60,
                "pressure": 1012
            },
            "weather": [{ "description": "scattered clouds", "main": "Clouds" }],
            "wind": { "speed": 4.2 },
            "clouds": { "all": 40 },
            "visibility": 9000,
            "timezone": 3600
        })),
    )
}

async fn spawn_weather_stub() -> Result<String> {
    let app = Router::new().route("/weather", get(stub_weather));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Ok(format!("http://{}", addr))
}

/// Create a test server with an isolated database and a stubbed weather API
async fn setup_test_server() -> Result<(TestServer, NamedTempFile)> {
    let base_url = spawn_weather_stub().await?;

    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());
    let db = Database::connect(&db_url).await?;
    Migrator::up(&db, None).await?;

    let weather = WeatherService::new(WeatherConfig::new("test-key", base_url.as_str()))?;
    let app = create_app(db, weather, ADVISOR.clone(), Some("*")).await?;
    let server = TestServer::new(app)?;

    Ok((server, temp_file))
}

fn valid_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("location", "Rotterdam"),
        ("area_size", "100"),
        ("budget", "10000"),
        ("water_availability", "high"),
        ("light_access", "hybrid"),
    ]
}

#[tokio::test]
async fn test_index_renders_planning_form() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let html = response.text();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("VertiGrow AI"));
    assert!(html.contains("id=\"farm-plan-form\""));
    assert!(html.contains("name=\"location\""));
    assert!(html.contains("name=\"area_size\""));
    assert!(html.contains("name=\"budget\""));
    assert!(html.contains("Generate Farm Plan"));

    Ok(())
}

#[tokio::test]
async fn test_create_plan_renders_full_report() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.post("/plan").form(&valid_form()).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let html = response.text();
    assert!(html.contains("Plan #1"));
    assert!(html.contains("Rotterdam"));

    // Stub weather values rendered verbatim
    assert!(html.contains("21.5"));
    assert!(html.contains("60%"));
    assert!(html.contains("scattered clouds"));

    // Top three recommendations, each carrying yield details
    assert_eq!(html.matches("crop-card").count(), 3);
    assert!(html.contains("days to harvest"));

    // Cost, ROI and layout sections
    assert!(html.contains("Setup Costs"));
    assert!(html.contains("Monthly Operations"));
    assert!(html.contains("Return on Investment"));
    assert!(html.contains("window.cashFlowData"));
    assert!(html.contains("Infrastructure"));

    Ok(())
}

#[tokio::test]
async fn test_create_plan_rejects_bad_numbers_before_location() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    // Both the location and the numbers are bad; the numeric message wins.
    let response = server
        .post("/plan")
        .form(&vec![
            ("location", ""),
            ("area_size", "abc"),
            ("budget", "1000"),
            ("water_availability", "medium"),
            ("light_access", "artificial"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Please enter valid numeric values for area size and budget."));
    assert!(html.contains("alert-danger"));
    assert!(html.contains("id=\"farm-plan-form\""));

    Ok(())
}

#[tokio::test]
async fn test_create_plan_rejects_blank_location() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server
        .post("/plan")
        .form(&vec![
            ("location", "   "),
            ("area_size", "50"),
            ("budget", "1000"),
            ("water_availability", "medium"),
            ("light_access", "artificial"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Please enter a valid location."));

    Ok(())
}

#[tokio::test]
async fn test_create_plan_rejects_non_positive_values() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server
        .post("/plan")
        .form(&vec![
            ("location", "Oslo"),
            ("area_size", "0"),
            ("budget", "1000"),
            ("water_availability", "medium"),
            ("light_access", "artificial"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response
        .text()
        .contains("Please enter valid area size and budget."));

    Ok(())
}

#[tokio::test]
async fn test_create_plan_reports_unknown_location() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server
        .post("/plan")
        .form(&vec![
            ("location", "Atlantis"),
            ("area_size", "100"),
            ("budget", "10000"),
            ("water_availability", "high"),
            ("light_access", "hybrid"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Could not find weather data for location: Atlantis"));
    assert!(html.contains("id=\"farm-plan-form\""));

    Ok(())
}

#[tokio::test]
async fn test_view_plan_roundtrip_and_missing_plan() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    server.post("/plan").form(&valid_form()).await;

    let response = server.get("/plan/1").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Plan #1"));
    assert!(html.contains("Rotterdam"));
    assert!(html.contains("Setup Costs"));

    // Unknown ids land on the history page with an explanation
    let response = server.get("/plan/999").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Plan not found or an error occurred."));
    assert!(html.contains("Rotterdam"));

    Ok(())
}

#[tokio::test]
async fn test_history_lists_recent_plans() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/history").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("No farm plans yet"));

    server.post("/plan").form(&valid_form()).await;

    let response = server.get("/history").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Rotterdam"));
    assert!(html.contains("/plan/1"));
    assert!(!html.contains("No farm plans yet"));

    Ok(())
}

#[tokio::test]
async fn test_weather_api() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/api/weather/Rotterdam").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["location"], "Rotterdam");
    assert_eq!(body["data"]["temp"], 21.5);
    assert_eq!(body["data"]["humidity"], 60);
    assert_eq!(body["data"]["is_default"], false);

    let response = server.get("/api/weather/Atlantis").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Location not found");

    Ok(())
}

#[tokio::test]
async fn test_crop_recommendation_api() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let payload = json!({ "location": "Rotterdam", "area_size": 80.0, "budget": 6000.0 });
    let response = server.post("/api/crops/recommend").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["weather_data"]["location"], "Rotterdam");

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 5);
    for rec in recommendations {
        assert!(rec["crop"].is_string());
        assert!(rec["confidence"].is_number());
        assert!(rec["suitability"].is_string());
        // Yield details are only computed in the full form flow
        assert!(rec.get("yield_data").is_none());
    }

    // Ranked by confidence
    let first = recommendations[0]["confidence"].as_f64().unwrap();
    let last = recommendations[4]["confidence"].as_f64().unwrap();
    assert!(first >= last);

    Ok(())
}

#[tokio::test]
async fn test_crop_recommendation_api_defaults() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    // Area, budget and resource levels all have defaults
    let response = server
        .post("/api/crops/recommend")
        .json(&json!({ "location": "Delft" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["weather_data"]["location"], "Delft");
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 5);

    // Without a location the upstream lookup fails
    let response = server.post("/api/crops/recommend").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Location not found");

    Ok(())
}

#[tokio::test]
async fn test_malformed_api_body_is_a_client_error() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server
        .post("/api/crops/recommend")
        .content_type("application/json")
        .text("not json")
        .await;

    assert!(response.status_code().is_client_error());

    Ok(())
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "vertigrow");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_embedded_static_assets() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/static/js/app.js").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let headers = response.headers();
    let content_type = headers.get("content-type").unwrap().to_str()?;
    assert!(content_type.starts_with("application/javascript"));
    assert!(response.text().contains("validateForm"));

    let response = server.get("/static/css/style.css").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let headers = response.headers();
    let content_type = headers.get("content-type").unwrap().to_str()?;
    assert!(content_type.starts_with("text/css"));

    let response = server.get("/static/js/missing.js").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_unknown_path_returns_planner_with_404() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/definitely/not/here").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.text().contains("id=\"farm-plan-form\""));

    Ok(())
}

#[tokio::test]
async fn test_cors_headers() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://localhost:3001"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    // CORS headers should be present
    let headers = response.headers();
    assert!(headers.get("access-control-allow-origin").is_some());

    Ok(())
}
