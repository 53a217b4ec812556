pub mod app;
pub mod assets;
pub mod forms;
pub mod handlers;
pub mod templates;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

use std::sync::Arc;

use crate::advisor::FarmAdvisor;
use crate::config::WeatherConfig;
use crate::database::{connection::*, migrations::Migrator};
use crate::weather::WeatherService;
use anyhow::Result;
use sea_orm_migration::prelude::*;
use tracing::{info, warn};

pub async fn start_server(port: u16, database_path: &str, cors_origin: Option<&str>) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    // Run migrations
    Migrator::up(&db, None).await?;
    info!("Database migrations completed");

    let weather_config = WeatherConfig::from_env();
    if !weather_config.has_real_key() {
        warn!("OPENWEATHER_API_KEY is not set, weather lookups fall back to baseline conditions");
    }
    let weather = WeatherService::new(weather_config)?;

    // Models train in-process on startup; nothing is persisted.
    let advisor = Arc::new(FarmAdvisor::train());

    let app = app::create_app(db, weather, advisor, cors_origin).await?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("Pages:");
    info!("  /                           - Farm planning form");
    info!("  /plan/:id                   - Stored plan report");
    info!("  /history                    - Recent plans");
    info!("API Endpoints:");
    info!("  /health                     - Health check");
    info!("  /api/weather/:location      - Current weather lookup");
    info!("  /api/crops/recommend        - Crop recommendations (POST)");
}

pub async fn migrate_database(database_path: &str, direction: MigrateDirection) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(&db, None).await?;
            Migrator::up(&db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}
