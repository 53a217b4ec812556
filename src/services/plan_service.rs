use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};
use thiserror::Error;
use tracing::{error, info};

use crate::advisor::FarmAdvisor;
use crate::costs;
use crate::database::entities::farm_plans;
use crate::farm::{CropRecommendation, FarmParams, PlanReport, PlanSummary};
use crate::layout;
use crate::weather::{climate_advice, WeatherError, WeatherService, WeatherSnapshot};

/// How many recommendations get the full yield, cost and layout treatment.
const DETAILED_RECOMMENDATIONS: usize = 3;
/// History page depth.
const HISTORY_LIMIT: u64 = 20;

const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("could not find weather data for location: {0}")]
    UnknownLocation(String),
    #[error("plan {0} has no stored report data")]
    IncompleteRecord(i32),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<WeatherError> for PlanError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::UnknownLocation(location) => PlanError::UnknownLocation(location),
        }
    }
}

/// Runs the full planning pipeline and owns plan persistence.
#[derive(Clone)]
pub struct PlanService {
    db: DatabaseConnection,
    weather: WeatherService,
    advisor: Arc<FarmAdvisor>,
}

impl PlanService {
    pub fn new(db: DatabaseConnection, weather: WeatherService, advisor: Arc<FarmAdvisor>) -> Self {
        Self {
            db,
            weather,
            advisor,
        }
    }

    /// Build, persist and return a full plan for the submitted parameters.
    ///
    /// The advisor scores all candidate crops but only the top three are
    /// carried into yield prediction, costing and layout.
    pub async fn create_plan(&self, params: FarmParams) -> Result<PlanReport, PlanError> {
        let weather = self.weather.current_weather(&params.location).await?;
        let climate = climate_advice(&weather);

        let mut crops = self.advisor.recommend_crops(&params, &weather);
        crops.truncate(DETAILED_RECOMMENDATIONS);
        for rec in &mut crops {
            rec.yield_data = Some(self.advisor.predict_yield(&rec.crop, &params, &weather));
        }

        let costs = costs::analyze(&params, &crops);
        let layout = layout::suggest_layout(&params, &crops);

        let row = farm_plans::ActiveModel {
            location: Set(params.location.clone()),
            area_size: Set(params.area_size),
            budget: Set(params.budget),
            water_availability: Set(params.water_availability.as_str().to_string()),
            light_access: Set(params.light_access.as_str().to_string()),
            recommended_crops: Set(Some(serde_json::to_string(&crops)?)),
            cost_analysis: Set(Some(serde_json::to_string(&costs)?)),
            layout_suggestions: Set(Some(serde_json::to_string(&layout)?)),
            weather_data: Set(Some(serde_json::to_string(&weather)?)),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        let saved = row.insert(&self.db).await?;
        info!("Created farm plan {} for {}", saved.id, saved.location);

        Ok(PlanReport {
            plan_id: saved.id,
            params,
            weather,
            climate,
            crops,
            costs,
            layout,
            created_at: saved.created_at.format(CREATED_AT_FORMAT).to_string(),
        })
    }

    /// Reload a stored plan. Climate advice is recomputed from the stored
    /// weather snapshot rather than persisted.
    pub async fn plan_report(&self, id: i32) -> Result<Option<PlanReport>, PlanError> {
        let Some(row) = farm_plans::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let params = row.get_params().ok_or(PlanError::IncompleteRecord(id))?;
        let crops = row.get_crops()?;
        let costs = row.get_costs()?.ok_or(PlanError::IncompleteRecord(id))?;
        let layout = row.get_layout()?.ok_or(PlanError::IncompleteRecord(id))?;
        let weather = row.get_weather()?.ok_or(PlanError::IncompleteRecord(id))?;
        let climate = climate_advice(&weather);

        Ok(Some(PlanReport {
            plan_id: row.id,
            params,
            weather,
            climate,
            crops,
            costs,
            layout,
            created_at: row.created_at.format(CREATED_AT_FORMAT).to_string(),
        }))
    }

    /// Newest plans first, trimmed to the history page depth. Rows with
    /// unreadable stored data degrade to their scalar columns instead of
    /// failing the whole listing.
    pub async fn recent_plans(&self) -> Result<Vec<PlanSummary>, PlanError> {
        let rows = farm_plans::Entity::find()
            .order_by_desc(farm_plans::Column::CreatedAt)
            .limit(HISTORY_LIMIT)
            .all(&self.db)
            .await?;

        Ok(rows.iter().map(summarize).collect())
    }

    /// Recommendations for the JSON API. All candidates are returned and
    /// none carry yield data.
    pub async fn quick_recommendations(
        &self,
        params: &FarmParams,
    ) -> Result<(Vec<CropRecommendation>, WeatherSnapshot), PlanError> {
        let weather = self.weather.current_weather(&params.location).await?;
        let crops = self.advisor.recommend_crops(params, &weather);
        Ok((crops, weather))
    }

    pub fn weather(&self) -> &WeatherService {
        &self.weather
    }
}

fn summarize(row: &farm_plans::Model) -> PlanSummary {
    let top_crops = row
        .get_crops()
        .unwrap_or_default()
        .into_iter()
        .take(3)
        .map(|rec| rec.crop)
        .collect();
    let roi = row
        .get_costs()
        .ok()
        .flatten()
        .map(|analysis| analysis.roi);

    PlanSummary {
        id: row.id,
        location: row.location.clone(),
        area_size: row.area_size,
        budget: row.budget,
        created_at: row.created_at.format(CREATED_AT_FORMAT).to_string(),
        top_crops,
        roi_percentage: roi.as_ref().map_or(0.0, |roi| roi.roi_percentage),
        profitability_status: roi
            .map_or_else(|| "Unknown".to_string(), |roi| roi.profitability_status),
    }
}
