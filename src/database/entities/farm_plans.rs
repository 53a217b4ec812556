use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::costs::CostAnalysis;
use crate::farm::{CropRecommendation, FarmParams, LightAccess, WaterAvailability};
use crate::layout::LayoutPlan;
use crate::weather::WeatherSnapshot;

/// One saved farm plan. The computed report sections are stored as JSON
/// text columns so the row stays readable with plain SQL tooling.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "farm_plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub location: String,
    pub area_size: f64,
    pub budget: f64,
    pub water_availability: String,
    pub light_access: String,
    pub recommended_crops: Option<String>,
    pub cost_analysis: Option<String>,
    pub layout_suggestions: Option<String>,
    pub weather_data: Option<String>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Rebuild the submitted parameters from the scalar columns. Returns
    /// None if the stored water or light level is no longer a known value.
    pub fn get_params(&self) -> Option<FarmParams> {
        Some(FarmParams {
            location: self.location.clone(),
            area_size: self.area_size,
            budget: self.budget,
            water_availability: WaterAvailability::parse(&self.water_availability)?,
            light_access: LightAccess::parse(&self.light_access)?,
        })
    }

    /// Parse the stored recommendations, treating a null column as empty.
    pub fn get_crops(&self) -> Result<Vec<CropRecommendation>, serde_json::Error> {
        match self.recommended_crops.as_deref() {
            Some(raw) => serde_json::from_str(raw),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_costs(&self) -> Result<Option<CostAnalysis>, serde_json::Error> {
        self.cost_analysis
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
    }

    pub fn get_layout(&self) -> Result<Option<LayoutPlan>, serde_json::Error> {
        self.layout_suggestions
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
    }

    pub fn get_weather(&self) -> Result<Option<WeatherSnapshot>, serde_json::Error> {
        self.weather_data
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
    }
}
