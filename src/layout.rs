//! Space planning: vertical levels, per-crop area allocation, and a rough
//! bill of infrastructure for the facility.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::common::{round1, round2};
use crate::cropdata::{level_requirement, plant_density};
use crate::farm::{CropRecommendation, FarmParams, LightAccess};

const UTILIZATION_RATE_PCT: i64 = 95;
const WALKWAY_PCT: i64 = 15;
const TOWERS_PER_SQM: f64 = 0.8;
const SQM_PER_IRRIGATION_ZONE: f64 = 25.0;
const SQM_PER_SENSOR: f64 = 20.0;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CropAllocation {
    pub area_sqm: f64,
    pub percentage: f64,
    pub recommended_plants: i64,
    pub growing_levels: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpaceEfficiency {
    pub plants_per_sqm: f64,
    pub yield_density: f64,
    pub utilization_rate: i64,
    pub walkway_percentage: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Infrastructure {
    pub grow_towers: i64,
    pub led_fixtures: i64,
    pub irrigation_zones: i64,
    pub climate_sensors: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub total_area: f64,
    pub vertical_levels: u32,
    pub crop_allocation: IndexMap<String, CropAllocation>,
    pub space_efficiency: SpaceEfficiency,
    pub layout_type: String,
    pub infrastructure_requirements: Infrastructure,
}

/// Builds the layout suggestion for one plan. Higher-confidence crops get a
/// larger share of the floor.
pub fn suggest_layout(params: &FarmParams, recommendations: &[CropRecommendation]) -> LayoutPlan {
    let area = params.area_size;
    let vertical_levels = optimal_levels(area);

    let mut crop_allocation = IndexMap::new();
    if !recommendations.is_empty() {
        let base_area_per_crop = area / recommendations.len() as f64;
        for rec in recommendations {
            let confidence = rec.confidence / 100.0;
            let allocated = base_area_per_crop * (0.8 + 0.4 * confidence);

            crop_allocation.insert(
                rec.crop.clone(),
                CropAllocation {
                    area_sqm: round2(allocated),
                    percentage: round1(allocated / area * 100.0),
                    recommended_plants: (plant_density(&rec.crop) * allocated).round() as i64,
                    growing_levels: level_requirement(&rec.crop).min(vertical_levels),
                },
            );
        }
    }

    LayoutPlan {
        total_area: area,
        vertical_levels,
        space_efficiency: SpaceEfficiency {
            plants_per_sqm: plants_per_sqm(&crop_allocation),
            yield_density: yield_density(recommendations, area),
            utilization_rate: UTILIZATION_RATE_PCT,
            walkway_percentage: WALKWAY_PCT,
        },
        layout_type: layout_type(area).to_string(),
        infrastructure_requirements: Infrastructure {
            grow_towers: (area * TOWERS_PER_SQM).round() as i64,
            led_fixtures: led_fixtures(area, params.light_access),
            irrigation_zones: ((area / SQM_PER_IRRIGATION_ZONE).round() as i64).max(1),
            climate_sensors: ((area / SQM_PER_SENSOR).round() as i64).max(2),
        },
        crop_allocation,
    }
}

fn optimal_levels(area: f64) -> u32 {
    if area < 20.0 {
        3
    } else if area < 50.0 {
        4
    } else if area < 100.0 {
        5
    } else {
        6
    }
}

fn layout_type(area: f64) -> &'static str {
    if area < 30.0 {
        "Compact Vertical"
    } else if area < 100.0 {
        "Standard Multi-Level"
    } else {
        "Industrial Scale"
    }
}

fn plants_per_sqm(allocation: &IndexMap<String, CropAllocation>) -> f64 {
    let total_plants: i64 = allocation.values().map(|a| a.recommended_plants).sum();
    let total_area: f64 = allocation.values().map(|a| a.area_sqm).sum();
    if total_area > 0.0 {
        round1(total_plants as f64 / total_area)
    } else {
        0.0
    }
}

fn yield_density(recommendations: &[CropRecommendation], area: f64) -> f64 {
    let total_annual_yield: f64 = recommendations
        .iter()
        .filter_map(|rec| rec.yield_data.as_ref())
        .map(|y| y.total_yield_kg * y.harvests_per_year)
        .sum();
    if area > 0.0 {
        round2(total_annual_yield / area)
    } else {
        0.0
    }
}

fn led_fixtures(area: f64, light: LightAccess) -> i64 {
    let fixtures_per_sqm = match light {
        LightAccess::Natural => 0.5,
        LightAccess::Hybrid => 0.7,
        LightAccess::Artificial => 1.0,
    };
    (area * fixtures_per_sqm).round() as i64
}
