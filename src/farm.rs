use serde::{Deserialize, Serialize};

/// ## Structure
/// Domain types shared between the advisor, the cost calculator and the
/// presentation layer.
///
/// ```text
/// PlanReport
///   ├── params: FarmParams
///   │   ├── location, area_size, budget
///   │   ├── water_availability: WaterAvailability
///   │   └── light_access: LightAccess
///   ├── weather: WeatherSnapshot          (weather.rs)
///   ├── climate: ClimateReport            (weather.rs)
///   ├── crops: Vec<CropRecommendation>
///   │   └── yield_data: YieldPrediction
///   ├── costs: CostAnalysis               (costs.rs)
///   └── layout: LayoutPlan                (layout.rs)
/// ```

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WaterAvailability {
    Low,
    Medium,
    High,
}

impl WaterAvailability {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Irrigation cycles per day assumed by the yield model.
    pub fn water_frequency(&self) -> f64 {
        match self {
            Self::Low => 2.0,
            Self::Medium => 4.0,
            Self::High => 6.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LightAccess {
    Natural,
    Artificial,
    Hybrid,
}

impl LightAccess {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "natural" => Some(Self::Natural),
            "artificial" => Some(Self::Artificial),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Artificial => "artificial",
            Self::Hybrid => "hybrid",
        }
    }

    /// Approximate PPFD delivered to the canopy for this lighting setup.
    pub fn light_intensity(&self) -> f64 {
        match self {
            Self::Natural => 300.0,
            Self::Artificial => 400.0,
            Self::Hybrid => 500.0,
        }
    }
}

/// Validated planning inputs for one submission.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FarmParams {
    pub location: String,
    pub area_size: f64,
    pub budget: f64,
    pub water_availability: WaterAvailability,
    pub light_access: LightAccess,
}

impl FarmParams {
    pub fn budget_per_sqm(&self) -> f64 {
        self.budget / self.area_size
    }

    /// Nutrient solution grade the budget can sustain, on the 1-10 scale the
    /// yield model was trained against.
    pub fn nutrients_level(&self) -> f64 {
        if self.budget < 1000.0 {
            5.0
        } else if self.budget < 5000.0 {
            7.0
        } else {
            9.0
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CropRecommendation {
    pub crop: String,
    /// Model confidence as a percentage, two decimals.
    pub confidence: f64,
    pub suitability: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yield_data: Option<YieldPrediction>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct YieldPrediction {
    pub yield_kg_per_sqm: f64,
    pub total_yield_kg: f64,
    pub growth_time_days: i64,
    pub harvests_per_year: f64,
}

/// Everything computed for one plan, in the shape the templates and the JSON
/// API consume. The stored row splits this into separate JSON columns.
#[derive(Serialize, Clone, Debug)]
pub struct PlanReport {
    pub plan_id: i32,
    pub params: FarmParams,
    pub weather: crate::weather::WeatherSnapshot,
    pub climate: crate::weather::ClimateReport,
    pub crops: Vec<CropRecommendation>,
    pub costs: crate::costs::CostAnalysis,
    pub layout: crate::layout::LayoutPlan,
    pub created_at: String,
}

/// One row of the history page.
#[derive(Serialize, Clone, Debug)]
pub struct PlanSummary {
    pub id: i32,
    pub location: String,
    pub area_size: f64,
    pub budget: f64,
    pub created_at: String,
    pub top_crops: Vec<String>,
    pub roi_percentage: f64,
    pub profitability_status: String,
}
