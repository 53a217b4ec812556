//! Crop recommendation and yield prediction models.
//!
//! All models train in-process at startup on seeded synthetic data, so every
//! run of the binary serves identical predictions. Nothing is persisted.

pub mod dataset;
pub mod forest;
pub mod tree;

pub use dataset::{LabelEncoder, Standardizer};
pub use forest::RandomForest;
pub use tree::{ClassificationTree, TreeSettings};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::common::{round1, round2};
use crate::cropdata::ClimateZone;
use crate::farm::{CropRecommendation, FarmParams, YieldPrediction};
use crate::weather::WeatherSnapshot;

const TRAINING_SEED: u64 = 42;
const FOREST_TREES: usize = 24;
const STANDARD_CO2_PPM: f64 = 400.0;
const TOP_RECOMMENDATIONS: usize = 5;

const CROP_TREE_SETTINGS: TreeSettings = TreeSettings {
    max_depth: 10,
    min_samples_split: 5,
};

const FOREST_SETTINGS: TreeSettings = TreeSettings {
    max_depth: 12,
    min_samples_split: 4,
};

/// Trained models plus the encoders and scaler that map farm parameters onto
/// their feature columns.
pub struct FarmAdvisor {
    crop_tree: ClassificationTree,
    crop_classes: Vec<String>,
    zone_encoder: LabelEncoder,
    water_encoder: LabelEncoder,
    light_encoder: LabelEncoder,
    crop_encoder: LabelEncoder,
    scaler: Standardizer,
    yield_forest: RandomForest,
    growth_forest: RandomForest,
}

impl FarmAdvisor {
    /// Generates the synthetic datasets and fits every model. Takes on the
    /// order of a second, run it once at startup.
    pub fn train() -> Self {
        let mut rng = StdRng::seed_from_u64(TRAINING_SEED);

        let crop_samples = dataset::recommendation_samples(&mut rng);
        let zone_encoder =
            LabelEncoder::fit(crop_samples.iter().map(|s| s.climate_zone.as_str()));
        let water_encoder = LabelEncoder::fit(crop_samples.iter().map(|s| s.water.as_str()));
        let light_encoder = LabelEncoder::fit(crop_samples.iter().map(|s| s.light.as_str()));
        let class_encoder = LabelEncoder::fit(crop_samples.iter().map(|s| s.crop));

        let rows: Vec<Vec<f64>> = crop_samples
            .iter()
            .map(|s| {
                vec![
                    zone_encoder.encode(s.climate_zone.as_str()),
                    water_encoder.encode(s.water.as_str()),
                    light_encoder.encode(s.light.as_str()),
                    s.area_size,
                    s.budget_per_sqm,
                    s.temperature,
                    s.humidity,
                ]
            })
            .collect();
        let labels: Vec<usize> = crop_samples
            .iter()
            .map(|s| class_encoder.encode(s.crop) as usize)
            .collect();
        let crop_tree = ClassificationTree::fit(
            &rows,
            &labels,
            class_encoder.classes().len(),
            CROP_TREE_SETTINGS,
        );

        let yield_samples = dataset::yield_samples(&mut rng);
        let crop_encoder = LabelEncoder::fit(yield_samples.iter().map(|s| s.crop));
        let yield_rows: Vec<Vec<f64>> = yield_samples
            .iter()
            .map(|s| {
                vec![
                    crop_encoder.encode(s.crop),
                    s.area_size,
                    s.light_intensity,
                    s.nutrients_level,
                    s.water_frequency,
                    s.temperature,
                    s.humidity,
                    s.co2_level,
                ]
            })
            .collect();
        let scaler = Standardizer::fit(&yield_rows);
        let scaled = scaler.transform(&yield_rows);

        let yields: Vec<f64> = yield_samples.iter().map(|s| s.yield_kg_per_sqm).collect();
        let days: Vec<f64> = yield_samples.iter().map(|s| s.growth_time_days).collect();
        let yield_forest = RandomForest::fit(&scaled, &yields, FOREST_TREES, FOREST_SETTINGS, 43);
        let growth_forest = RandomForest::fit(&scaled, &days, FOREST_TREES, FOREST_SETTINGS, 44);

        info!(
            "Models trained on {} crop samples and {} yield samples",
            crop_samples.len(),
            yield_samples.len()
        );

        Self {
            crop_tree,
            crop_classes: class_encoder.classes().to_vec(),
            zone_encoder,
            water_encoder,
            light_encoder,
            crop_encoder,
            scaler,
            yield_forest,
            growth_forest,
        }
    }

    /// Top five crops for these conditions, ranked by model confidence.
    pub fn recommend_crops(
        &self,
        params: &FarmParams,
        weather: &WeatherSnapshot,
    ) -> Vec<CropRecommendation> {
        let zone = ClimateZone::from_conditions(weather.temp, weather.humidity as f64);
        let features = [
            self.zone_encoder.encode(zone.as_str()),
            self.water_encoder.encode(params.water_availability.as_str()),
            self.light_encoder.encode(params.light_access.as_str()),
            params.area_size,
            params.budget_per_sqm(),
            weather.temp,
            weather.humidity as f64,
        ];

        let probabilities = self.crop_tree.predict_proba(&features);
        let mut ranked: Vec<(usize, f64)> = probabilities.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        ranked
            .into_iter()
            .take(TOP_RECOMMENDATIONS)
            .map(|(index, probability)| CropRecommendation {
                crop: self.crop_classes[index].clone(),
                confidence: round2(probability * 100.0),
                suitability: suitability_level(probability).to_string(),
                yield_data: None,
            })
            .collect()
    }

    /// Yield and growth-time estimate for one crop under these conditions.
    pub fn predict_yield(
        &self,
        crop: &str,
        params: &FarmParams,
        weather: &WeatherSnapshot,
    ) -> YieldPrediction {
        let features = [
            self.crop_encoder.encode(crop),
            params.area_size,
            params.light_access.light_intensity(),
            params.nutrients_level(),
            params.water_availability.water_frequency(),
            weather.temp,
            weather.humidity as f64,
            STANDARD_CO2_PPM,
        ];
        let scaled = self.scaler.transform_row(&features);

        let raw_yield = self.yield_forest.predict(&scaled);
        let raw_days = self.growth_forest.predict(&scaled);

        YieldPrediction {
            yield_kg_per_sqm: round2(raw_yield).max(0.0),
            total_yield_kg: round2(raw_yield * params.area_size).max(0.0),
            growth_time_days: raw_days.round().max(30.0) as i64,
            harvests_per_year: round1(365.0 / raw_days.max(30.0)).max(1.0),
        }
    }
}

fn suitability_level(confidence: f64) -> &'static str {
    if confidence > 0.7 {
        "Excellent"
    } else if confidence > 0.5 {
        "Good"
    } else if confidence > 0.3 {
        "Fair"
    } else {
        "Poor"
    }
}
