//! Synthetic training data for the crop and yield models, drawn from the
//! growing profiles in [`crate::cropdata`].

use rand::rngs::StdRng;
use rand::Rng;

use crate::cropdata::{ClimateZone, CLIMATE_ZONES, CROP_PROFILES, YIELD_PROFILES};
use crate::farm::{LightAccess, WaterAvailability};

const WATER_LEVELS: &[WaterAvailability] = &[
    WaterAvailability::Low,
    WaterAvailability::Medium,
    WaterAvailability::High,
];

const LIGHT_TYPES: &[LightAccess] = &[
    LightAccess::Natural,
    LightAccess::Artificial,
    LightAccess::Hybrid,
];

const POSITIVE_PER_CROP: usize = 50;
const NEGATIVE_PER_CROP: usize = 15;
const CROSS_SAMPLES: usize = 200;
const YIELD_PER_CROP: usize = 100;

/// One labelled row for the crop recommender.
pub struct CropSample {
    pub climate_zone: ClimateZone,
    pub water: WaterAvailability,
    pub light: LightAccess,
    pub area_size: f64,
    pub budget_per_sqm: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub crop: &'static str,
}

/// One labelled row for the yield and growth-time regressors.
pub struct YieldSample {
    pub crop: &'static str,
    pub area_size: f64,
    pub light_intensity: f64,
    pub nutrients_level: f64,
    pub water_frequency: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub co2_level: f64,
    pub yield_kg_per_sqm: f64,
    pub growth_time_days: f64,
}

fn pick<T: Copy>(rng: &mut StdRng, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// Suitable, unsuitable, and fully random rows for every crop profile.
pub fn recommendation_samples(rng: &mut StdRng) -> Vec<CropSample> {
    let mut samples = Vec::new();

    for profile in CROP_PROFILES {
        for _ in 0..POSITIVE_PER_CROP {
            samples.push(CropSample {
                climate_zone: pick(rng, profile.preferred_climate),
                water: pick(rng, profile.water_needs),
                light: pick(rng, profile.light_tolerance),
                area_size: rng.gen_range(profile.min_area..200.0),
                budget_per_sqm: rng.gen_range(profile.min_budget_per_sqm..1000.0),
                temperature: rng.gen_range(profile.temp_range.0..profile.temp_range.1),
                humidity: rng.gen_range(
                    profile.humidity_range.0 as i64..=profile.humidity_range.1 as i64,
                ) as f64,
                crop: profile.name,
            });
        }

        let other_zones: Vec<ClimateZone> = CLIMATE_ZONES
            .iter()
            .copied()
            .filter(|zone| !profile.preferred_climate.contains(zone))
            .collect();
        let other_water: Vec<WaterAvailability> = WATER_LEVELS
            .iter()
            .copied()
            .filter(|water| !profile.water_needs.contains(water))
            .collect();

        for _ in 0..NEGATIVE_PER_CROP {
            let light = if profile.light_tolerance.contains(&LightAccess::Natural) {
                pick(rng, LIGHT_TYPES)
            } else {
                LightAccess::Natural
            };
            let temperature = if rng.gen_bool(0.5) {
                rng.gen_range(5.0..profile.temp_range.0 - 2.0)
            } else {
                rng.gen_range(profile.temp_range.1 + 3.0..35.0)
            };

            samples.push(CropSample {
                climate_zone: pick(rng, &other_zones),
                water: pick(rng, &other_water),
                light,
                area_size: rng.gen_range(1.0..300.0),
                budget_per_sqm: rng.gen_range(50.0..profile.min_budget_per_sqm * 0.8),
                temperature,
                humidity: rng.gen_range(20..=95) as f64,
                crop: profile.name,
            });
        }
    }

    // Unconstrained rows keep the tree from memorizing the profile grid.
    for _ in 0..CROSS_SAMPLES {
        samples.push(CropSample {
            climate_zone: pick(rng, CLIMATE_ZONES),
            water: pick(rng, WATER_LEVELS),
            light: pick(rng, LIGHT_TYPES),
            area_size: rng.gen_range(1.0..500.0),
            budget_per_sqm: rng.gen_range(50.0..1000.0),
            temperature: rng.gen_range(5.0..35.0),
            humidity: rng.gen_range(20..=95) as f64,
            crop: pick(
                rng,
                &CROP_PROFILES.iter().map(|p| p.name).collect::<Vec<_>>(),
            ),
        });
    }

    samples
}

/// Rows for the yield regressors, with targets computed from each crop's
/// response curve plus noise.
pub fn yield_samples(rng: &mut StdRng) -> Vec<YieldSample> {
    let mut samples = Vec::new();

    for profile in YIELD_PROFILES {
        for _ in 0..YIELD_PER_CROP {
            let area_size = rng.gen_range(1.0..200.0);
            let light_intensity = rng.gen_range(200.0..600.0);
            let nutrients_level = rng.gen_range(1..=10) as f64;
            let water_frequency = rng.gen_range(1..=8) as f64;
            let temperature = rng.gen_range(15.0..30.0);
            let humidity = rng.gen_range(40..=85) as f64;
            let co2_level = rng.gen_range(350..=1200) as f64;

            let light_factor = (1.0
                + profile.light_sensitivity * ((light_intensity - 400.0) / 400.0))
                .clamp(0.3, 2.0);
            let nutrient_factor =
                0.5 + (nutrients_level / 10.0) * 0.7 * profile.nutrient_sensitivity;
            let water_factor = (1.0
                + profile.water_sensitivity * ((water_frequency - 4.0) / 4.0))
                .clamp(0.4, 1.8);
            let temp_factor = (1.0 - (temperature - profile.optimal_temp).abs() / 10.0).max(0.5);
            let humidity_factor =
                (1.0 - (humidity - profile.optimal_humidity).abs() / 30.0).max(0.6);
            let co2_factor = (co2_level / 400.0).min(1.5);

            let modifier = light_factor
                * nutrient_factor
                * water_factor
                * temp_factor
                * humidity_factor
                * co2_factor;
            let noise = rng.gen_range(-profile.yield_variance..profile.yield_variance);
            let final_yield = (profile.base_yield_per_sqm * modifier + noise).max(0.1);

            let temp_growth =
                (1.0 - (temperature - profile.optimal_temp) / 20.0).clamp(0.7, 1.3);
            let light_growth = (400.0 / light_intensity).clamp(0.8, 1.2);
            let nutrient_growth = (1.0 - (nutrients_level - 5.0) / 10.0).clamp(0.9, 1.1);
            let growth_noise = rng.gen_range(-profile.growth_variance..profile.growth_variance);
            let final_days = (profile.base_growth_days * temp_growth * light_growth * nutrient_growth
                + growth_noise)
                .max(10.0);

            samples.push(YieldSample {
                crop: profile.name,
                area_size,
                light_intensity,
                nutrients_level,
                water_frequency,
                temperature,
                humidity,
                co2_level,
                yield_kg_per_sqm: (final_yield * 100.0).round() / 100.0,
                growth_time_days: final_days.round(),
            });
        }
    }

    samples
}

/// Maps categorical values onto dense indices, sorted lexicographically.
/// Unknown values encode to 0.
#[derive(Clone, Debug)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = values.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn encode(&self, value: &str) -> f64 {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .map(|index| index as f64)
            .unwrap_or(0.0)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// Per-column zero-mean unit-variance scaling fitted on the training rows.
#[derive(Clone, Debug)]
pub struct Standardizer {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl Standardizer {
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let columns = rows.first().map_or(0, |row| row.len());
        let count = rows.len() as f64;

        let mut means = vec![0.0; columns];
        for row in rows {
            for (mean, value) in means.iter_mut().zip(row) {
                *mean += value;
            }
        }
        for mean in &mut means {
            *mean /= count;
        }

        let mut stds = vec![0.0; columns];
        for row in rows {
            for ((std, value), mean) in stds.iter_mut().zip(row).zip(&means) {
                *std += (value - mean) * (value - mean);
            }
        }
        for std in &mut stds {
            *std = (*std / count).sqrt();
            // Constant columns pass through unscaled.
            if *std == 0.0 {
                *std = 1.0;
            }
        }

        Self { means, stds }
    }

    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.stds))
            .map(|(value, (mean, std))| (value - mean) / std)
            .collect()
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }
}
