//! Reference data for the crops the planner knows about.
//!
//! Growing profiles drive the synthetic training sets, the remaining tables
//! feed the cost calculator and the layout planner. Figures follow published
//! vertical-farming suitability and yield studies.

use crate::farm::{LightAccess, WaterAvailability};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClimateZone {
    Cold,
    TemperateHumid,
    TemperateDry,
    TropicalHumid,
    TropicalDry,
}

pub const CLIMATE_ZONES: &[ClimateZone] = &[
    ClimateZone::Cold,
    ClimateZone::TemperateHumid,
    ClimateZone::TemperateDry,
    ClimateZone::TropicalHumid,
    ClimateZone::TropicalDry,
];

impl ClimateZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::TemperateHumid => "temperate_humid",
            Self::TemperateDry => "temperate_dry",
            Self::TropicalHumid => "tropical_humid",
            Self::TropicalDry => "tropical_dry",
        }
    }

    /// Zone bucket for a current-weather reading.
    pub fn from_conditions(temp: f64, humidity: f64) -> Self {
        if temp < 10.0 {
            Self::Cold
        } else if temp < 25.0 {
            if humidity > 70.0 {
                Self::TemperateHumid
            } else {
                Self::TemperateDry
            }
        } else if humidity > 70.0 {
            Self::TropicalHumid
        } else {
            Self::TropicalDry
        }
    }
}

/// Suitability envelope for one crop, used to draw in-range training rows.
pub struct CropProfile {
    pub name: &'static str,
    pub preferred_climate: &'static [ClimateZone],
    pub water_needs: &'static [WaterAvailability],
    pub light_tolerance: &'static [LightAccess],
    pub temp_range: (f64, f64),
    pub humidity_range: (f64, f64),
    pub min_budget_per_sqm: f64,
    pub min_area: f64,
}

/// Yield response curve for one crop, used to draw yield training rows.
pub struct YieldProfile {
    pub name: &'static str,
    /// kg per square meter per harvest under baseline conditions.
    pub base_yield_per_sqm: f64,
    pub yield_variance: f64,
    pub base_growth_days: f64,
    pub growth_variance: f64,
    pub light_sensitivity: f64,
    pub nutrient_sensitivity: f64,
    pub water_sensitivity: f64,
    pub optimal_temp: f64,
    pub optimal_humidity: f64,
}

use ClimateZone::{Cold, TemperateDry, TemperateHumid, TropicalDry, TropicalHumid};
use LightAccess::{Artificial, Hybrid, Natural};
use WaterAvailability::{High, Low, Medium};

pub const CROP_PROFILES: &[CropProfile] = &[
    CropProfile {
        name: "Lettuce",
        preferred_climate: &[TemperateHumid, TemperateDry],
        water_needs: &[Medium, High],
        light_tolerance: &[Natural, Artificial, Hybrid],
        temp_range: (15.0, 25.0),
        humidity_range: (50.0, 70.0),
        min_budget_per_sqm: 200.0,
        min_area: 5.0,
    },
    CropProfile {
        name: "Spinach",
        preferred_climate: &[TemperateHumid, Cold],
        water_needs: &[Medium, High],
        light_tolerance: &[Natural, Artificial, Hybrid],
        temp_range: (12.0, 22.0),
        humidity_range: (60.0, 75.0),
        min_budget_per_sqm: 180.0,
        min_area: 3.0,
    },
    CropProfile {
        name: "Kale",
        preferred_climate: &[TemperateHumid, TemperateDry, Cold],
        water_needs: &[Medium, High],
        light_tolerance: &[Natural, Artificial, Hybrid],
        temp_range: (10.0, 24.0),
        humidity_range: (55.0, 75.0),
        min_budget_per_sqm: 220.0,
        min_area: 4.0,
    },
    CropProfile {
        name: "Herbs",
        preferred_climate: &[TemperateHumid, TemperateDry, TropicalDry],
        water_needs: &[Low, Medium],
        light_tolerance: &[Artificial, Hybrid],
        temp_range: (18.0, 28.0),
        humidity_range: (45.0, 65.0),
        min_budget_per_sqm: 300.0,
        min_area: 2.0,
    },
    CropProfile {
        name: "Microgreens",
        preferred_climate: &[TemperateHumid, TemperateDry, TropicalHumid, TropicalDry],
        water_needs: &[Medium, High],
        light_tolerance: &[Artificial, Hybrid],
        temp_range: (16.0, 26.0),
        humidity_range: (50.0, 80.0),
        min_budget_per_sqm: 400.0,
        min_area: 1.0,
    },
    CropProfile {
        name: "Tomatoes",
        preferred_climate: &[TemperateHumid, TropicalHumid],
        water_needs: &[High],
        light_tolerance: &[Artificial, Hybrid],
        temp_range: (20.0, 28.0),
        humidity_range: (60.0, 75.0),
        min_budget_per_sqm: 500.0,
        min_area: 10.0,
    },
    CropProfile {
        name: "Peppers",
        preferred_climate: &[TropicalHumid, TropicalDry],
        water_needs: &[Medium, High],
        light_tolerance: &[Artificial, Hybrid],
        temp_range: (22.0, 30.0),
        humidity_range: (55.0, 70.0),
        min_budget_per_sqm: 450.0,
        min_area: 8.0,
    },
    CropProfile {
        name: "Cucumbers",
        preferred_climate: &[TemperateHumid, TropicalHumid],
        water_needs: &[High],
        light_tolerance: &[Artificial, Hybrid],
        temp_range: (20.0, 28.0),
        humidity_range: (65.0, 80.0),
        min_budget_per_sqm: 400.0,
        min_area: 12.0,
    },
    CropProfile {
        name: "Strawberries",
        preferred_climate: &[TemperateHumid, TemperateDry],
        water_needs: &[Medium, High],
        light_tolerance: &[Artificial, Hybrid],
        temp_range: (16.0, 24.0),
        humidity_range: (60.0, 75.0),
        min_budget_per_sqm: 600.0,
        min_area: 15.0,
    },
    CropProfile {
        name: "Basil",
        preferred_climate: &[TemperateHumid, TropicalHumid],
        water_needs: &[Medium],
        light_tolerance: &[Artificial, Hybrid],
        temp_range: (18.0, 26.0),
        humidity_range: (50.0, 70.0),
        min_budget_per_sqm: 350.0,
        min_area: 2.0,
    },
];

pub const YIELD_PROFILES: &[YieldProfile] = &[
    YieldProfile {
        name: "Lettuce",
        base_yield_per_sqm: 3.0,
        yield_variance: 0.8,
        base_growth_days: 35.0,
        growth_variance: 10.0,
        light_sensitivity: 1.2,
        nutrient_sensitivity: 1.1,
        water_sensitivity: 1.3,
        optimal_temp: 20.0,
        optimal_humidity: 65.0,
    },
    YieldProfile {
        name: "Spinach",
        base_yield_per_sqm: 2.5,
        yield_variance: 0.6,
        base_growth_days: 30.0,
        growth_variance: 8.0,
        light_sensitivity: 1.1,
        nutrient_sensitivity: 1.2,
        water_sensitivity: 1.4,
        optimal_temp: 20.0,
        optimal_humidity: 65.0,
    },
    YieldProfile {
        name: "Kale",
        base_yield_per_sqm: 2.0,
        yield_variance: 0.5,
        base_growth_days: 40.0,
        growth_variance: 12.0,
        light_sensitivity: 1.0,
        nutrient_sensitivity: 1.3,
        water_sensitivity: 1.2,
        optimal_temp: 20.0,
        optimal_humidity: 65.0,
    },
    YieldProfile {
        name: "Herbs",
        base_yield_per_sqm: 1.5,
        yield_variance: 0.4,
        base_growth_days: 25.0,
        growth_variance: 8.0,
        light_sensitivity: 1.4,
        nutrient_sensitivity: 1.5,
        water_sensitivity: 1.1,
        optimal_temp: 22.0,
        optimal_humidity: 60.0,
    },
    YieldProfile {
        name: "Microgreens",
        base_yield_per_sqm: 4.0,
        yield_variance: 1.0,
        base_growth_days: 12.0,
        growth_variance: 4.0,
        light_sensitivity: 1.6,
        nutrient_sensitivity: 1.3,
        water_sensitivity: 1.5,
        optimal_temp: 22.0,
        optimal_humidity: 70.0,
    },
    YieldProfile {
        name: "Tomatoes",
        base_yield_per_sqm: 8.0,
        yield_variance: 2.0,
        base_growth_days: 75.0,
        growth_variance: 15.0,
        light_sensitivity: 1.8,
        nutrient_sensitivity: 1.7,
        water_sensitivity: 1.6,
        optimal_temp: 25.0,
        optimal_humidity: 65.0,
    },
    YieldProfile {
        name: "Peppers",
        base_yield_per_sqm: 6.0,
        yield_variance: 1.5,
        base_growth_days: 70.0,
        growth_variance: 12.0,
        light_sensitivity: 1.7,
        nutrient_sensitivity: 1.6,
        water_sensitivity: 1.4,
        optimal_temp: 25.0,
        optimal_humidity: 65.0,
    },
    YieldProfile {
        name: "Cucumbers",
        base_yield_per_sqm: 10.0,
        yield_variance: 2.5,
        base_growth_days: 60.0,
        growth_variance: 10.0,
        light_sensitivity: 1.5,
        nutrient_sensitivity: 1.4,
        water_sensitivity: 1.8,
        optimal_temp: 25.0,
        optimal_humidity: 70.0,
    },
    YieldProfile {
        name: "Strawberries",
        base_yield_per_sqm: 5.0,
        yield_variance: 1.2,
        base_growth_days: 90.0,
        growth_variance: 20.0,
        light_sensitivity: 1.4,
        nutrient_sensitivity: 1.8,
        water_sensitivity: 1.5,
        optimal_temp: 25.0,
        optimal_humidity: 65.0,
    },
    YieldProfile {
        name: "Basil",
        base_yield_per_sqm: 2.0,
        yield_variance: 0.5,
        base_growth_days: 28.0,
        growth_variance: 7.0,
        light_sensitivity: 1.3,
        nutrient_sensitivity: 1.4,
        water_sensitivity: 1.2,
        optimal_temp: 22.0,
        optimal_humidity: 60.0,
    },
];

/// Wholesale market price in USD per kg.
pub fn market_price(crop: &str) -> f64 {
    match crop {
        "Lettuce" => 6.50,
        "Spinach" => 8.00,
        "Kale" => 12.00,
        "Herbs" => 25.00,
        "Microgreens" => 35.00,
        "Tomatoes" => 7.50,
        "Peppers" => 9.00,
        "Cucumbers" => 5.50,
        "Strawberries" => 18.00,
        "Basil" => 28.00,
        _ => 8.00,
    }
}

/// Plants per square meter at recommended spacing.
pub fn plant_density(crop: &str) -> f64 {
    match crop {
        "Lettuce" => 25.0,
        "Spinach" => 30.0,
        "Kale" => 20.0,
        "Herbs" => 35.0,
        "Microgreens" => 100.0,
        "Tomatoes" => 8.0,
        "Peppers" => 6.0,
        "Cucumbers" => 4.0,
        _ => 20.0,
    }
}

/// Rack levels a crop can realistically occupy; tall fruiting crops stay on
/// one level.
pub fn level_requirement(crop: &str) -> u32 {
    match crop {
        "Lettuce" | "Spinach" | "Kale" => 2,
        "Herbs" => 3,
        "Microgreens" => 4,
        "Tomatoes" | "Peppers" | "Cucumbers" => 1,
        _ => 2,
    }
}

/// Crops whose nutrient and climate demands push running costs up.
pub const HIGH_RESOURCE_CROPS: &[&str] = &["Herbs", "Microgreens", "Strawberries"];
