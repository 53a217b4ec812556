//! Cost, revenue, and ROI arithmetic over fixed per-square-meter rate tables.
//!
//! Pure functions; every figure a template shows is rounded to cents here so
//! stored plans and rendered pages agree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::common::round2;
use crate::cropdata::{market_price, HIGH_RESOURCE_CROPS};
use crate::farm::{CropRecommendation, FarmParams, LightAccess, WaterAvailability};

/// One-off per-square-meter setup rates in USD.
const SETUP_COSTS: &[(&str, f64)] = &[
    ("structure", 200.0),
    ("lighting", 150.0),
    ("irrigation", 100.0),
    ("climate_control", 120.0),
    ("nutrients", 30.0),
    ("seeds", 20.0),
    ("automation", 80.0),
    ("installation", 50.0),
];

/// Monthly per-square-meter running rates in USD.
const OPERATIONAL_COSTS: &[(&str, f64)] = &[
    ("electricity", 25.0),
    ("water", 5.0),
    ("nutrients", 8.0),
    ("seeds", 6.0),
    ("maintenance", 10.0),
    ("labor", 15.0),
];

const ANALYSIS_YEARS: u32 = 5;
const DISCOUNT_RATE: f64 = 0.08;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetupModifiers {
    pub light_modifier: f64,
    pub water_modifier: f64,
    pub area_modifier: f64,
    pub total_modifier: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetupCosts {
    pub base_cost_per_sqm: f64,
    pub adjusted_cost_per_sqm: f64,
    pub total_setup_cost: f64,
    pub breakdown: IndexMap<String, f64>,
    pub modifiers_applied: SetupModifiers,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OperationalModifiers {
    pub light_modifier: f64,
    pub crop_modifier: f64,
    pub efficiency_modifier: f64,
    pub total_modifier: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OperationalCosts {
    pub monthly_cost_per_sqm: f64,
    pub total_monthly_cost: f64,
    pub total_annual_cost: f64,
    pub monthly_breakdown: IndexMap<String, f64>,
    pub modifiers_applied: OperationalModifiers,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CropRevenue {
    pub annual_yield_kg: f64,
    pub market_price_per_kg: f64,
    pub annual_revenue: f64,
    pub harvests_per_year: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RevenueProjection {
    pub total_annual_revenue: f64,
    pub revenue_per_sqm: f64,
    pub crop_revenues: IndexMap<String, CropRevenue>,
    pub projected_monthly_revenue: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoiAnalysis {
    pub initial_investment: f64,
    pub annual_revenue: f64,
    pub annual_costs: f64,
    pub annual_profit: f64,
    pub payback_period_years: Option<f64>,
    pub npv: f64,
    pub roi_percentage: f64,
    pub profit_margin: f64,
    pub cumulative_cash_flow: Vec<f64>,
    pub break_even_month: Option<i64>,
    pub profitability_status: String,
}

/// Everything the plan page and the stored record need about money.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CostAnalysis {
    pub setup: SetupCosts,
    pub operational: OperationalCosts,
    pub revenue: RevenueProjection,
    pub roi: RoiAnalysis,
}

/// Runs the whole pipeline for one plan.
pub fn analyze(params: &FarmParams, recommendations: &[CropRecommendation]) -> CostAnalysis {
    let setup = setup_costs(params);
    let operational = operational_costs(params, recommendations);
    let revenue = revenue_projection(recommendations, params.area_size);
    let roi = roi_analysis(&setup, &operational, &revenue, ANALYSIS_YEARS);

    CostAnalysis {
        setup,
        operational,
        revenue,
        roi,
    }
}

pub fn setup_costs(params: &FarmParams) -> SetupCosts {
    let modifiers = setup_modifiers(params);
    let base_cost_per_sqm: f64 = SETUP_COSTS.iter().map(|(_, rate)| rate).sum();
    let adjusted_cost_per_sqm = base_cost_per_sqm * modifiers.total_modifier;

    let breakdown = SETUP_COSTS
        .iter()
        .map(|(component, rate)| {
            (
                component.to_string(),
                round2(rate * params.area_size * modifiers.total_modifier),
            )
        })
        .collect();

    SetupCosts {
        base_cost_per_sqm: round2(base_cost_per_sqm),
        adjusted_cost_per_sqm: round2(adjusted_cost_per_sqm),
        total_setup_cost: round2(adjusted_cost_per_sqm * params.area_size),
        breakdown,
        modifiers_applied: modifiers,
    }
}

fn setup_modifiers(params: &FarmParams) -> SetupModifiers {
    let light_modifier = match params.light_access {
        LightAccess::Natural => 0.7,
        LightAccess::Hybrid => 0.85,
        LightAccess::Artificial => 1.0,
    };

    let water_modifier = match params.water_availability {
        WaterAvailability::Low => 1.3,
        WaterAvailability::Medium => 1.0,
        WaterAvailability::High => 0.9,
    };

    // Economies of scale.
    let area_modifier = if params.area_size > 200.0 {
        0.85
    } else if params.area_size > 100.0 {
        0.95
    } else if params.area_size < 20.0 {
        1.2
    } else {
        1.0
    };

    SetupModifiers {
        light_modifier,
        water_modifier,
        area_modifier,
        total_modifier: light_modifier * water_modifier * area_modifier,
    }
}

pub fn operational_costs(
    params: &FarmParams,
    recommendations: &[CropRecommendation],
) -> OperationalCosts {
    let modifiers = operational_modifiers(params, recommendations);
    let base_monthly_per_sqm: f64 = OPERATIONAL_COSTS.iter().map(|(_, rate)| rate).sum();
    let adjusted_monthly_per_sqm = base_monthly_per_sqm * modifiers.total_modifier;
    let monthly_cost = adjusted_monthly_per_sqm * params.area_size;

    let monthly_breakdown = OPERATIONAL_COSTS
        .iter()
        .map(|(component, rate)| {
            (
                component.to_string(),
                round2(rate * params.area_size * modifiers.total_modifier),
            )
        })
        .collect();

    OperationalCosts {
        monthly_cost_per_sqm: round2(adjusted_monthly_per_sqm),
        total_monthly_cost: round2(monthly_cost),
        total_annual_cost: round2(monthly_cost * 12.0),
        monthly_breakdown,
        modifiers_applied: modifiers,
    }
}

fn operational_modifiers(
    params: &FarmParams,
    recommendations: &[CropRecommendation],
) -> OperationalModifiers {
    // Natural light cuts the electricity bill.
    let light_modifier = match params.light_access {
        LightAccess::Natural => 0.6,
        LightAccess::Hybrid => 0.8,
        LightAccess::Artificial => 1.0,
    };

    let crop_modifier = if recommendations
        .iter()
        .any(|rec| HIGH_RESOURCE_CROPS.contains(&rec.crop.as_str()))
    {
        1.15
    } else {
        1.0
    };

    let efficiency_modifier = if params.area_size > 100.0 { 0.9 } else { 1.0 };

    OperationalModifiers {
        light_modifier,
        crop_modifier,
        efficiency_modifier,
        total_modifier: light_modifier * crop_modifier * efficiency_modifier,
    }
}

pub fn revenue_projection(
    recommendations: &[CropRecommendation],
    area_size: f64,
) -> RevenueProjection {
    let mut total_annual_revenue = 0.0;
    let mut crop_revenues = IndexMap::new();

    for rec in recommendations {
        let harvests = rec
            .yield_data
            .as_ref()
            .map_or(4.0, |y| y.harvests_per_year);
        let yield_per_harvest = rec.yield_data.as_ref().map_or(0.0, |y| y.total_yield_kg);

        let annual_yield = yield_per_harvest * harvests;
        let price = market_price(&rec.crop);
        let annual_revenue = annual_yield * price;

        crop_revenues.insert(
            rec.crop.clone(),
            CropRevenue {
                annual_yield_kg: round2(annual_yield),
                market_price_per_kg: price,
                annual_revenue: round2(annual_revenue),
                harvests_per_year: harvests,
            },
        );

        total_annual_revenue += annual_revenue;
    }

    let revenue_per_sqm = if area_size > 0.0 {
        total_annual_revenue / area_size
    } else {
        0.0
    };

    RevenueProjection {
        total_annual_revenue: round2(total_annual_revenue),
        revenue_per_sqm: round2(revenue_per_sqm),
        crop_revenues,
        projected_monthly_revenue: round2(total_annual_revenue / 12.0),
    }
}

pub fn roi_analysis(
    setup: &SetupCosts,
    operational: &OperationalCosts,
    revenue: &RevenueProjection,
    analysis_years: u32,
) -> RoiAnalysis {
    let initial_investment = setup.total_setup_cost;
    let annual_revenue = revenue.total_annual_revenue;
    let annual_costs = operational.total_annual_cost;
    let annual_profit = annual_revenue - annual_costs;

    let payback_period = if annual_profit > 0.0 {
        initial_investment / annual_profit
    } else {
        f64::INFINITY
    };

    let mut npv = -initial_investment;
    let mut cumulative_cash_flow = vec![round2(-initial_investment)];
    let mut running = -initial_investment;
    for year in 1..=analysis_years {
        npv += annual_profit / (1.0 + DISCOUNT_RATE).powi(year as i32);
        running += annual_profit;
        cumulative_cash_flow.push(round2(running));
    }

    let roi_percentage = if initial_investment > 0.0 {
        (annual_profit * analysis_years as f64) / initial_investment * 100.0
    } else {
        0.0
    };

    let profit_margin = if annual_revenue > 0.0 {
        annual_profit / annual_revenue * 100.0
    } else {
        0.0
    };

    RoiAnalysis {
        initial_investment: round2(initial_investment),
        annual_revenue: round2(annual_revenue),
        annual_costs: round2(annual_costs),
        annual_profit: round2(annual_profit),
        payback_period_years: payback_period
            .is_finite()
            .then(|| round2(payback_period)),
        npv: round2(npv),
        roi_percentage: round2(roi_percentage),
        profit_margin: round2(profit_margin),
        cumulative_cash_flow,
        break_even_month: break_even_month(initial_investment, annual_profit),
        profitability_status: profitability_status(roi_percentage, payback_period).to_string(),
    }
}

fn break_even_month(initial_investment: f64, annual_profit: f64) -> Option<i64> {
    if annual_profit <= 0.0 {
        return None;
    }
    let monthly_profit = annual_profit / 12.0;
    Some((initial_investment / monthly_profit).round() as i64)
}

fn profitability_status(roi_percentage: f64, payback_period: f64) -> &'static str {
    if roi_percentage > 25.0 && payback_period < 3.0 {
        "Highly Profitable"
    } else if roi_percentage > 15.0 && payback_period < 5.0 {
        "Profitable"
    } else if roi_percentage > 5.0 && payback_period < 7.0 {
        "Moderately Profitable"
    } else if roi_percentage > 0.0 {
        "Marginally Profitable"
    } else {
        "Not Profitable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::farm::YieldPrediction;
    use approx::assert_relative_eq;

    fn params(area: f64, water: WaterAvailability, light: LightAccess) -> FarmParams {
        FarmParams {
            location: "Utrecht".to_string(),
            area_size: area,
            budget: 20_000.0,
            water_availability: water,
            light_access: light,
        }
    }

    fn recommendation(crop: &str, total_yield: f64, harvests: f64) -> CropRecommendation {
        CropRecommendation {
            crop: crop.to_string(),
            confidence: 80.0,
            suitability: "Excellent".to_string(),
            yield_data: Some(YieldPrediction {
                yield_kg_per_sqm: total_yield / 10.0,
                total_yield_kg: total_yield,
                growth_time_days: 35,
                harvests_per_year: harvests,
            }),
        }
    }

    #[test]
    fn setup_base_rate_is_750_per_sqm() {
        let costs = setup_costs(&params(50.0, WaterAvailability::Medium, LightAccess::Artificial));
        assert_relative_eq!(costs.base_cost_per_sqm, 750.0);
        assert_relative_eq!(costs.adjusted_cost_per_sqm, 750.0);
        assert_relative_eq!(costs.total_setup_cost, 37_500.0);

        let breakdown_sum: f64 = costs.breakdown.values().sum();
        assert_relative_eq!(breakdown_sum, costs.total_setup_cost, epsilon = 0.05);
    }

    #[test]
    fn setup_modifiers_multiply() {
        // Natural light, scarce water, small area: 0.7 * 1.3 * 1.2.
        let costs = setup_costs(&params(10.0, WaterAvailability::Low, LightAccess::Natural));
        let modifiers = &costs.modifiers_applied;
        assert_relative_eq!(modifiers.light_modifier, 0.7);
        assert_relative_eq!(modifiers.water_modifier, 1.3);
        assert_relative_eq!(modifiers.area_modifier, 1.2);
        assert_relative_eq!(modifiers.total_modifier, 1.092, epsilon = 1e-12);
        assert_relative_eq!(costs.adjusted_cost_per_sqm, 819.0);
    }

    #[test]
    fn large_farms_get_scale_discounts() {
        let costs = setup_costs(&params(250.0, WaterAvailability::High, LightAccess::Artificial));
        assert_relative_eq!(costs.modifiers_applied.area_modifier, 0.85);
        assert_relative_eq!(costs.modifiers_applied.water_modifier, 0.9);
    }

    #[test]
    fn operational_base_rate_is_69_per_sqm() {
        let costs = operational_costs(
            &params(50.0, WaterAvailability::Medium, LightAccess::Artificial),
            &[],
        );
        assert_relative_eq!(costs.monthly_cost_per_sqm, 69.0);
        assert_relative_eq!(costs.total_monthly_cost, 3450.0);
        assert_relative_eq!(costs.total_annual_cost, 41_400.0);
    }

    #[test]
    fn high_resource_crops_raise_running_costs() {
        let recs = vec![recommendation("Microgreens", 100.0, 10.0)];
        let costs = operational_costs(
            &params(150.0, WaterAvailability::Medium, LightAccess::Natural),
            &recs,
        );
        let modifiers = &costs.modifiers_applied;
        assert_relative_eq!(modifiers.light_modifier, 0.6);
        assert_relative_eq!(modifiers.crop_modifier, 1.15);
        assert_relative_eq!(modifiers.efficiency_modifier, 0.9);
        assert_relative_eq!(costs.monthly_cost_per_sqm, 42.85);
    }

    #[test]
    fn revenue_multiplies_yield_harvests_and_price() {
        let recs = vec![
            recommendation("Lettuce", 100.0, 10.0),
            CropRecommendation {
                crop: "Kale".to_string(),
                confidence: 60.0,
                suitability: "Good".to_string(),
                yield_data: None,
            },
        ];
        let revenue = revenue_projection(&recs, 50.0);

        // Lettuce: 100 kg x 10 harvests x 6.50 - Kale has no yield data so
        // contributes nothing at the default four harvests.
        assert_relative_eq!(revenue.total_annual_revenue, 6500.0);
        assert_relative_eq!(revenue.revenue_per_sqm, 130.0);
        assert_relative_eq!(revenue.projected_monthly_revenue, 541.67);
        assert_eq!(revenue.crop_revenues.len(), 2);
        assert_relative_eq!(revenue.crop_revenues["Lettuce"].annual_revenue, 6500.0);
        assert_relative_eq!(revenue.crop_revenues["Kale"].annual_yield_kg, 0.0);
        assert_relative_eq!(revenue.crop_revenues["Kale"].harvests_per_year, 4.0);
    }

    #[test]
    fn unknown_crops_price_at_the_default_rate() {
        let recs = vec![recommendation("Durian", 10.0, 2.0)];
        let revenue = revenue_projection(&recs, 10.0);
        assert_relative_eq!(revenue.crop_revenues["Durian"].market_price_per_kg, 8.00);
        assert_relative_eq!(revenue.total_annual_revenue, 160.0);
    }

    fn fixed_roi_inputs(
        investment: f64,
        annual_cost: f64,
        annual_revenue: f64,
    ) -> (SetupCosts, OperationalCosts, RevenueProjection) {
        let setup = SetupCosts {
            base_cost_per_sqm: 750.0,
            adjusted_cost_per_sqm: 750.0,
            total_setup_cost: investment,
            breakdown: IndexMap::new(),
            modifiers_applied: SetupModifiers {
                light_modifier: 1.0,
                water_modifier: 1.0,
                area_modifier: 1.0,
                total_modifier: 1.0,
            },
        };
        let operational = OperationalCosts {
            monthly_cost_per_sqm: 69.0,
            total_monthly_cost: annual_cost / 12.0,
            total_annual_cost: annual_cost,
            monthly_breakdown: IndexMap::new(),
            modifiers_applied: OperationalModifiers {
                light_modifier: 1.0,
                crop_modifier: 1.0,
                efficiency_modifier: 1.0,
                total_modifier: 1.0,
            },
        };
        let revenue = RevenueProjection {
            total_annual_revenue: annual_revenue,
            revenue_per_sqm: 0.0,
            crop_revenues: IndexMap::new(),
            projected_monthly_revenue: annual_revenue / 12.0,
        };
        (setup, operational, revenue)
    }

    #[test]
    fn roi_analysis_for_a_profitable_farm() {
        let (setup, operational, revenue) = fixed_roi_inputs(10_000.0, 14_000.0, 20_000.0);
        let roi = roi_analysis(&setup, &operational, &revenue, 5);

        assert_relative_eq!(roi.annual_profit, 6000.0);
        assert_relative_eq!(roi.payback_period_years.unwrap(), 1.67);
        assert_relative_eq!(roi.npv, 13_956.26, epsilon = 0.01);
        assert_relative_eq!(roi.roi_percentage, 300.0);
        assert_relative_eq!(roi.profit_margin, 30.0);
        assert_eq!(roi.break_even_month, Some(20));
        assert_eq!(roi.profitability_status, "Highly Profitable");
        assert_eq!(
            roi.cumulative_cash_flow,
            vec![-10_000.0, -4000.0, 2000.0, 8000.0, 14_000.0, 20_000.0]
        );
    }

    #[test]
    fn roi_analysis_for_a_losing_farm() {
        let (setup, operational, revenue) = fixed_roi_inputs(10_000.0, 5000.0, 1000.0);
        let roi = roi_analysis(&setup, &operational, &revenue, 5);

        assert_relative_eq!(roi.annual_profit, -4000.0);
        assert!(roi.payback_period_years.is_none());
        assert!(roi.break_even_month.is_none());
        assert!(roi.npv < -10_000.0);
        assert_eq!(roi.profitability_status, "Not Profitable");
        assert_eq!(roi.cumulative_cash_flow.first(), Some(&-10_000.0));
        assert_eq!(roi.cumulative_cash_flow.last(), Some(&-30_000.0));
    }

    #[test]
    fn profitability_bands() {
        assert_eq!(profitability_status(30.0, 2.0), "Highly Profitable");
        assert_eq!(profitability_status(30.0, 4.0), "Profitable");
        assert_eq!(profitability_status(20.0, 4.0), "Profitable");
        assert_eq!(profitability_status(10.0, 6.0), "Moderately Profitable");
        assert_eq!(profitability_status(3.0, 20.0), "Marginally Profitable");
        assert_eq!(profitability_status(-5.0, f64::INFINITY), "Not Profitable");
    }

    #[test]
    fn full_analysis_holds_together() {
        let recs = vec![recommendation("Lettuce", 150.0, 10.0)];
        let analysis = analyze(
            &params(50.0, WaterAvailability::Medium, LightAccess::Hybrid),
            &recs,
        );

        assert_relative_eq!(
            analysis.roi.initial_investment,
            analysis.setup.total_setup_cost
        );
        assert_relative_eq!(
            analysis.roi.annual_profit,
            analysis.revenue.total_annual_revenue - analysis.operational.total_annual_cost,
            epsilon = 0.01
        );
    }
}
