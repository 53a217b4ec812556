use serde::Deserialize;

use crate::farm::{FarmParams, LightAccess, WaterAvailability};

/// Raw planning form submission. Numeric fields stay strings here so a bad
/// value produces a banner instead of a rejected request.
#[derive(Debug, Default, Deserialize)]
pub struct PlanForm {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub area_size: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub water_availability: String,
    #[serde(default)]
    pub light_access: String,
}

impl PlanForm {
    /// Server-side mirror of the client checks. Browser validation is
    /// bypassable, so every rule is enforced again here.
    pub fn validate(&self) -> Result<FarmParams, &'static str> {
        let area_size = parse_number(&self.area_size)
            .ok_or("Please enter valid numeric values for area size and budget.")?;
        let budget = parse_number(&self.budget)
            .ok_or("Please enter valid numeric values for area size and budget.")?;

        let location = self.location.trim();
        if location.is_empty() {
            return Err("Please enter a valid location.");
        }

        if area_size <= 0.0 || budget <= 0.0 {
            return Err("Please enter valid area size and budget.");
        }

        Ok(FarmParams {
            location: location.to_string(),
            area_size,
            budget,
            water_availability: WaterAvailability::parse(&self.water_availability)
                .unwrap_or(WaterAvailability::Medium),
            light_access: LightAccess::parse(&self.light_access)
                .unwrap_or(LightAccess::Artificial),
        })
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}
