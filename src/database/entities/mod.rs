pub mod farm_plans;

pub use farm_plans::*;
