//! Rental income and projection horizon settings

use serde::{Deserialize, Serialize};

/// Income produced by the property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeAssumptions {
    /// Scheduled monthly rent in year one ($)
    pub monthly_rent: f64,

    /// Annual rent growth (%)
    #[serde(default, alias = "annualRentIncrease")]
    pub annual_rent_increase_percent: f64,

    /// Monthly ancillary income such as laundry or parking ($), not escalated
    #[serde(default)]
    pub other_income: f64,
}

impl Default for IncomeAssumptions {
    fn default() -> Self {
        Self {
            monthly_rent: 3_000.0,
            annual_rent_increase_percent: 3.0,
            other_income: 0.0,
        }
    }
}

/// Horizon and market assumptions for the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSettings {
    /// Number of projected years (5, 10, 20 or 30 in the calculator)
    pub analysis_years: u32,

    /// Annual property appreciation (%)
    #[serde(default, alias = "propertyAppreciation")]
    pub annual_appreciation_percent: f64,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            analysis_years: 30,
            annual_appreciation_percent: 3.0,
        }
    }
}
