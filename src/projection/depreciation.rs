//! Straight-line depreciation of the building

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::validation::validate_depreciation;

/// Recovery class of the property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyClass {
    /// 27.5-year recovery
    #[default]
    Residential,
    /// 39-year recovery
    Commercial,
}

impl PropertyClass {
    /// Recovery period in years
    pub fn recovery_years(&self) -> f64 {
        match self {
            PropertyClass::Residential => 27.5,
            PropertyClass::Commercial => 39.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationInputs {
    pub purchase_price: f64,
    /// Land is not depreciable
    #[serde(default)]
    pub land_value: f64,
    #[serde(default, alias = "propertyType")]
    pub property_class: PropertyClass,
}

impl Default for DepreciationInputs {
    fn default() -> Self {
        Self {
            purchase_price: 500_000.0,
            land_value: 100_000.0,
            property_class: PropertyClass::Residential,
        }
    }
}

/// One year of the depreciation schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationYear {
    pub year: u32,
    pub deduction: f64,
    pub accumulated: f64,
    pub remaining_basis: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationResult {
    /// Purchase price less land, floored at zero
    pub depreciable_basis: f64,
    pub recovery_period_years: f64,
    pub annual_depreciation: f64,
    pub monthly_depreciation: f64,
    pub schedule: Vec<DepreciationYear>,
}

/// Straight-line deductions over the recovery period
///
/// Every year deducts the full annual amount except the last, which takes
/// whatever basis remains (half a year for residential property).
pub fn calculate_depreciation(inputs: &DepreciationInputs) -> Result<DepreciationResult, ProjectionError> {
    validate_depreciation(inputs)?;

    let depreciable_basis = (inputs.purchase_price - inputs.land_value).max(0.0);
    let recovery_period_years = inputs.property_class.recovery_years();
    let annual_depreciation = depreciable_basis / recovery_period_years;

    let mut schedule = Vec::with_capacity(recovery_period_years.ceil() as usize);
    let mut accumulated = 0.0;
    let mut year = 0;

    while accumulated < depreciable_basis {
        year += 1;
        let full_years_done = f64::from(year) >= recovery_period_years;
        let deduction = if full_years_done {
            depreciable_basis - accumulated
        } else {
            annual_depreciation.min(depreciable_basis - accumulated)
        };

        accumulated += deduction;
        if full_years_done {
            accumulated = depreciable_basis;
        }

        schedule.push(DepreciationYear {
            year,
            deduction,
            accumulated,
            remaining_basis: depreciable_basis - accumulated,
        });
    }

    Ok(DepreciationResult {
        depreciable_basis,
        recovery_period_years,
        annual_depreciation,
        monthly_depreciation: annual_depreciation / 12.0,
        schedule,
    })
}
