//! Operating expense assumptions

use serde::{Deserialize, Serialize};

/// Operating expenses of the rental, excluding debt service
///
/// Dollar amounts are annual unless the field says monthly. Rates are
/// whole-number percents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseAssumptions {
    /// Annual property taxes in year one ($)
    pub property_taxes: f64,

    /// Annual growth of property taxes (%)
    #[serde(default)]
    pub property_tax_increase_rate: f64,

    /// Annual homeowner's insurance ($)
    #[serde(default)]
    pub home_insurance: f64,

    /// Annual landlord / liability insurance ($)
    #[serde(default)]
    pub landlord_insurance: f64,

    /// Monthly HOA dues ($)
    #[serde(default)]
    pub hoa_fees: f64,

    /// Property management fee (% of collected income)
    #[serde(default)]
    pub property_management_fee: f64,

    /// Maintenance reserve (% of collected income)
    #[serde(default)]
    pub maintenance_reserve: f64,

    /// Vacancy and collection loss (%)
    #[serde(default)]
    pub vacancy_rate: f64,

    /// Monthly capital expenditure reserve ($)
    #[serde(default, alias = "capExReserve")]
    pub capex_reserve: f64,
}

impl ExpenseAssumptions {
    /// Total annual insurance premium
    pub fn annual_insurance(&self) -> f64 {
        self.home_insurance + self.landlord_insurance
    }

    /// Annualized HOA dues
    pub fn annual_hoa(&self) -> f64 {
        self.hoa_fees * 12.0
    }

    /// Annualized capex reserve
    pub fn annual_capex(&self) -> f64 {
        self.capex_reserve * 12.0
    }
}

impl Default for ExpenseAssumptions {
    fn default() -> Self {
        Self {
            property_taxes: 5_000.0,
            property_tax_increase_rate: 2.0,
            home_insurance: 1_200.0,
            landlord_insurance: 800.0,
            hoa_fees: 0.0,
            property_management_fee: 10.0,
            maintenance_reserve: 5.0,
            vacancy_rate: 5.0,
            capex_reserve: 200.0,
        }
    }
}
