//! Load batches of calculator inputs from CSV
//!
//! One scenario per row. Percent columns are whole-number percents, exactly
//! as typed into the calculator form.

use super::{ExpenseAssumptions, IncomeAssumptions, LoanTerms, ProjectionInputs, ProjectionSettings};
use crate::error::DataError;
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    purchase_price: f64,
    down_payment: f64,
    interest_rate: f64,
    loan_term_years: u32,
    #[serde(default)]
    points: f64,
    #[serde(default)]
    closing_costs: f64,
    property_taxes: f64,
    #[serde(default)]
    property_tax_increase_rate: f64,
    #[serde(default)]
    home_insurance: f64,
    #[serde(default)]
    landlord_insurance: f64,
    #[serde(default)]
    hoa_fees: f64,
    #[serde(default)]
    property_management_fee: f64,
    #[serde(default)]
    maintenance_reserve: f64,
    #[serde(default)]
    vacancy_rate: f64,
    #[serde(default)]
    capex_reserve: f64,
    monthly_rent: f64,
    #[serde(default)]
    annual_rent_increase: f64,
    #[serde(default)]
    other_income: f64,
    analysis_years: u32,
    #[serde(default)]
    property_appreciation: f64,
}

impl CsvRow {
    fn into_named(self) -> NamedInputs {
        let inputs = ProjectionInputs {
            loan: LoanTerms {
                purchase_price: self.purchase_price,
                down_payment: self.down_payment,
                interest_rate: self.interest_rate,
                loan_term_years: self.loan_term_years,
                points: self.points,
                closing_costs: self.closing_costs,
            },
            expenses: ExpenseAssumptions {
                property_taxes: self.property_taxes,
                property_tax_increase_rate: self.property_tax_increase_rate,
                home_insurance: self.home_insurance,
                landlord_insurance: self.landlord_insurance,
                hoa_fees: self.hoa_fees,
                property_management_fee: self.property_management_fee,
                maintenance_reserve: self.maintenance_reserve,
                vacancy_rate: self.vacancy_rate,
                capex_reserve: self.capex_reserve,
            },
            income: IncomeAssumptions {
                monthly_rent: self.monthly_rent,
                annual_rent_increase_percent: self.annual_rent_increase,
                other_income: self.other_income,
            },
            settings: ProjectionSettings {
                analysis_years: self.analysis_years,
                annual_appreciation_percent: self.property_appreciation,
            },
        };

        NamedInputs { name: self.name, inputs }
    }
}

/// A labelled input snapshot, one row of a scenario file
#[derive(Debug, Clone, PartialEq)]
pub struct NamedInputs {
    pub name: String,
    pub inputs: ProjectionInputs,
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<NamedInputs>, DataError> {
    let reader = Reader::from_path(path)?;
    read_rows(reader)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<NamedInputs>, DataError> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<NamedInputs>, DataError> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_named());
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIOS: &str = "\
name,purchase_price,down_payment,interest_rate,loan_term_years,points,closing_costs,property_taxes,property_tax_increase_rate,home_insurance,landlord_insurance,hoa_fees,property_management_fee,maintenance_reserve,vacancy_rate,capex_reserve,monthly_rent,annual_rent_increase,other_income,analysis_years,property_appreciation
base,400000,80000,6.5,30,0,10000,5000,2,1200,800,0,10,5,5,200,3000,3,0,30,3
duplex,550000,110000,7.25,30,1,12000,6800,2,1500,900,0,8,5,4,300,4200,3,150,10,2.5
";

    #[test]
    fn test_load_scenarios() {
        let scenarios = load_scenarios_from_reader(SCENARIOS.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 2);

        assert_eq!(scenarios[0].name, "base");
        assert_eq!(scenarios[0].inputs, ProjectionInputs::default());

        let duplex = &scenarios[1].inputs;
        assert_eq!(duplex.loan.points, 1.0);
        assert_eq!(duplex.income.other_income, 150.0);
        assert_eq!(duplex.settings.analysis_years, 10);
    }

    #[test]
    fn test_bad_number_is_reported() {
        let bad = "name,purchase_price,down_payment,interest_rate,loan_term_years,property_taxes,monthly_rent,analysis_years\n\
                   x,abc,0,5,30,1000,2000,10\n";
        let err = load_scenarios_from_reader(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }
}
