//! Input validation
//!
//! Every field is checked before any computation starts, and all offending
//! fields are returned together so a form can flag them in one pass.

use crate::error::{InvalidInput, ProjectionError};
use crate::inputs::{ExpenseAssumptions, IncomeAssumptions, LoanTerms, ProjectionSettings};
use crate::projection::{BrrrrDeal, DepreciationInputs};

/// Longest horizon the engine will project
pub const MAX_ANALYSIS_YEARS: u32 = 100;

/// Longest amortization term accepted
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

/// Highest annual interest rate accepted (%)
pub const MAX_INTEREST_RATE: f64 = 100.0;

/// Collects field errors while walking the inputs
#[derive(Default)]
struct Checker {
    errors: Vec<InvalidInput>,
}

impl Checker {
    /// Rejects NaN and infinities; returns whether the value is usable
    fn finite(&mut self, field: &'static str, value: f64) -> bool {
        if value.is_finite() {
            true
        } else {
            self.errors.push(InvalidInput::new(field, "must be a finite number"));
            false
        }
    }

    fn positive(&mut self, field: &'static str, value: f64) {
        if self.finite(field, value) && value <= 0.0 {
            self.errors.push(InvalidInput::new(field, "must be greater than 0"));
        }
    }

    fn non_negative(&mut self, field: &'static str, value: f64) {
        if self.finite(field, value) && value < 0.0 {
            self.errors.push(InvalidInput::new(field, "must not be negative"));
        }
    }

    fn percent(&mut self, field: &'static str, value: f64) {
        if self.finite(field, value) && !(0.0..=100.0).contains(&value) {
            self.errors.push(InvalidInput::new(field, "must be between 0 and 100"));
        }
    }

    fn interest_rate(&mut self, field: &'static str, value: f64) {
        if self.finite(field, value) && !(0.0..=MAX_INTEREST_RATE).contains(&value) {
            self.errors.push(InvalidInput::new(
                field,
                format!("must be between 0 and {}", MAX_INTEREST_RATE),
            ));
        }
    }

    fn loan_term(&mut self, field: &'static str, years: u32) {
        if years == 0 {
            self.errors.push(InvalidInput::new(field, "must be at least 1 year"));
        } else if years > MAX_LOAN_TERM_YEARS {
            self.errors.push(InvalidInput::new(
                field,
                format!("must not exceed {} years", MAX_LOAN_TERM_YEARS),
            ));
        }
    }

    /// Cash put down: non-negative and no more than the price
    fn down_payment(&mut self, field: &'static str, value: f64, price: f64) {
        if self.finite(field, value) {
            if value < 0.0 {
                self.errors.push(InvalidInput::new(field, "must not be negative"));
            } else if price.is_finite() && value > price.max(0.0) {
                self.errors.push(InvalidInput::new(field, "must not exceed the purchase price"));
            }
        }
    }

    fn finish(self) -> Result<(), ProjectionError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ProjectionError::InvalidInput(self.errors))
        }
    }
}

/// Validate a complete input snapshot
pub fn validate(
    loan: &LoanTerms,
    expenses: &ExpenseAssumptions,
    income: &IncomeAssumptions,
    settings: &ProjectionSettings,
) -> Result<(), ProjectionError> {
    let mut check = Checker::default();

    check.positive("purchasePrice", loan.purchase_price);
    check.down_payment("downPayment", loan.down_payment, loan.purchase_price);
    check.interest_rate("interestRate", loan.interest_rate);
    check.loan_term("loanTermYears", loan.loan_term_years);
    check.percent("points", loan.points);
    check.non_negative("closingCosts", loan.closing_costs);

    check.non_negative("propertyTaxes", expenses.property_taxes);
    check.non_negative("propertyTaxIncreaseRate", expenses.property_tax_increase_rate);
    check.non_negative("homeInsurance", expenses.home_insurance);
    check.non_negative("landlordInsurance", expenses.landlord_insurance);
    check.non_negative("hoaFees", expenses.hoa_fees);
    check.percent("propertyManagementFee", expenses.property_management_fee);
    check.percent("maintenanceReserve", expenses.maintenance_reserve);
    check.percent("vacancyRate", expenses.vacancy_rate);
    check.non_negative("capexReserve", expenses.capex_reserve);

    check.non_negative("monthlyRent", income.monthly_rent);
    check.non_negative("annualRentIncreasePercent", income.annual_rent_increase_percent);
    check.non_negative("otherIncome", income.other_income);

    if settings.analysis_years == 0 {
        check.errors.push(InvalidInput::new("analysisYears", "must be at least 1 year"));
    } else if settings.analysis_years > MAX_ANALYSIS_YEARS {
        check.errors.push(InvalidInput::new(
            "analysisYears",
            format!("must not exceed {} years", MAX_ANALYSIS_YEARS),
        ));
    }
    check.non_negative("annualAppreciationPercent", settings.annual_appreciation_percent);

    check.finish()
}

/// Validate a BRRRR deal
pub fn validate_brrrr(deal: &BrrrrDeal) -> Result<(), ProjectionError> {
    let mut check = Checker::default();

    check.positive("purchasePrice", deal.purchase_price);
    check.down_payment("downPayment", deal.down_payment, deal.purchase_price);
    check.non_negative("closingCosts", deal.closing_costs);
    check.non_negative("rehabCosts", deal.rehab_costs);
    check.positive("afterRepairValue", deal.after_repair_value);
    check.percent("refinanceLtv", deal.refinance_ltv);
    check.interest_rate("refinanceRate", deal.refinance_rate);
    check.loan_term("refinanceTermYears", deal.refinance_term_years);
    check.non_negative("monthlyRent", deal.monthly_rent);
    check.non_negative("monthlyExpenses", deal.monthly_expenses);

    check.finish()
}

/// Validate depreciation inputs
pub fn validate_depreciation(inputs: &DepreciationInputs) -> Result<(), ProjectionError> {
    let mut check = Checker::default();

    check.positive("purchasePrice", inputs.purchase_price);
    check.non_negative("landValue", inputs.land_value);

    check.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> (LoanTerms, ExpenseAssumptions, IncomeAssumptions, ProjectionSettings) {
        (
            LoanTerms::default(),
            ExpenseAssumptions::default(),
            IncomeAssumptions::default(),
            ProjectionSettings::default(),
        )
    }

    #[test]
    fn test_defaults_are_valid() {
        let (loan, expenses, income, settings) = defaults();
        assert!(validate(&loan, &expenses, &income, &settings).is_ok());
    }

    #[test]
    fn test_negative_price_names_field() {
        let (mut loan, expenses, income, settings) = defaults();
        loan.purchase_price = -100.0;
        loan.down_payment = 0.0;

        let err = validate(&loan, &expenses, &income, &settings).unwrap_err();
        assert_eq!(err.fields(), vec!["purchasePrice"]);
    }

    #[test]
    fn test_collects_all_errors() {
        let (mut loan, mut expenses, mut income, mut settings) = defaults();
        loan.down_payment = 500_000.0;
        loan.loan_term_years = 0;
        expenses.vacancy_rate = 120.0;
        expenses.property_management_fee = f64::NAN;
        income.monthly_rent = -1.0;
        settings.analysis_years = 0;

        let err = validate(&loan, &expenses, &income, &settings).unwrap_err();
        assert_eq!(
            err.fields(),
            vec![
                "downPayment",
                "loanTermYears",
                "propertyManagementFee",
                "vacancyRate",
                "monthlyRent",
                "analysisYears",
            ]
        );
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let (mut loan, mut expenses, income, settings) = defaults();
        loan.down_payment = loan.purchase_price;
        loan.interest_rate = 0.0;
        expenses.vacancy_rate = 100.0;
        expenses.maintenance_reserve = 0.0;

        assert!(validate(&loan, &expenses, &income, &settings).is_ok());
    }

    #[test]
    fn test_horizon_is_bounded() {
        let (loan, expenses, income, mut settings) = defaults();
        settings.analysis_years = MAX_ANALYSIS_YEARS + 1;

        let err = validate(&loan, &expenses, &income, &settings).unwrap_err();
        assert_eq!(err.fields(), vec!["analysisYears"]);
    }

    #[test]
    fn test_loan_term_is_bounded() {
        let (mut loan, expenses, income, settings) = defaults();
        loan.loan_term_years = MAX_LOAN_TERM_YEARS;
        assert!(validate(&loan, &expenses, &income, &settings).is_ok());

        for term in [MAX_LOAN_TERM_YEARS + 1, 20_000, 400_000_000] {
            loan.loan_term_years = term;
            let err = validate(&loan, &expenses, &income, &settings).unwrap_err();
            assert_eq!(err.fields(), vec!["loanTermYears"], "term {}", term);
        }
    }

    #[test]
    fn test_interest_rate_is_bounded() {
        let (mut loan, expenses, income, settings) = defaults();
        loan.interest_rate = MAX_INTEREST_RATE;
        assert!(validate(&loan, &expenses, &income, &settings).is_ok());

        for rate in [100.5, 10_000.0, -0.5, f64::INFINITY] {
            loan.interest_rate = rate;
            let err = validate(&loan, &expenses, &income, &settings).unwrap_err();
            assert_eq!(err.fields(), vec!["interestRate"], "rate {}", rate);
        }
    }
}
