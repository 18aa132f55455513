//! Inputs resolved into the engine's internal convention
//!
//! Every whole-number percent from the form is divided by 100 here and
//! nowhere else. Downstream code only ever sees fractions.

use crate::inputs::{ExpenseAssumptions, IncomeAssumptions, LoanTerms, ProjectionSettings};
use super::mortgage::monthly_payment;

/// Convert a whole-number percent into a fraction
#[inline]
pub(crate) fn fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Validated inputs with all rates as fractions
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedTerms {
    // Financing
    pub purchase_price: f64,
    pub loan_amount: f64,
    pub annual_rate: f64,
    pub monthly_rate: f64,
    pub total_payments: u32,
    pub monthly_payment: f64,
    pub total_cash_invested: f64,

    // Expenses
    pub property_taxes: f64,
    pub tax_growth: f64,
    pub annual_insurance: f64,
    pub annual_hoa: f64,
    pub annual_capex: f64,
    pub management_fee: f64,
    pub maintenance_reserve: f64,
    pub vacancy_rate: f64,

    // Income
    pub monthly_rent: f64,
    pub rent_growth: f64,
    pub monthly_other_income: f64,

    // Horizon
    pub analysis_years: u32,
    pub appreciation: f64,
}

impl ResolvedTerms {
    pub fn from_inputs(
        loan: &LoanTerms,
        expenses: &ExpenseAssumptions,
        income: &IncomeAssumptions,
        settings: &ProjectionSettings,
    ) -> Self {
        let annual_rate = fraction(loan.interest_rate);
        let loan_amount = loan.loan_amount();

        Self {
            purchase_price: loan.purchase_price,
            loan_amount,
            annual_rate,
            monthly_rate: annual_rate / 12.0,
            total_payments: loan.total_payments(),
            monthly_payment: monthly_payment(loan_amount, annual_rate, loan.loan_term_years),
            total_cash_invested: loan.down_payment + loan.closing_costs + loan_amount * fraction(loan.points),

            property_taxes: expenses.property_taxes,
            tax_growth: fraction(expenses.property_tax_increase_rate),
            annual_insurance: expenses.annual_insurance(),
            annual_hoa: expenses.annual_hoa(),
            annual_capex: expenses.annual_capex(),
            management_fee: fraction(expenses.property_management_fee),
            maintenance_reserve: fraction(expenses.maintenance_reserve),
            vacancy_rate: fraction(expenses.vacancy_rate),

            monthly_rent: income.monthly_rent,
            rent_growth: fraction(income.annual_rent_increase_percent),
            monthly_other_income: income.other_income,

            analysis_years: settings.analysis_years,
            appreciation: fraction(settings.annual_appreciation_percent),
        }
    }

    /// Scheduled monthly rent in the given projection year (1-indexed)
    pub fn monthly_rent_in_year(&self, year: u32) -> f64 {
        self.monthly_rent * (1.0 + self.rent_growth).powi(year as i32 - 1)
    }

    /// Property taxes due in the given projection year
    pub fn property_taxes_in_year(&self, year: u32) -> f64 {
        self.property_taxes * (1.0 + self.tax_growth).powi(year as i32 - 1)
    }

    /// Market value at the end of the given projection year
    pub fn property_value_at(&self, year: u32) -> f64 {
        self.purchase_price * (1.0 + self.appreciation).powi(year as i32)
    }

    /// Operating expenses for a year given its collected income
    pub fn operating_expenses(&self, year: u32, collected_income: f64) -> f64 {
        self.property_taxes_in_year(year)
            + self.annual_insurance
            + self.annual_hoa
            + self.annual_capex
            + self.management_fee * collected_income
            + self.maintenance_reserve * collected_income
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn default_terms() -> ResolvedTerms {
        ResolvedTerms::from_inputs(
            &LoanTerms::default(),
            &ExpenseAssumptions::default(),
            &IncomeAssumptions::default(),
            &ProjectionSettings::default(),
        )
    }

    #[test]
    fn test_percents_become_fractions() {
        let terms = default_terms();

        assert_eq!(terms.annual_rate, 0.065);
        assert_eq!(terms.vacancy_rate, 0.05);
        assert_eq!(terms.management_fee, 0.10);
        assert_eq!(terms.maintenance_reserve, 0.05);
        assert_eq!(terms.tax_growth, 0.02);
        assert_eq!(terms.appreciation, 0.03);
        assert_eq!(terms.total_payments, 360);
        assert_eq!(terms.total_cash_invested, 90_000.0);
    }

    #[test]
    fn test_escalation_starts_after_year_one() {
        let terms = default_terms();

        assert_eq!(terms.monthly_rent_in_year(1), 3_000.0);
        assert_abs_diff_eq!(terms.monthly_rent_in_year(2), 3_090.0, epsilon = 1e-9);
        assert_eq!(terms.property_taxes_in_year(1), 5_000.0);
        assert_abs_diff_eq!(terms.property_taxes_in_year(3), 5_202.0, epsilon = 1e-9);
        assert_abs_diff_eq!(terms.property_value_at(1), 412_000.0, epsilon = 1e-9);
    }
}
