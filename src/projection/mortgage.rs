//! Mortgage payment formulas and amortization schedules

use serde::{Deserialize, Serialize};

use crate::inputs::{ExpenseAssumptions, LoanTerms};
use super::state::{LoanState, PaymentRow};
use super::terms::fraction;

/// Fixed monthly principal-and-interest payment
///
/// `M = P * r(1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate and `n` the
/// number of payments. A zero rate is amortized straight-line as `P / n`.
///
/// # Arguments
/// * `principal` - Amount financed
/// * `annual_rate` - Annual interest rate as a fraction (0.065 for 6.5%)
/// * `term_years` - Amortization term in years
pub fn monthly_payment(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    if principal <= 0.0 || term_years == 0 {
        return 0.0;
    }

    let months = u64::from(term_years) * 12;
    let r = annual_rate / 12.0;

    if r == 0.0 {
        return principal / months as f64;
    }

    // A term too long to compound converges on interest-only
    let growth = match i32::try_from(months) {
        Ok(n) => (1.0 + r).powi(n),
        Err(_) => return principal * r,
    };
    if !growth.is_finite() {
        return principal * r;
    }

    principal * r * growth / (growth - 1.0)
}

/// Closed-form balance after `months_paid` scheduled payments
///
/// Used to audit the month-by-month amortizer; the engine itself always
/// steps through the schedule.
pub fn remaining_balance(principal: f64, annual_rate: f64, term_years: u32, months_paid: u32) -> f64 {
    if principal <= 0.0 || term_years == 0 {
        return 0.0;
    }

    let total_payments = u64::from(term_years) * 12;
    if u64::from(months_paid) >= total_payments {
        return 0.0;
    }

    let payment = monthly_payment(principal, annual_rate, term_years);
    let r = annual_rate / 12.0;

    if r == 0.0 {
        return (principal - payment * months_paid as f64).max(0.0);
    }

    let growth = match i32::try_from(total_payments - u64::from(months_paid)) {
        Ok(remaining) => (1.0 + r).powi(remaining),
        Err(_) => f64::INFINITY,
    };
    if !growth.is_finite() {
        return (payment / r).max(0.0);
    }

    (payment * (growth - 1.0) / (r * growth)).max(0.0)
}

/// Full month-by-month amortization schedule for the loan
pub fn amortization_schedule(loan: &LoanTerms) -> Vec<PaymentRow> {
    let annual_rate = fraction(loan.interest_rate);
    let payment = monthly_payment(loan.loan_amount(), annual_rate, loan.loan_term_years);
    let mut state = LoanState::new(loan.loan_amount(), annual_rate / 12.0, payment, loan.total_payments());

    (0..loan.total_payments()).map(|_| state.advance_month()).collect()
}

/// Monthly housing cost: principal and interest plus escrowed items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub principal_and_interest: f64,
    pub property_tax: f64,
    pub insurance: f64,
    pub hoa: f64,
    pub total: f64,
}

impl PaymentBreakdown {
    /// Year-one monthly cost of carrying the property
    pub fn from_inputs(loan: &LoanTerms, expenses: &ExpenseAssumptions) -> Self {
        let principal_and_interest =
            monthly_payment(loan.loan_amount(), fraction(loan.interest_rate), loan.loan_term_years);
        let property_tax = expenses.property_taxes / 12.0;
        let insurance = expenses.annual_insurance() / 12.0;
        let hoa = expenses.hoa_fees;

        Self {
            principal_and_interest,
            property_tax,
            insurance,
            hoa,
            total: principal_and_interest + property_tax + insurance + hoa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_standard_payment() {
        // $320k at 6.5% over 30 years
        let payment = monthly_payment(320_000.0, 0.065, 30);
        assert_abs_diff_eq!(payment, 2022.62, epsilon = 0.01);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(120_000.0, 0.0, 10), 1_000.0);
        assert_eq!(remaining_balance(120_000.0, 0.0, 10, 60), 60_000.0);
    }

    #[test]
    fn test_no_principal_no_payment() {
        assert_eq!(monthly_payment(0.0, 0.065, 30), 0.0);
        assert_eq!(remaining_balance(0.0, 0.065, 30, 12), 0.0);
    }

    #[test]
    fn test_schedule_matches_closed_form() {
        let loan = LoanTerms::default();
        let schedule = amortization_schedule(&loan);

        assert_eq!(schedule.len(), 360);
        for months_paid in [12, 60, 120, 240, 359] {
            let expected = remaining_balance(320_000.0, 0.065, 30, months_paid);
            let row = &schedule[months_paid as usize - 1];
            assert_abs_diff_eq!(row.balance, expected, epsilon = 1e-4);
        }
        assert_eq!(schedule.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_schedule_repays_principal() {
        let loan = LoanTerms::new(250_000.0, 50_000.0, 7.0, 15);
        let schedule = amortization_schedule(&loan);

        let principal: f64 = schedule.iter().map(|r| r.principal).sum();
        assert_abs_diff_eq!(principal, 200_000.0, epsilon = 1e-6);
        for row in &schedule {
            assert_abs_diff_eq!(row.payment, row.interest + row.principal, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_payment_breakdown() {
        let breakdown = PaymentBreakdown::from_inputs(&LoanTerms::default(), &ExpenseAssumptions::default());

        assert_abs_diff_eq!(breakdown.property_tax, 5_000.0 / 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(breakdown.insurance, 2_000.0 / 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            breakdown.total,
            breakdown.principal_and_interest + breakdown.property_tax + breakdown.insurance,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_overlong_term_stays_finite() {
        // Far past the point where compounding overflows
        for term in [20_000, 200_000_000, u32::MAX] {
            let payment = monthly_payment(320_000.0, 0.065, term);
            assert!(payment.is_finite() && payment > 0.0, "term {}", term);
            assert_abs_diff_eq!(payment, 320_000.0 * 0.065 / 12.0, epsilon = 1e-6);

            let balance = remaining_balance(320_000.0, 0.065, term, 12);
            assert!(balance.is_finite());
            assert!(balance <= 320_000.0 + 1e-6);
        }

        let payment = monthly_payment(320_000.0, 100.0, 30);
        assert_abs_diff_eq!(payment, 320_000.0 * 100.0 / 12.0, epsilon = 1e-6);
    }
}
