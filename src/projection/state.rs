//! Running state of a projection: the loan being amortized and the
//! accumulated cash flow

use serde::{Deserialize, Serialize};

use super::terms::ResolvedTerms;

/// One month of the amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    /// Payment number (1-indexed)
    pub month: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Balance after this payment
    pub balance: f64,
}

/// Outstanding loan, stepped one payment at a time
#[derive(Debug, Clone)]
pub struct LoanState {
    /// Outstanding principal
    pub balance: f64,

    /// Payments made so far
    pub month: u32,

    monthly_rate: f64,
    payment: f64,
    total_payments: u32,
}

impl LoanState {
    pub fn new(principal: f64, monthly_rate: f64, payment: f64, total_payments: u32) -> Self {
        Self {
            balance: principal.max(0.0),
            month: 0,
            monthly_rate,
            payment,
            total_payments,
        }
    }

    pub fn is_paid_off(&self) -> bool {
        self.balance <= 0.0
    }

    /// Make the next monthly payment
    ///
    /// The last scheduled payment, or any payment that would overshoot,
    /// clears the remaining balance exactly. After payoff every month is a
    /// zero row.
    pub fn advance_month(&mut self) -> PaymentRow {
        self.month += 1;

        if self.is_paid_off() {
            return PaymentRow {
                month: self.month,
                payment: 0.0,
                interest: 0.0,
                principal: 0.0,
                balance: 0.0,
            };
        }

        let interest = self.balance * self.monthly_rate;
        let payoff = self.balance + interest;

        let (payment, principal) = if self.month >= self.total_payments || self.payment >= payoff {
            (payoff, self.balance)
        } else {
            // A payment short of the interest leaves the balance unchanged
            (self.payment, (self.payment - interest).max(0.0))
        };

        self.balance = if principal >= self.balance {
            0.0
        } else {
            self.balance - principal
        };

        PaymentRow {
            month: self.month,
            payment,
            interest,
            principal,
            balance: self.balance,
        }
    }
}

/// Debt totals for one projection year
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearOfPayments {
    pub debt_service: f64,
    pub interest: f64,
    pub principal: f64,
}

/// State carried from one projection year to the next
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection year (0 before the first year is run)
    pub year: u32,

    pub loan: LoanState,

    /// Sum of cash flow over the years projected so far
    pub cumulative_cash_flow: f64,
}

impl ProjectionState {
    pub(crate) fn from_terms(terms: &ResolvedTerms) -> Self {
        Self {
            year: 0,
            loan: LoanState::new(
                terms.loan_amount,
                terms.monthly_rate,
                terms.monthly_payment,
                terms.total_payments,
            ),
            cumulative_cash_flow: 0.0,
        }
    }

    /// Advance to the next year and amortize its twelve payments
    pub fn advance_year(&mut self) -> YearOfPayments {
        self.year += 1;

        let mut totals = YearOfPayments::default();
        for _ in 0..12 {
            let row = self.loan.advance_month();
            totals.debt_service += row.payment;
            totals.interest += row.interest;
            totals.principal += row.principal;
        }

        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_never_negative() {
        // Payment larger than the balance: first month pays off
        let mut loan = LoanState::new(500.0, 0.01, 1_000.0, 12);
        let row = loan.advance_month();

        assert_eq!(row.payment, 505.0);
        assert_eq!(row.principal, 500.0);
        assert_eq!(row.balance, 0.0);
        assert!(loan.is_paid_off());

        let after = loan.advance_month();
        assert_eq!(after.payment, 0.0);
        assert_eq!(after.balance, 0.0);
    }

    #[test]
    fn test_final_payment_clears_residual() {
        // Payment slightly short of amortizing; last month settles the rest
        let mut loan = LoanState::new(1_200.0, 0.0, 99.0, 12);
        let rows: Vec<_> = (0..12).map(|_| loan.advance_month()).collect();

        assert_eq!(rows[10].balance, 1_200.0 - 11.0 * 99.0);
        assert_eq!(rows[11].payment, 1_200.0 - 11.0 * 99.0);
        assert_eq!(rows[11].balance, 0.0);
    }

    #[test]
    fn test_payment_below_interest_holds_balance() {
        let mut loan = LoanState::new(1_000.0, 0.01, 5.0, 12);
        let rows: Vec<_> = (0..12).map(|_| loan.advance_month()).collect();

        assert_eq!(rows[0].principal, 0.0);
        assert_eq!(rows[10].balance, 1_000.0);
        assert_eq!(rows[11].balance, 0.0);
    }

    #[test]
    fn test_year_totals() {
        let mut loan_only = LoanState::new(12_000.0, 0.0, 1_000.0, 12);
        let mut state = ProjectionState {
            year: 0,
            loan: loan_only.clone(),
            cumulative_cash_flow: 0.0,
        };

        let totals = state.advance_year();
        assert_eq!(state.year, 1);
        assert_eq!(totals.debt_service, 12_000.0);
        assert_eq!(totals.principal, 12_000.0);
        assert_eq!(totals.interest, 0.0);
        assert!(state.loan.is_paid_off());

        let second = state.advance_year();
        assert_eq!(second, YearOfPayments::default());

        loan_only.advance_month();
        assert_eq!(loan_only.balance, 11_000.0);
    }
}
