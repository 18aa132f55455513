//! Purchase and financing terms

use serde::{Deserialize, Serialize};

/// Financing terms for the purchase
///
/// Rates are whole-number percents (`6.5` means 6.5%), matching the
/// calculator form. They are converted to fractions once, when the engine
/// resolves its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    /// Purchase price of the property
    pub purchase_price: f64,

    /// Cash down payment ($)
    pub down_payment: f64,

    /// Annual interest rate (%)
    pub interest_rate: f64,

    /// Amortization term in years (typically 15 or 30)
    #[serde(alias = "loanTerm")]
    pub loan_term_years: u32,

    /// Points charged at origination (% of loan amount)
    #[serde(default, alias = "loanPoints")]
    pub points: f64,

    /// Closing costs paid in cash ($)
    #[serde(default)]
    pub closing_costs: f64,
}

impl LoanTerms {
    /// Create loan terms with no points and no closing costs
    pub fn new(purchase_price: f64, down_payment: f64, interest_rate: f64, loan_term_years: u32) -> Self {
        Self {
            purchase_price,
            down_payment,
            interest_rate,
            loan_term_years,
            points: 0.0,
            closing_costs: 0.0,
        }
    }

    /// Amount financed: purchase price less down payment
    pub fn loan_amount(&self) -> f64 {
        self.purchase_price - self.down_payment
    }

    /// Down payment as a percent of the purchase price
    pub fn down_payment_percent(&self) -> f64 {
        if self.purchase_price == 0.0 {
            0.0
        } else {
            self.down_payment / self.purchase_price * 100.0
        }
    }

    /// Points expressed in dollars
    pub fn points_cost(&self) -> f64 {
        self.loan_amount() * self.points / 100.0
    }

    /// Cash needed at close: down payment + closing costs + points
    pub fn total_cash_invested(&self) -> f64 {
        self.down_payment + self.closing_costs + self.points_cost()
    }

    /// Number of scheduled monthly payments
    pub fn total_payments(&self) -> u32 {
        self.loan_term_years.saturating_mul(12)
    }
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            purchase_price: 400_000.0,
            down_payment: 80_000.0,
            interest_rate: 6.5,
            loan_term_years: 30,
            points: 0.0,
            closing_costs: 10_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_amounts() {
        let loan = LoanTerms {
            points: 1.0,
            ..LoanTerms::default()
        };

        assert_eq!(loan.loan_amount(), 320_000.0);
        assert_eq!(loan.down_payment_percent(), 20.0);
        assert_eq!(loan.points_cost(), 3_200.0);
        assert_eq!(loan.total_cash_invested(), 93_200.0);
        assert_eq!(loan.total_payments(), 360);
    }

    #[test]
    fn test_payment_count_saturates() {
        let loan = LoanTerms {
            loan_term_years: 400_000_000,
            ..LoanTerms::default()
        };
        assert_eq!(loan.total_payments(), u32::MAX);
    }

    #[test]
    fn test_accepts_form_field_names() {
        let json = r#"{
            "purchasePrice": 250000,
            "downPayment": 50000,
            "downPaymentPercent": 20,
            "loanAmount": 200000,
            "interestRate": 7,
            "loanTerm": 15,
            "loanPoints": 0.5,
            "closingCosts": 4000
        }"#;

        let loan: LoanTerms = serde_json::from_str(json).unwrap();
        assert_eq!(loan.loan_term_years, 15);
        assert_eq!(loan.points, 0.5);
        assert_eq!(loan.loan_amount(), 200_000.0);
    }
}
