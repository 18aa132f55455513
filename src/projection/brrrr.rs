//! Buy, rehab, rent, refinance, repeat
//!
//! Values a deal at the refinance: how much of the purchase and rehab cash
//! the cash-out loan returns, and what the rental earns on what is left in.

use serde::{Deserialize, Serialize};

use crate::error::{MetricWarning, ProjectionError};
use crate::validation::validate_brrrr;
use super::mortgage::monthly_payment;
use super::terms::fraction;

/// One BRRRR deal from purchase through refinance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrrrrDeal {
    pub purchase_price: f64,

    /// Cash put down at purchase ($)
    pub down_payment: f64,

    #[serde(default)]
    pub closing_costs: f64,

    /// Renovation budget paid in cash ($)
    #[serde(default)]
    pub rehab_costs: f64,

    /// Appraised value after the rehab ($)
    #[serde(alias = "arv")]
    pub after_repair_value: f64,

    /// Refinance loan-to-value (% of after-repair value)
    #[serde(alias = "refinanceLTV")]
    pub refinance_ltv: f64,

    /// Refinance interest rate (annual %)
    pub refinance_rate: f64,

    /// Refinance amortization term in years
    #[serde(default = "default_refinance_term")]
    pub refinance_term_years: u32,

    pub monthly_rent: f64,

    /// Monthly operating costs excluding the mortgage ($)
    #[serde(default)]
    pub monthly_expenses: f64,
}

fn default_refinance_term() -> u32 {
    30
}

impl Default for BrrrrDeal {
    fn default() -> Self {
        Self {
            purchase_price: 150_000.0,
            down_payment: 30_000.0,
            closing_costs: 5_000.0,
            rehab_costs: 40_000.0,
            after_repair_value: 250_000.0,
            refinance_ltv: 75.0,
            refinance_rate: 7.0,
            refinance_term_years: default_refinance_term(),
            monthly_rent: 2_200.0,
            monthly_expenses: 800.0,
        }
    }
}

/// Refinance outcome and post-refinance rental returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrrrrAnalysis {
    /// Down payment, closing costs and rehab
    pub total_initial_cash: f64,
    /// Purchase price, closing costs and rehab
    pub total_project_cost: f64,
    pub purchase_loan_amount: f64,
    pub new_loan_amount: f64,
    /// New loan less payoff of the purchase loan
    pub cash_out_refinance: f64,
    pub cash_left_in_deal: f64,
    /// Negative when the refinance needs more cash than it returns
    pub cash_recouped: f64,
    pub cash_recouped_pct: Option<f64>,
    pub monthly_mortgage: f64,
    pub monthly_cash_flow: f64,
    pub annual_cash_flow: f64,
    /// Annual cash flow over cash left in the deal; `None` once all cash is out
    pub cash_on_cash_return_pct: Option<f64>,
    /// After-repair value less the new loan
    pub equity: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<MetricWarning>,
}

/// Analyze a deal at its refinance
pub fn analyze_brrrr(deal: &BrrrrDeal) -> Result<BrrrrAnalysis, ProjectionError> {
    validate_brrrr(deal)?;

    let total_initial_cash = deal.down_payment + deal.closing_costs + deal.rehab_costs;
    let total_project_cost = deal.purchase_price + deal.closing_costs + deal.rehab_costs;
    let purchase_loan_amount = deal.purchase_price - deal.down_payment;

    let new_loan_amount = deal.after_repair_value * fraction(deal.refinance_ltv);
    let cash_out_refinance = new_loan_amount - purchase_loan_amount;

    let cash_left_in_deal = (total_project_cost - new_loan_amount).max(0.0);
    let cash_recouped = total_initial_cash - cash_left_in_deal;

    let mut warnings = Vec::new();

    let cash_recouped_pct = if total_initial_cash > 0.0 {
        Some(cash_recouped / total_initial_cash * 100.0)
    } else {
        warnings.push(MetricWarning::ZeroCashInvested);
        None
    };

    let monthly_mortgage = monthly_payment(
        new_loan_amount,
        fraction(deal.refinance_rate),
        deal.refinance_term_years,
    );
    let monthly_cash_flow = deal.monthly_rent - deal.monthly_expenses - monthly_mortgage;
    let annual_cash_flow = monthly_cash_flow * 12.0;

    let cash_on_cash_return_pct = if cash_left_in_deal > 0.0 {
        Some(annual_cash_flow / cash_left_in_deal * 100.0)
    } else {
        warnings.push(MetricWarning::NoCashLeftInDeal);
        None
    };

    for warning in &warnings {
        log::warn!("{}", warning);
    }

    Ok(BrrrrAnalysis {
        total_initial_cash,
        total_project_cost,
        purchase_loan_amount,
        new_loan_amount,
        cash_out_refinance,
        cash_left_in_deal,
        cash_recouped,
        cash_recouped_pct,
        monthly_mortgage,
        monthly_cash_flow,
        annual_cash_flow,
        cash_on_cash_return_pct,
        equity: deal.after_repair_value - new_loan_amount,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_deal() {
        let analysis = analyze_brrrr(&BrrrrDeal::default()).unwrap();

        assert_eq!(analysis.total_initial_cash, 75_000.0);
        assert_eq!(analysis.total_project_cost, 195_000.0);
        assert_eq!(analysis.new_loan_amount, 187_500.0);
        assert_eq!(analysis.cash_out_refinance, 67_500.0);
        assert_eq!(analysis.cash_left_in_deal, 7_500.0);
        assert_eq!(analysis.cash_recouped, 67_500.0);
        assert_abs_diff_eq!(analysis.cash_recouped_pct.unwrap(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(analysis.monthly_mortgage, 1247.4421784609667, epsilon = 1e-8);
        assert_abs_diff_eq!(analysis.annual_cash_flow, 1830.6938584683994, epsilon = 1e-7);
        assert_abs_diff_eq!(analysis.cash_on_cash_return_pct.unwrap(), 24.409251446245325, epsilon = 1e-8);
        assert_eq!(analysis.equity, 62_500.0);
        assert!(analysis.warnings.is_empty());
    }

    #[test]
    fn test_all_cash_recouped() {
        let deal = BrrrrDeal {
            after_repair_value: 300_000.0,
            ..BrrrrDeal::default()
        };
        let analysis = analyze_brrrr(&deal).unwrap();

        // 225k loan covers the 195k project cost
        assert_eq!(analysis.cash_left_in_deal, 0.0);
        assert_eq!(analysis.cash_recouped, analysis.total_initial_cash);
        assert_eq!(analysis.cash_on_cash_return_pct, None);
        assert_eq!(analysis.warnings, vec![MetricWarning::NoCashLeftInDeal]);
    }

    #[test]
    fn test_low_appraisal_leaves_more_cash_in() {
        let deal = BrrrrDeal {
            after_repair_value: 140_000.0,
            ..BrrrrDeal::default()
        };
        let analysis = analyze_brrrr(&deal).unwrap();

        // 105k loan does not even pay off the 120k purchase loan
        assert!(analysis.cash_out_refinance < 0.0);
        assert!(analysis.cash_left_in_deal > analysis.total_initial_cash);
        assert!(analysis.cash_recouped < 0.0);
    }

    #[test]
    fn test_form_field_names() {
        let json = r#"{
            "purchasePrice": 150000,
            "downPayment": 30000,
            "closingCosts": 5000,
            "rehabCosts": 40000,
            "rehabDuration": 6,
            "arv": 250000,
            "refinanceLTV": 75,
            "refinanceRate": 7.0,
            "monthlyRent": 2200,
            "monthlyExpenses": 800
        }"#;

        let deal: BrrrrDeal = serde_json::from_str(json).unwrap();
        assert_eq!(deal, BrrrrDeal::default());
    }

    #[test]
    fn test_invalid_deal_is_rejected() {
        let deal = BrrrrDeal {
            after_repair_value: 0.0,
            refinance_ltv: 150.0,
            refinance_term_years: 0,
            ..BrrrrDeal::default()
        };

        let err = analyze_brrrr(&deal).unwrap_err();
        assert_eq!(
            err.fields(),
            vec!["afterRepairValue", "refinanceLtv", "refinanceTermYears"]
        );
    }
}
