//! Projection output structures

use serde::{Deserialize, Serialize};

use crate::error::MetricWarning;

/// Results for one projection year
///
/// Values are unrounded; rounding to cents happens only when a report is
/// written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyProjection {
    pub year: u32,

    // Income
    /// Scheduled rent plus other income, before vacancy
    pub gross_income: f64,
    pub vacancy_loss: f64,
    /// Income actually collected
    pub effective_income: f64,

    // Operations
    pub operating_expenses: f64,
    #[serde(rename = "noi")]
    pub net_operating_income: f64,

    // Debt
    pub debt_service: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,

    // Cash
    pub cash_flow: f64,
    pub cumulative_cash_flow: f64,

    // Balance sheet at year end
    pub loan_balance: f64,
    pub property_value: f64,
    pub equity: f64,

    // Returns
    /// Cumulative cash flow plus equity, less cash invested
    pub total_return: f64,
    #[serde(rename = "roi")]
    pub roi_pct: f64,
}

/// Summary metrics and the full year-by-year projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedMetrics {
    // Financing
    #[serde(rename = "monthlyMortgage")]
    pub monthly_mortgage_payment: f64,
    pub total_cash_invested: f64,

    // Year-one headline figures
    pub gross_monthly_income: f64,
    pub total_monthly_expenses: f64,
    pub net_monthly_cash_flow: f64,
    pub annual_cash_flow: f64,
    #[serde(rename = "annualNOI")]
    pub annual_noi: f64,
    pub annual_debt_service: f64,

    // Key ratios; None when the ratio is undefined (see `warnings`)
    #[serde(rename = "cashOnCashReturn")]
    pub cash_on_cash_return_pct: Option<f64>,
    #[serde(rename = "capRate")]
    pub cap_rate_pct: Option<f64>,
    pub dscr: Option<f64>,
    #[serde(rename = "irr")]
    pub irr_pct: Option<f64>,

    pub yearly_projections: Vec<YearlyProjection>,

    /// Metrics that were guarded or did not converge
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<MetricWarning>,
}

impl CalculatedMetrics {
    /// Projection for the first year
    pub fn first_year(&self) -> Option<&YearlyProjection> {
        self.yearly_projections.first()
    }

    /// Projection for the last year of the horizon
    pub fn final_year(&self) -> Option<&YearlyProjection> {
        self.yearly_projections.last()
    }

    pub fn has_warning(&self, warning: MetricWarning) -> bool {
        self.warnings.contains(&warning)
    }

    /// Aggregate figures over the whole horizon
    pub fn summary(&self) -> ProjectionSummary {
        let total_cash_flow: f64 = self.yearly_projections.iter().map(|y| y.cash_flow).sum();
        let total_interest: f64 = self.yearly_projections.iter().map(|y| y.interest_paid).sum();
        let total_debt_service: f64 = self.yearly_projections.iter().map(|y| y.debt_service).sum();

        let final_year = self.final_year();

        ProjectionSummary {
            total_years: self.yearly_projections.len() as u32,
            total_cash_flow,
            total_interest,
            total_debt_service,
            final_property_value: final_year.map(|y| y.property_value).unwrap_or(0.0),
            final_loan_balance: final_year.map(|y| y.loan_balance).unwrap_or(0.0),
            final_equity: final_year.map(|y| y.equity).unwrap_or(0.0),
            final_total_return: final_year.map(|y| y.total_return).unwrap_or(0.0),
            final_roi_pct: final_year.map(|y| y.roi_pct).unwrap_or(0.0),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub total_cash_flow: f64,
    pub total_interest: f64,
    pub total_debt_service: f64,
    pub final_property_value: f64,
    pub final_loan_balance: f64,
    pub final_equity: f64,
    pub final_total_return: f64,
    pub final_roi_pct: f64,
}

/// One month of the first projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdown {
    /// Calendar month name, January first
    pub month: String,
    /// Collected income
    pub income: f64,
    /// Operating expenses
    pub expenses: f64,
    /// Mortgage payment
    pub mortgage: f64,
    pub interest: f64,
    pub principal: f64,
    pub net_cash_flow: f64,
}
