//! Core projection engine for year-by-year rental property returns

use chrono::Month;

use crate::error::{MetricWarning, ProjectionError};
use crate::inputs::{ExpenseAssumptions, IncomeAssumptions, LoanTerms, ProjectionInputs, ProjectionSettings};
use crate::validation::validate;
use super::cashflows::{CalculatedMetrics, MonthlyBreakdown, YearlyProjection};
use super::irr::{calculate_irr, IrrSettings};
use super::state::{LoanState, ProjectionState};
use super::terms::ResolvedTerms;

/// Configuration for the projection engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// IRR convergence threshold on the rate step
    pub irr_tolerance: f64,

    /// IRR iteration budget (applied to Newton-Raphson and to the bisection fallback)
    pub irr_max_iterations: u32,

    /// Starting rate for the IRR search, as a fraction
    pub irr_initial_guess: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let irr = IrrSettings::default();
        Self {
            irr_tolerance: irr.tolerance,
            irr_max_iterations: irr.max_iterations,
            irr_initial_guess: irr.initial_guess,
        }
    }
}

impl EngineConfig {
    fn irr_settings(&self) -> IrrSettings {
        IrrSettings {
            tolerance: self.irr_tolerance,
            max_iterations: self.irr_max_iterations,
            initial_guess: self.irr_initial_guess,
        }
    }
}

/// Main projection engine
///
/// Stateless apart from its configuration: every call works on its own
/// input snapshot, so one engine can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: EngineConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the projection for one input snapshot
    ///
    /// Fails with every invalid field before any computation; on success all
    /// `analysis_years` rows are present.
    pub fn compute(
        &self,
        loan: &LoanTerms,
        expenses: &ExpenseAssumptions,
        income: &IncomeAssumptions,
        settings: &ProjectionSettings,
    ) -> Result<CalculatedMetrics, ProjectionError> {
        validate(loan, expenses, income, settings)?;
        let terms = ResolvedTerms::from_inputs(loan, expenses, income, settings);

        log::debug!(
            "Projecting {} years: loan {:.2} at {:.4}% for {} payments, payment {:.2}",
            terms.analysis_years,
            terms.loan_amount,
            terms.annual_rate * 100.0,
            terms.total_payments,
            terms.monthly_payment,
        );

        let mut warnings = Vec::new();
        if terms.total_cash_invested <= 0.0 {
            warnings.push(MetricWarning::ZeroCashInvested);
        }

        let yearly_projections = self.project_years(&terms);

        // analysis_years >= 1 after validation
        let first = &yearly_projections[0];

        let cash_on_cash_return_pct = if terms.total_cash_invested > 0.0 {
            Some(first.cash_flow / terms.total_cash_invested * 100.0)
        } else {
            None
        };

        let cap_rate_pct = if terms.purchase_price > 0.0 {
            Some(first.net_operating_income / terms.purchase_price * 100.0)
        } else {
            warnings.push(MetricWarning::ZeroPurchasePrice);
            None
        };

        let dscr = if first.debt_service > 0.0 {
            Some(first.net_operating_income / first.debt_service)
        } else {
            warnings.push(MetricWarning::ZeroDebtService);
            None
        };

        let irr_pct = if terms.total_cash_invested > 0.0 {
            let irr = calculate_irr(&irr_cashflows(&terms, &yearly_projections), &self.config.irr_settings());
            if irr.is_none() {
                warnings.push(MetricWarning::IrrNotConverged);
            }
            irr.map(|rate| rate * 100.0)
        } else {
            None
        };

        for warning in &warnings {
            log::warn!("{}", warning);
        }

        Ok(CalculatedMetrics {
            monthly_mortgage_payment: terms.monthly_payment,
            total_cash_invested: terms.total_cash_invested,
            gross_monthly_income: first.effective_income / 12.0,
            total_monthly_expenses: first.operating_expenses / 12.0,
            net_monthly_cash_flow: first.cash_flow / 12.0,
            annual_cash_flow: first.cash_flow,
            annual_noi: first.net_operating_income,
            annual_debt_service: first.debt_service,
            cash_on_cash_return_pct,
            cap_rate_pct,
            dscr,
            irr_pct,
            yearly_projections,
            warnings,
        })
    }

    /// Run the projection for a bundled snapshot
    pub fn compute_inputs(&self, inputs: &ProjectionInputs) -> Result<CalculatedMetrics, ProjectionError> {
        self.compute(&inputs.loan, &inputs.expenses, &inputs.income, &inputs.settings)
    }

    /// Month-by-month view of the first projection year
    pub fn monthly_breakdown(
        &self,
        loan: &LoanTerms,
        expenses: &ExpenseAssumptions,
        income: &IncomeAssumptions,
        settings: &ProjectionSettings,
    ) -> Result<Vec<MonthlyBreakdown>, ProjectionError> {
        validate(loan, expenses, income, settings)?;
        let terms = ResolvedTerms::from_inputs(loan, expenses, income, settings);

        let collected = (terms.monthly_rent + terms.monthly_other_income) * (1.0 - terms.vacancy_rate);
        let monthly_expenses = terms.operating_expenses(1, collected * 12.0) / 12.0;

        let mut loan_state = LoanState::new(
            terms.loan_amount,
            terms.monthly_rate,
            terms.monthly_payment,
            terms.total_payments,
        );
        let mut month = Month::January;
        let mut rows = Vec::with_capacity(12);

        for _ in 0..12 {
            let payment = loan_state.advance_month();
            rows.push(MonthlyBreakdown {
                month: month.name().to_string(),
                income: collected,
                expenses: monthly_expenses,
                mortgage: payment.payment,
                interest: payment.interest,
                principal: payment.principal,
                net_cash_flow: collected - monthly_expenses - payment.payment,
            });
            month = month.succ();
        }

        Ok(rows)
    }

    /// Project every year of the horizon
    fn project_years(&self, terms: &ResolvedTerms) -> Vec<YearlyProjection> {
        let mut state = ProjectionState::from_terms(terms);
        let mut rows = Vec::with_capacity(terms.analysis_years as usize);

        for _ in 0..terms.analysis_years {
            // Twelve amortization payments, month by month
            let payments = state.advance_year();
            let year = state.year;

            // Income
            let gross_income = terms.monthly_rent_in_year(year) * 12.0 + terms.monthly_other_income * 12.0;
            let effective_income = gross_income * (1.0 - terms.vacancy_rate);
            let vacancy_loss = gross_income - effective_income;

            // Operations
            let operating_expenses = terms.operating_expenses(year, effective_income);
            let net_operating_income = effective_income - operating_expenses;

            // Cash
            let cash_flow = net_operating_income - payments.debt_service;
            state.cumulative_cash_flow += cash_flow;

            // Balance sheet
            let loan_balance = state.loan.balance;
            let property_value = terms.property_value_at(year);
            let equity = property_value - loan_balance;

            // Returns
            let total_return = state.cumulative_cash_flow + equity - terms.total_cash_invested;
            let roi_pct = if terms.total_cash_invested > 0.0 {
                total_return / terms.total_cash_invested * 100.0
            } else {
                0.0
            };

            rows.push(YearlyProjection {
                year,
                gross_income,
                vacancy_loss,
                effective_income,
                operating_expenses,
                net_operating_income,
                debt_service: payments.debt_service,
                interest_paid: payments.interest,
                principal_paid: payments.principal,
                cash_flow,
                cumulative_cash_flow: state.cumulative_cash_flow,
                loan_balance,
                property_value,
                equity,
                total_return,
                roi_pct,
            });
        }

        rows
    }
}

/// Cash flows for the IRR: the investment at t = 0, each year's cash flow,
/// and the final year's equity added to the last cash flow
fn irr_cashflows(terms: &ResolvedTerms, years: &[YearlyProjection]) -> Vec<f64> {
    let mut cashflows = Vec::with_capacity(years.len() + 1);
    cashflows.push(-terms.total_cash_invested);
    cashflows.extend(years.iter().map(|y| y.cash_flow));

    if let (Some(last_cf), Some(last_year)) = (cashflows.last_mut(), years.last()) {
        *last_cf += last_year.equity;
    }

    cashflows
}

/// Run a projection with the default engine configuration
pub fn compute(
    loan: &LoanTerms,
    expenses: &ExpenseAssumptions,
    income: &IncomeAssumptions,
    settings: &ProjectionSettings,
) -> Result<CalculatedMetrics, ProjectionError> {
    ProjectionEngine::default().compute(loan, expenses, income, settings)
}
