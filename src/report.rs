//! Presentation output: CSV tables and the saved-calculation payload
//!
//! This is the only place values are rounded to cents. The engine's own
//! results stay at full precision.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::DataError;
use crate::inputs::ProjectionInputs;
use crate::projection::{CalculatedMetrics, YearlyProjection};
use crate::scenario::ScenarioResult;

/// Calculator type key used by the saved-calculations store
pub const CALCULATOR_TYPE: &str = "roi";

/// Round to two decimal places
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round_opt(value: Option<f64>) -> Option<f64> {
    value.map(round_cents)
}

fn round_year(year: &YearlyProjection) -> YearlyProjection {
    YearlyProjection {
        year: year.year,
        gross_income: round_cents(year.gross_income),
        vacancy_loss: round_cents(year.vacancy_loss),
        effective_income: round_cents(year.effective_income),
        operating_expenses: round_cents(year.operating_expenses),
        net_operating_income: round_cents(year.net_operating_income),
        debt_service: round_cents(year.debt_service),
        interest_paid: round_cents(year.interest_paid),
        principal_paid: round_cents(year.principal_paid),
        cash_flow: round_cents(year.cash_flow),
        cumulative_cash_flow: round_cents(year.cumulative_cash_flow),
        loan_balance: round_cents(year.loan_balance),
        property_value: round_cents(year.property_value),
        equity: round_cents(year.equity),
        total_return: round_cents(year.total_return),
        roi_pct: round_cents(year.roi_pct),
    }
}

/// Copy of the metrics with every figure rounded for display
pub fn rounded_for_display(metrics: &CalculatedMetrics) -> CalculatedMetrics {
    CalculatedMetrics {
        monthly_mortgage_payment: round_cents(metrics.monthly_mortgage_payment),
        total_cash_invested: round_cents(metrics.total_cash_invested),
        gross_monthly_income: round_cents(metrics.gross_monthly_income),
        total_monthly_expenses: round_cents(metrics.total_monthly_expenses),
        net_monthly_cash_flow: round_cents(metrics.net_monthly_cash_flow),
        annual_cash_flow: round_cents(metrics.annual_cash_flow),
        annual_noi: round_cents(metrics.annual_noi),
        annual_debt_service: round_cents(metrics.annual_debt_service),
        cash_on_cash_return_pct: round_opt(metrics.cash_on_cash_return_pct),
        cap_rate_pct: round_opt(metrics.cap_rate_pct),
        dscr: round_opt(metrics.dscr),
        irr_pct: round_opt(metrics.irr_pct),
        yearly_projections: metrics.yearly_projections.iter().map(round_year).collect(),
        warnings: metrics.warnings.clone(),
    }
}

/// Write the year-by-year table as CSV
pub fn write_yearly_csv<W: Write>(writer: W, metrics: &CalculatedMetrics) -> Result<(), DataError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for year in &metrics.yearly_projections {
        csv_writer.serialize(round_year(year))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the year-by-year table to a CSV file
pub fn write_yearly_csv_path(path: &Path, metrics: &CalculatedMetrics) -> Result<(), DataError> {
    write_yearly_csv(File::create(path)?, metrics)
}

/// One row of a batch summary
#[derive(Debug, Serialize)]
struct BatchRow<'a> {
    name: &'a str,
    status: String,
    monthly_mortgage: Option<f64>,
    total_cash_invested: Option<f64>,
    annual_noi: Option<f64>,
    annual_cash_flow: Option<f64>,
    cash_on_cash_return: Option<f64>,
    cap_rate: Option<f64>,
    dscr: Option<f64>,
    irr: Option<f64>,
    final_equity: Option<f64>,
    final_roi: Option<f64>,
}

impl<'a> BatchRow<'a> {
    fn from_result(scenario: &'a ScenarioResult) -> Self {
        match &scenario.result {
            Ok(metrics) => {
                let summary = metrics.summary();
                BatchRow {
                    name: &scenario.name,
                    status: "ok".to_string(),
                    monthly_mortgage: Some(round_cents(metrics.monthly_mortgage_payment)),
                    total_cash_invested: Some(round_cents(metrics.total_cash_invested)),
                    annual_noi: Some(round_cents(metrics.annual_noi)),
                    annual_cash_flow: Some(round_cents(metrics.annual_cash_flow)),
                    cash_on_cash_return: round_opt(metrics.cash_on_cash_return_pct),
                    cap_rate: round_opt(metrics.cap_rate_pct),
                    dscr: round_opt(metrics.dscr),
                    irr: round_opt(metrics.irr_pct),
                    final_equity: Some(round_cents(summary.final_equity)),
                    final_roi: Some(round_cents(summary.final_roi_pct)),
                }
            }
            Err(err) => BatchRow {
                name: &scenario.name,
                status: err.to_string(),
                monthly_mortgage: None,
                total_cash_invested: None,
                annual_noi: None,
                annual_cash_flow: None,
                cash_on_cash_return: None,
                cap_rate: None,
                dscr: None,
                irr: None,
                final_equity: None,
                final_roi: None,
            },
        }
    }
}

/// Write one summary line per scenario as CSV
pub fn write_batch_csv<W: Write>(writer: W, results: &[ScenarioResult]) -> Result<(), DataError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for scenario in results {
        csv_writer.serialize(BatchRow::from_result(scenario))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Body accepted by the saved-calculations API
///
/// The engine never talks to that store; callers serialize this and send it
/// themselves.
#[derive(Debug, Clone, Serialize)]
pub struct SavedCalculationPayload {
    pub calculator_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub input_data: ProjectionInputs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_data: Option<CalculatedMetrics>,
}

impl SavedCalculationPayload {
    /// Pair the inputs with their display-rounded results
    pub fn new(name: Option<String>, inputs: &ProjectionInputs, metrics: Option<&CalculatedMetrics>) -> Self {
        Self {
            calculator_type: CALCULATOR_TYPE,
            name,
            input_data: inputs.clone(),
            result_data: metrics.map(rounded_for_display),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::NamedInputs;
    use crate::scenario::ScenarioRunner;

    fn default_metrics() -> CalculatedMetrics {
        crate::projection::ProjectionEngine::default()
            .compute_inputs(&ProjectionInputs::default())
            .unwrap()
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(2022.6176751774892), 2022.62);
        assert_eq!(round_cents(-4601.412102129878), -4601.41);
        assert_eq!(round_cents(0.0), 0.0);
    }

    #[test]
    fn test_yearly_csv_has_one_row_per_year() {
        let metrics = default_metrics();
        let mut buffer = Vec::new();
        write_yearly_csv(&mut buffer, &metrics).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();

        assert!(header.starts_with("year,grossIncome,vacancyLoss,effectiveIncome"));
        assert!(header.contains(",noi,"));
        assert_eq!(lines.count(), 30);
    }

    #[test]
    fn test_rounding_leaves_engine_output_untouched() {
        let metrics = default_metrics();
        let rounded = rounded_for_display(&metrics);

        assert_eq!(rounded.monthly_mortgage_payment, 2022.62);
        assert_ne!(metrics.monthly_mortgage_payment, 2022.62);
        assert_eq!(rounded.yearly_projections.len(), metrics.yearly_projections.len());
    }

    #[test]
    fn test_batch_csv_reports_errors_inline() {
        let mut bad = ProjectionInputs::default();
        bad.settings.analysis_years = 0;
        let results = ScenarioRunner::new().run_batch(&[
            NamedInputs { name: "base".into(), inputs: ProjectionInputs::default() },
            NamedInputs { name: "broken".into(), inputs: bad },
        ]);

        let mut buffer = Vec::new();
        write_batch_csv(&mut buffer, &results).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("base,ok,2022.62,"));
        assert!(lines[2].starts_with("broken,"));
        assert!(lines[2].contains("analysisYears"));
    }

    #[test]
    fn test_saved_payload_shape() {
        let inputs = ProjectionInputs::default();
        let metrics = default_metrics();
        let payload = SavedCalculationPayload::new(Some("Main St".into()), &inputs, Some(&metrics));

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["calculator_type"], "roi");
        assert_eq!(value["name"], "Main St");
        assert_eq!(value["input_data"]["loan"]["purchasePrice"], 400000.0);
        assert_eq!(value["result_data"]["monthlyMortgage"], 2022.62);
        assert_eq!(value["result_data"]["yearlyProjections"].as_array().unwrap().len(), 30);
    }
}
