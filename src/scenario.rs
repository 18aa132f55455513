//! Scenario runner for batch and sensitivity projections
//!
//! Holds a base input snapshot and engine configuration, then evaluates many
//! independent variations of it. Each scenario is its own pure computation,
//! so batches are spread across rayon's thread pool.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use rayon::prelude::*;

use crate::error::{DataError, ProjectionError};
use crate::inputs::{NamedInputs, ProjectionInputs};
use crate::projection::{CalculatedMetrics, EngineConfig, ProjectionEngine};

/// Outcome of one scenario; a failed scenario does not affect the others
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: String,
    pub inputs: ProjectionInputs,
    pub result: Result<CalculatedMetrics, ProjectionError>,
}

/// Input field varied by a sensitivity sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepField {
    InterestRate,
    DownPayment,
    MonthlyRent,
    RentIncrease,
    VacancyRate,
    Appreciation,
}

impl SweepField {
    pub const ALL: [SweepField; 6] = [
        SweepField::InterestRate,
        SweepField::DownPayment,
        SweepField::MonthlyRent,
        SweepField::RentIncrease,
        SweepField::VacancyRate,
        SweepField::Appreciation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SweepField::InterestRate => "interest-rate",
            SweepField::DownPayment => "down-payment",
            SweepField::MonthlyRent => "monthly-rent",
            SweepField::RentIncrease => "rent-increase",
            SweepField::VacancyRate => "vacancy-rate",
            SweepField::Appreciation => "appreciation",
        }
    }

    /// Set this field on a copy of the inputs
    pub fn apply(&self, inputs: &ProjectionInputs, value: f64) -> ProjectionInputs {
        let mut varied = inputs.clone();
        match self {
            SweepField::InterestRate => varied.loan.interest_rate = value,
            SweepField::DownPayment => varied.loan.down_payment = value,
            SweepField::MonthlyRent => varied.income.monthly_rent = value,
            SweepField::RentIncrease => varied.income.annual_rent_increase_percent = value,
            SweepField::VacancyRate => varied.expenses.vacancy_rate = value,
            SweepField::Appreciation => varied.settings.annual_appreciation_percent = value,
        }
        varied
    }
}

impl fmt::Display for SweepField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SweepField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SweepField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<_> = SweepField::ALL.iter().map(|f| f.as_str()).collect();
                format!("unknown sweep field '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// Pre-configured runner for many projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_json_path(Path::new("deal.json"))?;
///
/// for result in runner.sweep(SweepField::InterestRate, &[5.5, 6.5, 7.5]) {
///     println!("{}: {:?}", result.name, result.result.map(|m| m.irr_pct));
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base_inputs: ProjectionInputs,
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the calculator's default inputs
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with pre-built inputs
    pub fn with_inputs(inputs: ProjectionInputs) -> Self {
        Self {
            base_inputs: inputs,
            engine: ProjectionEngine::default(),
        }
    }

    /// Create runner by loading base inputs from a JSON file
    pub fn from_json_path(path: &Path) -> Result<Self, DataError> {
        Ok(Self::with_inputs(ProjectionInputs::from_json_path(path)?))
    }

    /// Replace the engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.engine = ProjectionEngine::new(config);
        self
    }

    /// Project the base inputs
    pub fn run(&self) -> Result<CalculatedMetrics, ProjectionError> {
        self.engine.compute_inputs(&self.base_inputs)
    }

    /// Project many named snapshots in parallel; results keep input order
    pub fn run_batch(&self, scenarios: &[NamedInputs]) -> Vec<ScenarioResult> {
        let start = Instant::now();

        let results: Vec<ScenarioResult> = scenarios
            .par_iter()
            .map(|scenario| ScenarioResult {
                name: scenario.name.clone(),
                inputs: scenario.inputs.clone(),
                result: self.engine.compute_inputs(&scenario.inputs),
            })
            .collect();

        let failed = results.iter().filter(|r| r.result.is_err()).count();
        log::info!(
            "Projected {} scenarios ({} invalid) in {:?}",
            results.len(),
            failed,
            start.elapsed()
        );

        results
    }

    /// Vary one field of the base inputs over the given values
    pub fn sweep(&self, field: SweepField, values: &[f64]) -> Vec<ScenarioResult> {
        let scenarios: Vec<NamedInputs> = values
            .iter()
            .map(|&value| NamedInputs {
                name: format!("{}={}", field, value),
                inputs: field.apply(&self.base_inputs, value),
            })
            .collect();

        self.run_batch(&scenarios)
    }

    /// Get reference to base inputs for inspection
    pub fn inputs(&self) -> &ProjectionInputs {
        &self.base_inputs
    }

    /// Get mutable reference to base inputs for customization
    pub fn inputs_mut(&mut self) -> &mut ProjectionInputs {
        &mut self.base_inputs
    }
}
