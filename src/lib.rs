//! Rental ROI - multi-year return-on-investment projections for rental property
//!
//! This library provides:
//! - Mortgage payment and month-by-month amortization
//! - Year-by-year income, expense, cash flow and equity projections
//! - Summary metrics (cash-on-cash, cap rate, DSCR, IRR) with explicit guards
//! - BRRRR refinance analysis and straight-line depreciation
//! - Batch and sensitivity runs over many input snapshots
//! - CSV reports and the saved-calculation payload

pub mod error;
pub mod inputs;
pub mod validation;
pub mod projection;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{DataError, InvalidInput, MetricWarning, ProjectionError};
pub use inputs::{ExpenseAssumptions, IncomeAssumptions, LoanTerms, ProjectionInputs, ProjectionSettings};
pub use projection::{compute, CalculatedMetrics, EngineConfig, ProjectionEngine, YearlyProjection};
pub use scenario::{ScenarioRunner, SweepField};
