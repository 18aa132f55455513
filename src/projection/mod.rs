//! Projection engine: amortization, yearly cash flows and return metrics,
//! plus the BRRRR refinance and depreciation calculators

mod terms;
mod state;
mod engine;
mod cashflows;
pub mod irr;
pub mod mortgage;
pub mod brrrr;
pub mod depreciation;

pub use state::{LoanState, PaymentRow, ProjectionState, YearOfPayments};
pub use engine::{compute, EngineConfig, ProjectionEngine};
pub use cashflows::{CalculatedMetrics, MonthlyBreakdown, ProjectionSummary, YearlyProjection};
pub use irr::{calculate_irr, IrrSettings};
pub use mortgage::{amortization_schedule, monthly_payment, remaining_balance, PaymentBreakdown};
pub use brrrr::{analyze_brrrr, BrrrrAnalysis, BrrrrDeal};
pub use depreciation::{calculate_depreciation, DepreciationInputs, DepreciationResult, DepreciationYear, PropertyClass};
