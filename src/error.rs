//! Error and warning types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {reason}")]
pub struct InvalidInput {
    /// Field name as it appears in the serialized inputs (e.g. `purchasePrice`)
    pub field: &'static str,
    pub reason: String,
}

impl InvalidInput {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self { field, reason: reason.into() }
    }
}

/// Failure to produce a projection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Every invalid field found, reported together
    #[error("invalid input: {}", join_fields(.0))]
    InvalidInput(Vec<InvalidInput>),
}

impl ProjectionError {
    /// Names of the offending fields, in validation order
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            ProjectionError::InvalidInput(errors) => errors.iter().map(|e| e.field).collect(),
        }
    }
}

fn join_fields(errors: &[InvalidInput]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A summary metric that could not be computed
///
/// The projection is still usable; the affected metric is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricWarning {
    /// IRR solver found no root within its iteration budget
    #[error("IRR did not converge; reported as null")]
    IrrNotConverged,

    /// No cash invested: ROI and cash-on-cash are undefined
    #[error("total cash invested is zero; ROI reported as 0 and cash-on-cash as null")]
    ZeroCashInvested,

    /// Purchase price of zero: cap rate is undefined
    ///
    /// Validation rejects a non-positive `purchasePrice` first, so a
    /// validated projection never carries this warning.
    #[error("purchase price is zero; cap rate reported as null")]
    ZeroPurchasePrice,

    /// No debt service in year one (all-cash purchase): DSCR is undefined
    #[error("year-one debt service is zero; DSCR reported as null")]
    ZeroDebtService,

    /// Refinance returned every dollar put in: cash-on-cash is unbounded
    #[error("no cash left in the deal after refinance; cash-on-cash reported as null")]
    NoCashLeftInDeal,
}

/// Failure reading or writing calculator data
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_lists_every_field() {
        let err = ProjectionError::InvalidInput(vec![
            InvalidInput::new("purchasePrice", "must be greater than 0"),
            InvalidInput::new("vacancyRate", "must be between 0 and 100"),
        ]);

        assert_eq!(err.fields(), vec!["purchasePrice", "vacancyRate"]);
        assert_eq!(
            err.to_string(),
            "invalid input: purchasePrice: must be greater than 0; vacancyRate: must be between 0 and 100"
        );
    }

    #[test]
    fn test_warning_serializes_as_camel_case() {
        let json = serde_json::to_string(&MetricWarning::ZeroDebtService).unwrap();
        assert_eq!(json, "\"zeroDebtService\"");
    }
}
