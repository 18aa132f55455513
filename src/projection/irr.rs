//! Internal Rate of Return (IRR) calculation
//!
//! Used to express the whole holding period, including the equity left at the
//! end of the horizon, as a single annual rate.

/// Solver limits for the IRR search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrSettings {
    /// Convergence threshold on the change in rate between iterations
    pub tolerance: f64,
    /// Iteration budget for each of Newton-Raphson and the bisection fallback
    pub max_iterations: u32,
    /// Starting rate for Newton-Raphson
    pub initial_guess: f64,
}

impl Default for IrrSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            initial_guess: 0.10,
        }
    }
}

const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 10.0;

/// Largest NPV accepted at a root, relative to the initial cash flow
const NPV_TOLERANCE: f64 = 1e-6;

/// Calculate the Internal Rate of Return for a series of annual cash flows
/// using the Newton-Raphson method, falling back to bisection.
///
/// # Arguments
/// * `cashflows` - Cash flows at t = 0, 1, 2, ... (positive = inflow, negative = outflow)
/// * `settings` - Tolerance and iteration budget
///
/// # Returns
/// * `Option<f64>` - Annual IRR as a fraction (0.05 for 5%), or None if no root
///   was found within the budget. A rate that has not converged is never returned.
pub fn calculate_irr(cashflows: &[f64], settings: &IrrSettings) -> Option<f64> {
    if cashflows.len() < 2 || cashflows.iter().any(|cf| !cf.is_finite()) {
        return None;
    }

    // At least one sign change is required for IRR to exist
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = settings.initial_guess;

    for _ in 0..settings.max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 || !dnpv.is_finite() {
            // Flat or blown-up derivative, Newton cannot make progress
            break;
        }

        let new_rate = (rate - npv / dnpv).clamp(MIN_RATE, MAX_RATE);

        if (new_rate - rate).abs() < settings.tolerance {
            // A step pinned at a bound is not a root
            if new_rate <= MIN_RATE || new_rate >= MAX_RATE {
                break;
            }
            if is_root(cashflows, new_rate) {
                return Some(new_rate);
            }
        }

        rate = new_rate;
    }

    log::debug!("IRR Newton-Raphson did not converge, trying bisection");
    calculate_irr_bisection(cashflows, settings)
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / (discount * (1.0 + rate));
        }
    }

    (npv, dnpv)
}

/// Fallback IRR calculation using bisection over [-99%, 1000%]
fn calculate_irr_bisection(cashflows: &[f64], settings: &IrrSettings) -> Option<f64> {
    let mut low = MIN_RATE;
    let mut high = MAX_RATE;

    let mut npv_low = npv_at_rate(cashflows, low);
    let npv_high = npv_at_rate(cashflows, high);

    // Check that we have a root in this interval
    if !npv_low.is_finite() || !npv_high.is_finite() || npv_low * npv_high > 0.0 {
        return None;
    }

    for _ in 0..settings.max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid == 0.0 || ((high - low) / 2.0 < settings.tolerance && is_root(cashflows, mid)) {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

/// Whether the NPV at `rate` is close enough to zero to call it the IRR
fn is_root(cashflows: &[f64], rate: f64) -> bool {
    let scale = cashflows[0].abs().max(1.0);
    npv_at_rate(cashflows, rate).abs() <= NPV_TOLERANCE * scale
}

/// Calculate NPV at a given annual rate
pub fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}
