//! Discounted cash flow engine.
//!
//! Pure computation: the same [`ValuationInput`] always yields the same
//! [`ValuationResult`]. Inputs that would divide by zero or produce a
//! meaningless terminal value are rejected before any arithmetic runs.

use thiserror::Error;

use crate::models::{ValuationInput, ValuationResult};

/// Number of explicitly projected years. Drives both the projection loop and
/// the exponent used to discount the terminal value.
pub const HORIZON_YEARS: usize = 5;

/// Valuation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValuationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Valuation produced a non-finite intrinsic value")]
    NonFinite,
}

/// Check that an input can be valued without dividing by zero or
/// producing a negative terminal denominator.
pub fn validate(input: &ValuationInput) -> Result<(), ValuationError> {
    if input.company_name.trim().is_empty() {
        return Err(invalid("company name must not be empty"));
    }

    let fields = [
        ("operating cash flow", input.operating_cash_flow),
        ("capital expenditure", input.capex),
        ("shares outstanding", input.shares_outstanding),
        ("growth rate", input.growth_rate),
        ("discount rate", input.discount_rate),
        ("terminal growth rate", input.terminal_growth_rate),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(invalid(format!("{} must be a finite number, got {}", name, value)));
        }
    }

    if input.shares_outstanding <= 0.0 {
        return Err(invalid(format!(
            "shares outstanding must be positive, got {}",
            input.shares_outstanding
        )));
    }

    if input.discount_rate <= input.terminal_growth_rate {
        return Err(invalid(format!(
            "discount rate ({}) must exceed terminal growth rate ({})",
            input.discount_rate, input.terminal_growth_rate
        )));
    }

    for (name, rate) in [
        ("growth rate", input.growth_rate),
        ("discount rate", input.discount_rate),
        ("terminal growth rate", input.terminal_growth_rate),
    ] {
        if rate <= -1.0 {
            return Err(invalid(format!("{} must be greater than -1, got {}", name, rate)));
        }
    }

    Ok(())
}

/// Value a company over the fixed [`HORIZON_YEARS`] horizon.
pub fn compute(input: &ValuationInput) -> Result<ValuationResult, ValuationError> {
    validate(input)?;
    let result = compute_over(input, HORIZON_YEARS);

    if !result.intrinsic_value_per_share.is_finite() {
        return Err(ValuationError::NonFinite);
    }

    tracing::debug!(
        company = %input.company_name,
        enterprise_value = result.enterprise_value,
        intrinsic_value_per_share = result.intrinsic_value_per_share,
        "Computed valuation"
    );

    Ok(result)
}

fn compute_over(input: &ValuationInput, horizon: usize) -> ValuationResult {
    let growth = 1.0 + input.growth_rate;
    let discount = 1.0 + input.discount_rate;

    let base_fcf = input.operating_cash_flow - input.capex;

    let projected_fcfs: Vec<f64> = (1..=horizon)
        .map(|year| base_fcf * growth.powi(year as i32))
        .collect();

    let last_projected = projected_fcfs.last().copied().unwrap_or(base_fcf);
    let terminal_fcf = last_projected * (1.0 + input.terminal_growth_rate);
    let terminal_value = terminal_fcf / (input.discount_rate - input.terminal_growth_rate);

    let discounted_fcfs: Vec<f64> = projected_fcfs
        .iter()
        .zip(1..=horizon)
        .map(|(fcf, year)| fcf / discount.powi(year as i32))
        .collect();

    let discounted_terminal_value = terminal_value / discount.powi(horizon as i32);
    let total_discounted_fcf: f64 = discounted_fcfs.iter().sum();
    let enterprise_value = total_discounted_fcf + discounted_terminal_value;
    let intrinsic_value_per_share = enterprise_value / input.shares_outstanding;

    ValuationResult {
        base_fcf,
        projected_fcfs,
        terminal_fcf,
        terminal_value,
        discounted_fcfs,
        total_discounted_fcf,
        discounted_terminal_value,
        enterprise_value,
        intrinsic_value_per_share,
    }
}

fn invalid(msg: impl Into<String>) -> ValuationError {
    ValuationError::InvalidInput(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_drives_sequence_lengths() {
        let input = ValuationInput::new("Acme", 1000.0, 200.0, 100.0);
        let result = compute_over(&input, 3);
        assert_eq!(result.projected_fcfs.len(), 3);
        assert_eq!(result.discounted_fcfs.len(), 3);
        // Terminal value discounted with the same exponent as the last year.
        let expected = result.terminal_value / 1.1_f64.powi(3);
        assert!((result.discounted_terminal_value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_terminal_fcf_grows_from_last_projection() {
        let input = ValuationInput::new("Acme", 1000.0, 200.0, 100.0);
        let result = compute_over(&input, HORIZON_YEARS);
        assert!((result.terminal_fcf - result.projected_fcfs[4] * 1.04).abs() < 1e-9);
    }
}
