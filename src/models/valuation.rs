use serde::{Deserialize, Serialize};

/// Default annual growth rate applied to free cash flow over the horizon.
pub const DEFAULT_GROWTH_RATE: f64 = 0.05;
/// Default discount rate.
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;
/// Default perpetual growth rate used for the terminal value.
pub const DEFAULT_TERMINAL_GROWTH_RATE: f64 = 0.04;

/// Financial inputs for a single company valuation.
///
/// Cash flow figures share one currency unit; shares outstanding must use a
/// unit consistent with them (e.g. both in millions) for the per-share value
/// to be meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationInput {
    pub company_name: String,
    pub operating_cash_flow: f64,
    pub capex: f64,
    pub shares_outstanding: f64,
    pub growth_rate: f64,
    /// Must exceed `terminal_growth_rate`.
    pub discount_rate: f64,
    pub terminal_growth_rate: f64,
}

impl ValuationInput {
    /// Create an input with the default rate assumptions.
    pub fn new(
        company_name: impl Into<String>,
        operating_cash_flow: f64,
        capex: f64,
        shares_outstanding: f64,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            operating_cash_flow,
            capex,
            shares_outstanding,
            growth_rate: DEFAULT_GROWTH_RATE,
            discount_rate: DEFAULT_DISCOUNT_RATE,
            terminal_growth_rate: DEFAULT_TERMINAL_GROWTH_RATE,
        }
    }

    pub fn with_rates(
        mut self,
        growth_rate: f64,
        discount_rate: f64,
        terminal_growth_rate: f64,
    ) -> Self {
        self.growth_rate = growth_rate;
        self.discount_rate = discount_rate;
        self.terminal_growth_rate = terminal_growth_rate;
        self
    }
}

/// The full chain of figures produced by one valuation.
///
/// Year-indexed sequences are ordered from year 1 to the end of the horizon.
/// Nothing here is rounded; rounding happens only when the value is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub base_fcf: f64,
    pub projected_fcfs: Vec<f64>,
    /// Free cash flow of the first year past the horizon.
    pub terminal_fcf: f64,
    pub terminal_value: f64,
    pub discounted_fcfs: Vec<f64>,
    /// Sum of `discounted_fcfs`.
    pub total_discounted_fcf: f64,
    pub discounted_terminal_value: f64,
    pub enterprise_value: f64,
    pub intrinsic_value_per_share: f64,
}
