//! Domain models for DCF valuation.
//!
//! # Core Concepts
//!
//! - [`ValuationInput`]: The financial figures for one company plus the rate assumptions.
//! - [`ValuationResult`]: Every intermediate figure of a single valuation, from base
//!   free cash flow down to the intrinsic value per share.
//! - [`ResultRecord`]: One row of the persisted result ledger (company name → value).

mod record;
mod valuation;

pub use record::*;
pub use valuation::*;
