//! Valuation insights derived from stored fundamentals.
//!
//! Each fundamental is judged on its own against fixed thresholds. A missing
//! fundamental contributes nothing. Entries always come out in the order
//! P/E, P/B, dividend yield, market cap.
//!
//! Only P/E has a "fair" middle band. P/B between 2 and 5, dividend yield
//! between 1 and 2, and market cap up to 500000 crore produce no entry.

use crate::models::{Fundamentals, Insight, Severity};

pub const PE_LOW: f64 = 15.0;
pub const PE_HIGH: f64 = 30.0;
pub const PB_LOW: f64 = 2.0;
pub const PB_HIGH: f64 = 5.0;
pub const DIVIDEND_HIGH: f64 = 2.0;
pub const DIVIDEND_LOW: f64 = 1.0;
/// Large cap threshold in INR crore
pub const LARGE_CAP_CRORE: f64 = 500_000.0;

pub const PE_UNDERVALUED: Insight =
    Insight::new("Undervalued (low P/E) — potential buy", Severity::Positive);
pub const PE_OVERVALUED: Insight =
    Insight::new("Overvalued (high P/E) — consider sell", Severity::Negative);
pub const PE_FAIR: Insight = Insight::new("Fairly valued P/E", Severity::Info);
pub const PB_ATTRACTIVE: Insight =
    Insight::new("Attractive valuation (low P/B)", Severity::Positive);
pub const PB_EXPENSIVE: Insight = Insight::new("Expensive (high P/B)", Severity::Negative);
pub const DIVIDEND_HIGH_YIELD: Insight =
    Insight::new("High dividend yield — income focus", Severity::Positive);
pub const DIVIDEND_LOW_YIELD: Insight = Insight::new("Low dividend yield", Severity::Caution);
pub const LARGE_CAP: Insight = Insight::new("Large cap — stable investment", Severity::Positive);

/// Derive the insight list for one company
pub fn generate_insights(fundamentals: &Fundamentals) -> Vec<Insight> {
    [
        fundamentals.pe_ratio.map(pe_insight),
        fundamentals.pb_ratio.and_then(pb_insight),
        fundamentals.dividend_yield.and_then(dividend_insight),
        fundamentals.market_cap_inr_crore.and_then(market_cap_insight),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn pe_insight(pe: f64) -> Insight {
    if pe < PE_LOW {
        PE_UNDERVALUED
    } else if pe > PE_HIGH {
        PE_OVERVALUED
    } else {
        PE_FAIR
    }
}

fn pb_insight(pb: f64) -> Option<Insight> {
    if pb < PB_LOW {
        Some(PB_ATTRACTIVE)
    } else if pb > PB_HIGH {
        Some(PB_EXPENSIVE)
    } else {
        None
    }
}

fn dividend_insight(dividend_yield: f64) -> Option<Insight> {
    if dividend_yield > DIVIDEND_HIGH {
        Some(DIVIDEND_HIGH_YIELD)
    } else if dividend_yield < DIVIDEND_LOW {
        Some(DIVIDEND_LOW_YIELD)
    } else {
        None
    }
}

fn market_cap_insight(market_cap_crore: f64) -> Option<Insight> {
    (market_cap_crore > LARGE_CAP_CRORE).then_some(LARGE_CAP)
}
