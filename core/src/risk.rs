//! Risk scoring — pure functions from the four risk dimensions to an
//! aggregate score and a discrete category.
//!
//! Inputs are conventionally in [0, 10] but are NOT clamped: out-of-range
//! values propagate arithmetically and can still land in any category. That
//! permissiveness is part of the contract, not an oversight.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    High,
    Medium,
    Low,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskCategory::High => "High",
            RiskCategory::Medium => "Medium",
            RiskCategory::Low => "Low",
        };
        f.write_str(s)
    }
}

/// Arithmetic mean of the four risk dimensions.
pub fn overall_risk(supply: f64, demand: f64, quality: f64, financial: f64) -> f64 {
    (supply + demand + quality + financial) / 4.0
}

/// Thresholds evaluated top-down, first match wins.
/// Boundaries are inclusive on the lower side: 7.0 is High, 4.0 is Medium.
pub fn categorize(overall: f64) -> RiskCategory {
    if overall >= 7.0 {
        RiskCategory::High
    } else if overall >= 4.0 {
        RiskCategory::Medium
    } else {
        RiskCategory::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_is_exact() {
        assert_eq!(overall_risk(8.0, 6.0, 5.0, 9.0), 7.0);
        assert_eq!(overall_risk(1.0, 2.0, 3.0, 4.0), 2.5);
    }

    #[test]
    fn boundaries_inclusive_on_lower_side() {
        assert_eq!(categorize(7.0), RiskCategory::High);
        assert_eq!(categorize(6.999), RiskCategory::Medium);
        assert_eq!(categorize(4.0), RiskCategory::Medium);
        assert_eq!(categorize(3.999), RiskCategory::Low);
    }

    #[test]
    fn out_of_convention_inputs_are_not_clamped() {
        // Negative and >10 inputs flow straight through the mean.
        assert_eq!(categorize(overall_risk(-5.0, -5.0, -5.0, -5.0)), RiskCategory::Low);
        assert_eq!(categorize(overall_risk(20.0, 20.0, 20.0, 20.0)), RiskCategory::High);
        assert_eq!(overall_risk(-4.0, 4.0, -4.0, 4.0), 0.0);
    }
}
