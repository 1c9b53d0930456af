//! Categorical buckets over continuous scores.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-level bucket shared by engagement, effectiveness and performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    High,
    Medium,
    Low,
    #[serde(rename = "Very Low")]
    VeryLow,
}

impl Tier {
    /// Display order, best first.
    pub const ALL: [Tier; 4] = [Tier::High, Tier::Medium, Tier::Low, Tier::VeryLow];

    /// Bucket `score` against descending cutoffs `[high, medium, low]`.
    ///
    /// Cutoffs are inclusive: a score equal to a cutoff lands in the upper bucket.
    pub fn from_score(score: f64, thresholds: Thresholds) -> Self {
        if score >= thresholds.high {
            Tier::High
        } else if score >= thresholds.medium {
            Tier::Medium
        } else if score >= thresholds.low {
            Tier::Low
        } else {
            Tier::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::High => "High",
            Tier::Medium => "Medium",
            Tier::Low => "Low",
            Tier::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive lower bounds for the High, Medium and Low buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Thresholds {
    pub const fn new(high: f64, medium: f64, low: f64) -> Self {
        Self { high, medium, low }
    }
}

/// Engagement is on a 0-100 scale.
pub const ENGAGEMENT_THRESHOLDS: Thresholds = Thresholds::new(75.0, 50.0, 25.0);

/// Effectiveness is on a 1-10 scale.
pub const EFFECTIVENESS_THRESHOLDS: Thresholds = Thresholds::new(8.0, 6.0, 4.0);

/// Performance is on a 0-100 scale.
pub const PERFORMANCE_THRESHOLDS: Thresholds = Thresholds::new(80.0, 60.0, 40.0);

/// Round half away from zero to `decimals` places.
#[inline]
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
