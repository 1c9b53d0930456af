//! Program performance scoring
//!
//! A weighted average over whichever of four sub-metrics a program reports.
//! Weights of the present metrics are renormalised to sum to one, so a
//! program is not penalised for columns the upload did not carry.

use crate::tier::{round_to, Tier, PERFORMANCE_THRESHOLDS};
use orgpulse_core::{ProgramRecord, ScoringContext};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ENROLLMENT_WEIGHT: f64 = 0.3;
pub const SATISFACTION_WEIGHT: f64 = 0.4;
pub const SUCCESS_WEIGHT: f64 = 0.3;
pub const BUDGET_WEIGHT: f64 = 0.2;

/// Score given to a program with no usable sub-metric.
pub const NEUTRAL_PERFORMANCE: f64 = 50.0;

/// Derived performance columns for one program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_utilization: Option<f64>,
    /// 0 to 100
    pub performance_score: f64,
    pub performance_category: Tier,
}

/// A program row together with its performance columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProgram {
    #[serde(flatten)]
    pub record: ProgramRecord,
    #[serde(flatten)]
    pub metrics: PerformanceMetrics,
}

/// Enrollment over capacity, two decimals.
pub fn enrollment_rate(record: &ProgramRecord) -> Option<f64> {
    match (record.current_enrollment, record.capacity) {
        (Some(current), Some(capacity)) if capacity > 0 => {
            Some(round_to(f64::from(current) / f64::from(capacity), 2))
        }
        _ => None,
    }
}

/// Expenses over budget, two decimals.
pub fn budget_utilization(record: &ProgramRecord) -> Option<f64> {
    match (record.expenses, record.budget) {
        (Some(expenses), Some(budget)) if budget != 0.0 => Some(round_to(expenses / budget, 2)),
        _ => None,
    }
}

/// Reward for spending exactly the budget.
///
/// Under- and over-spend are penalised symmetrically; the result is clamped
/// to [0, 1] so extreme utilisation cannot drag the score below zero.
pub fn budget_closeness(utilization: f64) -> f64 {
    (1.0 - (utilization - 1.0).abs()).clamp(0.0, 1.0)
}

/// Weighted average of the present sub-metrics on the 0-100 scale.
///
/// Each sub-metric is clamped to [0, 1] first.
pub fn performance_score(
    enrollment_rate: Option<f64>,
    satisfaction_score: Option<f64>,
    success_metric: Option<f64>,
    budget_utilization: Option<f64>,
) -> f64 {
    let components = [
        enrollment_rate.map(|rate| (rate.clamp(0.0, 1.0), ENROLLMENT_WEIGHT)),
        satisfaction_score.map(|s| ((s / 10.0).clamp(0.0, 1.0), SATISFACTION_WEIGHT)),
        success_metric.map(|m| (m.clamp(0.0, 1.0), SUCCESS_WEIGHT)),
        budget_utilization.map(|u| (budget_closeness(u), BUDGET_WEIGHT)),
    ];

    let (weighted, total_weight) = components
        .iter()
        .flatten()
        .fold((0.0, 0.0), |(sum, weights), (value, weight)| {
            (sum + value * weight, weights + weight)
        });

    if total_weight > 0.0 {
        weighted / total_weight * 100.0
    } else {
        NEUTRAL_PERFORMANCE
    }
}

/// Score every program of a table.
pub fn score_programs(programs: &[ProgramRecord], _ctx: &ScoringContext) -> Vec<ScoredProgram> {
    let scored: Vec<ScoredProgram> = programs
        .iter()
        .map(|record| {
            let enrollment = enrollment_rate(record);
            let utilization = budget_utilization(record);
            let score = performance_score(
                enrollment,
                record.satisfaction_score,
                record.success_metric,
                utilization,
            );
            ScoredProgram {
                record: record.clone(),
                metrics: PerformanceMetrics {
                    enrollment_rate: enrollment,
                    budget_utilization: utilization,
                    performance_score: score,
                    performance_category: Tier::from_score(score, PERFORMANCE_THRESHOLDS),
                },
            }
        })
        .collect();

    debug!(rows = scored.len(), "program performance scored");
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use orgpulse_core::ProgramStatus;

    fn ctx() -> ScoringContext {
        ScoringContext::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn program() -> ProgramRecord {
        ProgramRecord::new(
            "PRG001",
            "Program 1",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ProgramStatus::Active,
        )
    }

    #[test]
    fn test_budget_closeness() {
        assert_eq!(budget_closeness(1.0), 1.0);
        assert_eq!(budget_closeness(2.0), 0.0);
        assert_eq!(budget_closeness(0.5), 0.5);
        assert_eq!(budget_closeness(3.5), 0.0);
        assert_eq!(budget_closeness(1.25), 0.75);
    }

    #[test]
    fn test_exact_budget_is_perfect() {
        let p = program().with_budget(1000.0, 1000.0);
        assert_eq!(budget_utilization(&p), Some(1.0));
        let scored = score_programs(&[p], &ctx());
        assert_eq!(scored[0].metrics.performance_score, 100.0);
        assert_eq!(scored[0].metrics.performance_category, Tier::High);
    }

    #[test]
    fn test_double_spend_scores_zero() {
        let p = program().with_budget(1000.0, 2000.0);
        let scored = score_programs(&[p], &ctx());
        assert_eq!(scored[0].metrics.budget_utilization, Some(2.0));
        assert_eq!(scored[0].metrics.performance_score, 0.0);
        assert_eq!(scored[0].metrics.performance_category, Tier::VeryLow);
    }

    #[test]
    fn test_no_metrics_is_neutral() {
        let scored = score_programs(&[program()], &ctx());
        assert_eq!(scored[0].metrics.performance_score, NEUTRAL_PERFORMANCE);
        assert_eq!(scored[0].metrics.performance_category, Tier::Low);
        assert!(scored[0].metrics.enrollment_rate.is_none());
    }

    #[test]
    fn test_weights_renormalised() {
        // enrollment 0.5 (w 0.3) and satisfaction 1.0 (w 0.4): (0.15 + 0.4) / 0.7
        let p = program().with_enrollment(40, 20).with_satisfaction(10.0);
        let score = score_programs(&[p], &ctx())[0].metrics.performance_score;
        assert!((score - 55.0 / 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_inputs_stay_bounded() {
        let high = program().with_satisfaction(14.0).with_success_metric(1.8);
        let low = program().with_success_metric(-0.5);
        let over = program().with_enrollment(10, 25);

        let scored = score_programs(&[high, low, over], &ctx());
        let scores: Vec<f64> = scored.iter().map(|p| p.metrics.performance_score).collect();
        assert_eq!(scores, vec![100.0, 0.0, 100.0]);
        for score in scores {
            assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn test_enrollment_rate_rounding() {
        let p = program().with_enrollment(3, 2);
        assert_eq!(enrollment_rate(&p), Some(0.67));
        let zero_capacity = program().with_enrollment(0, 0);
        assert_eq!(enrollment_rate(&zero_capacity), None);
    }

    #[test]
    fn test_rescoring_is_idempotent() {
        let rows = vec![
            program().with_enrollment(50, 45).with_success_metric(0.8),
            program().with_budget(20000.0, 26000.0).with_satisfaction(7.0),
        ];
        let first = score_programs(&rows, &ctx());
        let raw: Vec<ProgramRecord> = first.iter().map(|s| s.record.clone()).collect();
        assert_eq!(first, score_programs(&raw, &ctx()));
    }
}
