//! Member engagement scoring
//!
//! Combines attendance, satisfaction, interaction recency and membership
//! loyalty into a 0-100 engagement score. Recency and loyalty are normalised
//! against the table-wide maximum, so a score is only meaningful relative to
//! the table it was computed with.

use crate::tier::{round_to, Tier, ENGAGEMENT_THRESHOLDS};
use orgpulse_core::{MemberRecord, ScoringContext};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ATTENDANCE_WEIGHT: f64 = 0.3;
pub const SATISFACTION_WEIGHT: f64 = 0.3;
pub const RECENCY_WEIGHT: f64 = 0.2;
pub const LOYALTY_WEIGHT: f64 = 0.2;

/// Sub-score used when the source column is missing.
pub const NEUTRAL_SUB_SCORE: f64 = 0.5;

/// Assumed gap for members with no recorded interaction.
pub const DEFAULT_DAYS_SINCE_INTERACTION: i64 = 30;

/// Derived engagement columns for one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub membership_duration_days: i64,
    pub days_since_interaction: i64,
    /// 0 to 100, one decimal
    pub engagement_score: f64,
    pub engagement_level: Tier,
}

/// A member row together with its engagement columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMember {
    #[serde(flatten)]
    pub record: MemberRecord,
    #[serde(flatten)]
    pub metrics: EngagementMetrics,
}

/// The four normalised inputs of an engagement score, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementFactors {
    pub attendance: f64,
    pub satisfaction: f64,
    pub recency: f64,
    pub loyalty: f64,
}

impl EngagementFactors {
    /// Weighted combination on the 0-100 scale, rounded to one decimal.
    pub fn score(&self) -> f64 {
        let raw = ATTENDANCE_WEIGHT * self.attendance
            + SATISFACTION_WEIGHT * self.satisfaction
            + RECENCY_WEIGHT * self.recency
            + LOYALTY_WEIGHT * self.loyalty;
        round_to(raw * 100.0, 1)
    }
}

/// `value / max` clamped to [0, 1], or `None` when the table maximum is not positive.
fn ratio_to_max(value: i64, max: i64) -> Option<f64> {
    (max > 0).then(|| (value as f64 / max as f64).clamp(0.0, 1.0))
}

/// More recent interactions score higher. A zero table maximum scores 1.0.
#[inline]
fn recency_sub_score(days_since: i64, max_days: i64) -> f64 {
    ratio_to_max(days_since, max_days).map_or(1.0, |ratio| 1.0 - ratio)
}

/// Longer memberships score higher. A zero table maximum scores 1.0.
#[inline]
fn loyalty_sub_score(duration: i64, max_duration: i64) -> f64 {
    ratio_to_max(duration, max_duration).unwrap_or(1.0)
}

/// Score every member of a table.
///
/// Returns an empty table for empty input. The input is never modified.
pub fn score_members(members: &[MemberRecord], ctx: &ScoringContext) -> Vec<ScoredMember> {
    if members.is_empty() {
        return Vec::new();
    }

    let days: Vec<i64> = members
        .iter()
        .map(|m| m.days_since_interaction(ctx).unwrap_or(DEFAULT_DAYS_SINCE_INTERACTION))
        .collect();
    let durations: Vec<i64> = members
        .iter()
        .map(|m| m.membership_duration_days(ctx))
        .collect();

    let max_days = days.iter().copied().max().unwrap_or(0);
    let max_duration = durations.iter().copied().max().unwrap_or(0);
    if max_days <= 0 || max_duration <= 0 {
        debug!(max_days, max_duration, "zero normalisation denominator, using full sub-score");
    }

    let scored: Vec<ScoredMember> = members
        .iter()
        .zip(days.iter().zip(durations.iter()))
        .map(|(member, (&days_since, &duration))| {
            let factors = EngagementFactors {
                attendance: member
                    .attendance_rate
                    .map_or(NEUTRAL_SUB_SCORE, |rate| rate.clamp(0.0, 1.0)),
                satisfaction: member
                    .satisfaction_score
                    .map_or(NEUTRAL_SUB_SCORE, |s| (s / 10.0).clamp(0.0, 1.0)),
                recency: recency_sub_score(days_since, max_days),
                loyalty: loyalty_sub_score(duration, max_duration),
            };
            let engagement_score = factors.score();
            ScoredMember {
                record: member.clone(),
                metrics: EngagementMetrics {
                    membership_duration_days: duration,
                    days_since_interaction: days_since,
                    engagement_score,
                    engagement_level: Tier::from_score(engagement_score, ENGAGEMENT_THRESHOLDS),
                },
            }
        })
        .collect();

    debug!(rows = scored.len(), "member engagement scored");
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn ctx() -> ScoringContext {
        ScoringContext::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn days_ago(days: i64) -> NaiveDate {
        ctx().today - Duration::days(days)
    }

    fn member(id: &str, joined_days_ago: i64) -> MemberRecord {
        MemberRecord::new(id, format!("Member {id}"), days_ago(joined_days_ago), "Basic")
    }

    #[test]
    fn test_empty_table() {
        assert!(score_members(&[], &ctx()).is_empty());
    }

    #[test]
    fn test_best_and_worst_member() {
        let members = vec![
            member("M1", 100)
                .with_attendance(1.0)
                .with_satisfaction(10.0)
                .with_last_interaction(days_ago(0)),
            member("M2", 0)
                .with_attendance(0.0)
                .with_satisfaction(0.0)
                .with_last_interaction(days_ago(30)),
        ];

        let scored = score_members(&members, &ctx());
        assert_eq!(scored[0].metrics.engagement_score, 100.0);
        assert_eq!(scored[0].metrics.engagement_level, Tier::High);
        assert_eq!(scored[1].metrics.engagement_score, 0.0);
        assert_eq!(scored[1].metrics.engagement_level, Tier::VeryLow);
        assert!(scored[0].metrics.engagement_score > scored[1].metrics.engagement_score);
    }

    #[test]
    fn test_missing_columns_use_neutral_defaults() {
        // single member: recency and loyalty both normalise to themselves
        let members = vec![member("M1", 10)];
        let scored = score_members(&members, &ctx());

        let metrics = &scored[0].metrics;
        assert_eq!(metrics.days_since_interaction, DEFAULT_DAYS_SINCE_INTERACTION);
        // 0.3*0.5 + 0.3*0.5 + 0.2*(1 - 30/30) + 0.2*(10/10) = 0.5
        assert_eq!(metrics.engagement_score, 50.0);
        assert_eq!(metrics.engagement_level, Tier::Medium);
    }

    #[test]
    fn test_zero_denominators_guarded() {
        // everyone interacted today and joined today
        let members = vec![
            member("M1", 0).with_last_interaction(days_ago(0)),
            member("M2", 0).with_last_interaction(days_ago(0)),
        ];
        let scored = score_members(&members, &ctx());
        for row in &scored {
            assert!(row.metrics.engagement_score.is_finite());
            // 0.15 + 0.15 + 0.2 + 0.2
            assert_eq!(row.metrics.engagement_score, 70.0);
        }
    }

    #[test]
    fn test_score_bounded_for_out_of_range_inputs() {
        let members = vec![
            member("M1", 50)
                .with_attendance(1.7)
                .with_satisfaction(14.0)
                .with_last_interaction(days_ago(-20)),
            member("M2", 400).with_attendance(-0.5).with_satisfaction(-3.0),
        ];
        for row in score_members(&members, &ctx()) {
            assert!((0.0..=100.0).contains(&row.metrics.engagement_score));
        }
    }

    #[test]
    fn test_rescoring_is_idempotent() {
        let members = vec![
            member("M1", 300).with_attendance(0.4).with_satisfaction(7.0),
            member("M2", 30).with_attendance(0.9).with_last_interaction(days_ago(3)),
        ];
        let first = score_members(&members, &ctx());
        let raw: Vec<MemberRecord> = first.iter().map(|s| s.record.clone()).collect();
        let second = score_members(&raw, &ctx());
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_is_column_superset() {
        let scored = score_members(&[member("M1", 10).with_industry("Technology")], &ctx());
        let json = serde_json::to_value(&scored[0]).unwrap();
        assert_eq!(json["member_id"], "M1");
        assert_eq!(json["industry"], "Technology");
        assert!(json.get("engagement_score").is_some());
        assert_eq!(json["engagement_level"], "Medium");
    }
}
