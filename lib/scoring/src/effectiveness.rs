//! Partnership effectiveness scoring

use crate::tier::{Tier, EFFECTIVENESS_THRESHOLDS};
use orgpulse_core::{PartnershipRecord, ScoringContext};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Effectiveness assumed when neither rating is known.
pub const NEUTRAL_EFFECTIVENESS: f64 = 5.0;

/// Cost assumed for ROI when a partnership reports value but no cost.
pub const ASSUMED_PARTNERSHIP_COST: f64 = 5000.0;

/// Derived effectiveness columns for one partnership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessMetrics {
    /// Days from start to end, or to today while the partnership is running.
    pub partnership_duration: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<f64>,
    /// 1 to 10
    pub effectiveness_score: f64,
    pub effectiveness_category: Tier,
}

/// A partnership row together with its effectiveness columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPartnership {
    #[serde(flatten)]
    pub record: PartnershipRecord,
    #[serde(flatten)]
    pub metrics: EffectivenessMetrics,
}

/// Duration measured "as of today" for running partnerships.
pub fn partnership_duration(record: &PartnershipRecord, ctx: &ScoringContext) -> i64 {
    match record.end_date {
        Some(end) if end <= ctx.today => (end - record.start_date).num_days(),
        _ => ctx.days_since(record.start_date),
    }
}

/// Return on investment, falling back to a fixed cost assumption.
pub fn roi(record: &PartnershipRecord) -> Option<f64> {
    let value = record.value_contribution?;
    match record.cost {
        Some(cost) if cost != 0.0 => Some((value - cost) / cost),
        _ => Some(value / ASSUMED_PARTNERSHIP_COST),
    }
}

/// Mean of the available ratings, or the neutral midpoint.
pub fn effectiveness_score(record: &PartnershipRecord) -> f64 {
    match (record.performance_rating, record.alignment_score) {
        (Some(performance), Some(alignment)) => (performance + alignment) / 2.0,
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => NEUTRAL_EFFECTIVENESS,
    }
}

/// Score every partnership of a table.
pub fn score_partnerships(
    partnerships: &[PartnershipRecord],
    ctx: &ScoringContext,
) -> Vec<ScoredPartnership> {
    let scored: Vec<ScoredPartnership> = partnerships
        .iter()
        .map(|record| {
            let score = effectiveness_score(record);
            ScoredPartnership {
                record: record.clone(),
                metrics: EffectivenessMetrics {
                    partnership_duration: partnership_duration(record, ctx),
                    roi: roi(record),
                    effectiveness_score: score,
                    effectiveness_category: Tier::from_score(score, EFFECTIVENESS_THRESHOLDS),
                },
            }
        })
        .collect();

    debug!(rows = scored.len(), "partnership effectiveness scored");
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx() -> ScoringContext {
        ScoringContext::new(date(2024, 6, 1))
    }

    fn partner() -> PartnershipRecord {
        PartnershipRecord::new("P1", "Partner", "Funding", date(2024, 1, 1))
    }

    #[test]
    fn test_effectiveness_defaults() {
        let both = partner().with_ratings(Some(9.0), Some(6.0));
        assert_eq!(effectiveness_score(&both), 7.5);

        let performance_only = partner().with_ratings(Some(3.0), None);
        assert_eq!(effectiveness_score(&performance_only), 3.0);

        let alignment_only = partner().with_ratings(None, Some(8.0));
        assert_eq!(effectiveness_score(&alignment_only), 8.0);

        assert_eq!(effectiveness_score(&partner()), NEUTRAL_EFFECTIVENESS);
    }

    #[test]
    fn test_duration_of_finished_partnership() {
        let finished = partner().with_end_date(date(2024, 3, 1));
        assert_eq!(partnership_duration(&finished, &ctx()), 60);
    }

    #[test]
    fn test_duration_of_running_partnership() {
        let running = partner().with_end_date(date(2025, 1, 1));
        assert_eq!(partnership_duration(&running, &ctx()), 152);

        let open_ended = partner();
        assert_eq!(partnership_duration(&open_ended, &ctx()), 152);
    }

    #[test]
    fn test_roi_variants() {
        assert_eq!(roi(&partner()), None);
        assert_eq!(roi(&partner().with_value(15000.0, Some(5000.0))), Some(2.0));
        assert_eq!(roi(&partner().with_value(10000.0, None)), Some(2.0));
        assert_eq!(roi(&partner().with_value(10000.0, Some(0.0))), Some(2.0));
    }

    #[test]
    fn test_category_assignment() {
        let rows = vec![
            partner().with_ratings(Some(8.0), Some(8.0)),
            partner().with_ratings(Some(6.0), Some(7.0)),
            partner(),
            partner().with_ratings(Some(1.0), Some(2.0)),
        ];
        let scored = score_partnerships(&rows, &ctx());
        let categories: Vec<Tier> = scored.iter().map(|s| s.metrics.effectiveness_category).collect();
        assert_eq!(categories, vec![Tier::High, Tier::Medium, Tier::Low, Tier::VeryLow]);
    }

    #[test]
    fn test_empty_table() {
        assert!(score_partnerships(&[], &ctx()).is_empty());
    }

    #[test]
    fn test_rescoring_is_idempotent() {
        let rows = vec![
            partner().with_ratings(Some(9.0), Some(6.0)).with_value(12000.0, Some(4000.0)),
            partner().with_end_date(date(2024, 3, 1)).with_value(8000.0, None),
            partner().with_ratings(None, Some(4.0)),
        ];
        let first = score_partnerships(&rows, &ctx());
        let again: Vec<PartnershipRecord> = first.iter().map(|s| s.record.clone()).collect();
        let second = score_partnerships(&again, &ctx());
        assert_eq!(first, second);
    }
}
