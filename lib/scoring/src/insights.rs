//! Overview aggregations
//!
//! Table-level summaries over scored rows: headline counts, averages, tier
//! distributions and a blended organization health figure. Every average is
//! `None` when no row carries the underlying column.

use crate::effectiveness::ScoredPartnership;
use crate::engagement::ScoredMember;
use crate::performance::ScoredProgram;
use crate::tier::{round_to, Tier};
use orgpulse_core::{MemberRecord, PartnershipStatus, ProgramStatus, ScoringContext};
use serde::Serialize;
use std::collections::BTreeMap;

/// Renewals due within this many days count as expiring soon.
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

/// Engagement below this marks a member for follow-up.
pub const ATTENTION_ENGAGEMENT_CUTOFF: f64 = 50.0;

/// Membership types whose disengagement is worth chasing.
pub const HIGH_VALUE_MEMBERSHIP_TYPES: [&str; 2] = ["Premium", "Enterprise"];

/// Effectiveness below this flags a high-value partnership for review.
pub const REVIEW_EFFECTIVENESS_CUTOFF: f64 = 6.0;

fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    })
}

fn count_by<'a, I: IntoIterator<Item = &'a str>>(values: I) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Number of rows in one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub tier: Tier,
    pub count: usize,
}

/// Counts per tier, in display order, zero-filled.
pub fn tier_distribution<I: IntoIterator<Item = Tier>>(tiers: I) -> Vec<TierCount> {
    let mut counts = [0usize; 4];
    for tier in tiers {
        counts[tier as usize] += 1;
    }
    Tier::ALL
        .iter()
        .zip(counts)
        .map(|(&tier, count)| TierCount { tier, count })
        .collect()
}

/// Membership headline figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberOverview {
    pub total_members: usize,
    pub expiring_soon: usize,
    pub average_satisfaction: Option<f64>,
    pub average_engagement: Option<f64>,
    pub engagement_distribution: Vec<TierCount>,
    /// Percent of members with a renewal date that have not lapsed.
    pub retention_rate: Option<f64>,
    /// Percent of each membership type that has not lapsed. Members without a
    /// renewal date count against their type. Empty when no renewal dates exist.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub retention_by_type: BTreeMap<String, f64>,
    pub membership_types: BTreeMap<String, usize>,
}

impl MemberOverview {
    pub fn compute(members: &[ScoredMember], ctx: &ScoringContext) -> Self {
        let renewals: Vec<_> = members.iter().filter_map(|m| m.record.renewal_date).collect();
        let retained = renewals.iter().filter(|&&renewal| renewal >= ctx.today).count();
        let membership_types = count_by(members.iter().map(|m| m.record.membership_type.as_str()));

        let retention_by_type = if renewals.is_empty() {
            BTreeMap::new()
        } else {
            let active = count_by(
                members
                    .iter()
                    .filter(|m| m.record.renewal_date.is_some_and(|r| r >= ctx.today))
                    .map(|m| m.record.membership_type.as_str()),
            );
            membership_types
                .iter()
                .map(|(kind, &total)| {
                    let kept = active.get(kind).copied().unwrap_or(0);
                    (kind.clone(), round_to(kept as f64 / total as f64 * 100.0, 1))
                })
                .collect()
        };

        Self {
            total_members: members.len(),
            expiring_soon: members
                .iter()
                .filter(|m| m.record.renews_within(ctx, EXPIRING_WINDOW_DAYS))
                .count(),
            average_satisfaction: mean(members.iter().filter_map(|m| m.record.satisfaction_score))
                .map(|v| round_to(v, 1)),
            average_engagement: mean(members.iter().map(|m| m.metrics.engagement_score))
                .map(|v| round_to(v, 1)),
            engagement_distribution: tier_distribution(
                members.iter().map(|m| m.metrics.engagement_level),
            ),
            retention_rate: (!renewals.is_empty())
                .then(|| round_to(retained as f64 / renewals.len() as f64 * 100.0, 1)),
            retention_by_type,
            membership_types,
        }
    }
}

/// High-value members with weak engagement, least engaged first.
pub fn members_needing_attention(members: &[ScoredMember]) -> Vec<&ScoredMember> {
    let mut flagged: Vec<&ScoredMember> = members
        .iter()
        .filter(|m| {
            m.metrics.engagement_score < ATTENTION_ENGAGEMENT_CUTOFF
                && HIGH_VALUE_MEMBERSHIP_TYPES.contains(&m.record.membership_type.as_str())
        })
        .collect();
    flagged.sort_by(|a, b| a.metrics.engagement_score.total_cmp(&b.metrics.engagement_score));
    flagged
}

/// Membership tenure bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TenureCohort {
    #[serde(rename = "0-3 months")]
    UpToThreeMonths,
    #[serde(rename = "3-6 months")]
    UpToSixMonths,
    #[serde(rename = "6-12 months")]
    UpToOneYear,
    #[serde(rename = "1-2 years")]
    UpToTwoYears,
    #[serde(rename = "2-3 years")]
    UpToThreeYears,
    #[serde(rename = "3+ years")]
    OverThreeYears,
}

impl TenureCohort {
    pub const ALL: [TenureCohort; 6] = [
        TenureCohort::UpToThreeMonths,
        TenureCohort::UpToSixMonths,
        TenureCohort::UpToOneYear,
        TenureCohort::UpToTwoYears,
        TenureCohort::UpToThreeYears,
        TenureCohort::OverThreeYears,
    ];

    /// Bracket for a tenure in whole 30-day months; upper bounds are inclusive.
    pub fn from_months(months: i64) -> Self {
        match months {
            i64::MIN..=3 => TenureCohort::UpToThreeMonths,
            4..=6 => TenureCohort::UpToSixMonths,
            7..=12 => TenureCohort::UpToOneYear,
            13..=24 => TenureCohort::UpToTwoYears,
            25..=36 => TenureCohort::UpToThreeYears,
            _ => TenureCohort::OverThreeYears,
        }
    }
}

/// Members per tenure bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CohortCount {
    pub cohort: TenureCohort,
    pub count: usize,
}

pub fn tenure_cohorts(members: &[MemberRecord], ctx: &ScoringContext) -> Vec<CohortCount> {
    let mut counts = [0usize; 6];
    for member in members {
        let months = member.membership_duration_days(ctx) / 30;
        counts[TenureCohort::from_months(months) as usize] += 1;
    }
    TenureCohort::ALL
        .iter()
        .zip(counts)
        .map(|(&cohort, count)| CohortCount { cohort, count })
        .collect()
}

/// Partnership headline figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnershipOverview {
    pub total_partnerships: usize,
    pub active_partnerships: usize,
    pub average_performance: Option<f64>,
    pub total_value: f64,
    pub average_effectiveness: Option<f64>,
    pub effectiveness_distribution: Vec<TierCount>,
    pub partnership_types: BTreeMap<String, usize>,
}

impl PartnershipOverview {
    pub fn compute(partnerships: &[ScoredPartnership]) -> Self {
        Self {
            total_partnerships: partnerships.len(),
            active_partnerships: partnerships
                .iter()
                .filter(|p| p.record.status == Some(PartnershipStatus::Active))
                .count(),
            average_performance: mean(partnerships.iter().filter_map(|p| p.record.performance_rating))
                .map(|v| round_to(v, 1)),
            total_value: partnerships
                .iter()
                .filter_map(|p| p.record.value_contribution)
                .sum(),
            average_effectiveness: mean(partnerships.iter().map(|p| p.metrics.effectiveness_score))
                .map(|v| round_to(v, 1)),
            effectiveness_distribution: tier_distribution(
                partnerships.iter().map(|p| p.metrics.effectiveness_category),
            ),
            partnership_types: count_by(partnerships.iter().map(|p| p.record.partnership_type.as_str())),
        }
    }
}

/// Partnerships with above-median value contribution but effectiveness below
/// [`REVIEW_EFFECTIVENESS_CUTOFF`], in table order.
///
/// Rows without a value contribution never qualify.
pub fn partnerships_needing_review(partnerships: &[ScoredPartnership]) -> Vec<&ScoredPartnership> {
    let Some(median_value) = median(
        partnerships
            .iter()
            .filter_map(|p| p.record.value_contribution)
            .collect(),
    ) else {
        return Vec::new();
    };

    partnerships
        .iter()
        .filter(|p| {
            p.metrics.effectiveness_score < REVIEW_EFFECTIVENESS_CUTOFF
                && p.record.value_contribution.is_some_and(|v| v > median_value)
        })
        .collect()
}

/// Program headline figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramOverview {
    pub total_programs: usize,
    pub active_programs: usize,
    pub average_satisfaction: Option<f64>,
    /// Mean enrollment rate as a percentage.
    pub average_enrollment: Option<f64>,
    pub average_performance: Option<f64>,
    pub performance_distribution: Vec<TierCount>,
}

impl ProgramOverview {
    pub fn compute(programs: &[ScoredProgram]) -> Self {
        Self {
            total_programs: programs.len(),
            active_programs: programs
                .iter()
                .filter(|p| p.record.status == ProgramStatus::Active)
                .count(),
            average_satisfaction: mean(programs.iter().filter_map(|p| p.record.satisfaction_score))
                .map(|v| round_to(v, 1)),
            average_enrollment: mean(programs.iter().filter_map(|p| p.metrics.enrollment_rate))
                .map(|v| round_to(v * 100.0, 1)),
            average_performance: mean(programs.iter().map(|p| p.metrics.performance_score))
                .map(|v| round_to(v, 1)),
            performance_distribution: tier_distribution(
                programs.iter().map(|p| p.metrics.performance_category),
            ),
        }
    }
}

/// Blend of average engagement, effectiveness (rescaled to 0-100) and
/// performance over whichever tables are present and non-empty.
pub fn organization_health(
    members: Option<&[ScoredMember]>,
    partnerships: Option<&[ScoredPartnership]>,
    programs: Option<&[ScoredProgram]>,
) -> Option<f64> {
    let components = [
        members.and_then(|rows| mean(rows.iter().map(|m| m.metrics.engagement_score))),
        partnerships
            .and_then(|rows| mean(rows.iter().map(|p| p.metrics.effectiveness_score)))
            .map(|avg| avg * 10.0),
        programs.and_then(|rows| mean(rows.iter().map(|p| p.metrics.performance_score))),
    ];
    mean(components.into_iter().flatten()).map(|v| round_to(v, 1))
}

/// Everything the overview page shows, in one serialisable report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<MemberOverview>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members_needing_attention: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tenure_cohorts: Vec<CohortCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partnerships: Option<PartnershipOverview>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub partnerships_needing_review: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programs: Option<ProgramOverview>,
    pub organization_health: Option<f64>,
}

impl InsightsReport {
    pub fn build(
        members: Option<&[ScoredMember]>,
        partnerships: Option<&[ScoredPartnership]>,
        programs: Option<&[ScoredProgram]>,
        ctx: &ScoringContext,
    ) -> Self {
        let raw_members: Vec<MemberRecord> = members
            .unwrap_or_default()
            .iter()
            .map(|m| m.record.clone())
            .collect();

        Self {
            members: members.map(|rows| MemberOverview::compute(rows, ctx)),
            members_needing_attention: members
                .map(|rows| {
                    members_needing_attention(rows)
                        .into_iter()
                        .map(|m| m.record.member_id.clone())
                        .collect()
                })
                .unwrap_or_default(),
            tenure_cohorts: if raw_members.is_empty() {
                Vec::new()
            } else {
                tenure_cohorts(&raw_members, ctx)
            },
            partnerships: partnerships.map(PartnershipOverview::compute),
            partnerships_needing_review: partnerships
                .map(|rows| {
                    partnerships_needing_review(rows)
                        .into_iter()
                        .map(|p| p.record.partner_id.clone())
                        .collect()
                })
                .unwrap_or_default(),
            programs: programs.map(ProgramOverview::compute),
            organization_health: organization_health(members, partnerships, programs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effectiveness::score_partnerships;
    use crate::engagement::score_members;
    use crate::performance::score_programs;
    use chrono::{Duration, NaiveDate};
    use orgpulse_core::{PartnershipRecord, ProgramRecord};

    fn ctx() -> ScoringContext {
        ScoringContext::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn days_from_today(days: i64) -> NaiveDate {
        ctx().today + Duration::days(days)
    }

    fn members() -> Vec<MemberRecord> {
        vec![
            MemberRecord::new("M1", "One", days_from_today(-400), "Premium")
                .with_satisfaction(9.0)
                .with_attendance(0.9)
                .with_last_interaction(days_from_today(-1))
                .with_renewal_date(days_from_today(10)),
            MemberRecord::new("M2", "Two", days_from_today(-40), "Enterprise")
                .with_satisfaction(2.0)
                .with_attendance(0.1)
                .with_last_interaction(days_from_today(-80))
                .with_renewal_date(days_from_today(-5)),
            MemberRecord::new("M3", "Three", days_from_today(-1200), "Basic")
                .with_renewal_date(days_from_today(90)),
        ]
    }

    #[test]
    fn test_member_overview() {
        let scored = score_members(&members(), &ctx());
        let overview = MemberOverview::compute(&scored, &ctx());

        assert_eq!(overview.total_members, 3);
        assert_eq!(overview.expiring_soon, 1);
        assert_eq!(overview.average_satisfaction, Some(5.5));
        assert_eq!(overview.retention_rate, Some(66.7));
        assert_eq!(overview.membership_types.get("Premium"), Some(&1));
        let total: usize = overview.engagement_distribution.iter().map(|t| t.count).sum();
        assert_eq!(total, 3);
        assert_eq!(overview.engagement_distribution[0].tier, Tier::High);
    }

    #[test]
    fn test_retention_by_type_counts_every_member() {
        let mut rows = members();
        rows.push(MemberRecord::new("M4", "Four", days_from_today(-30), "Premium"));
        let overview = MemberOverview::compute(&score_members(&rows, &ctx()), &ctx());

        assert_eq!(overview.retention_by_type.get("Premium"), Some(&50.0));
        assert_eq!(overview.retention_by_type.get("Enterprise"), Some(&0.0));
        assert_eq!(overview.retention_by_type.get("Basic"), Some(&100.0));
        assert_eq!(overview.retention_rate, Some(66.7));
    }

    #[test]
    fn test_retention_by_type_needs_renewal_dates() {
        let rows = vec![MemberRecord::new("M1", "One", days_from_today(-30), "Basic")];
        let overview = MemberOverview::compute(&score_members(&rows, &ctx()), &ctx());
        assert!(overview.retention_by_type.is_empty());
        assert_eq!(overview.retention_rate, None);
    }

    #[test]
    fn test_partnerships_needing_review() {
        let start = days_from_today(-100);
        let rows = score_partnerships(
            &[
                PartnershipRecord::new("P1", "Big weak", "Funding", start)
                    .with_ratings(Some(4.0), Some(5.0))
                    .with_value(50000.0, None),
                PartnershipRecord::new("P2", "Big strong", "Funding", start)
                    .with_ratings(Some(9.0), Some(8.0))
                    .with_value(40000.0, None),
                PartnershipRecord::new("P3", "Small weak", "Program", start)
                    .with_ratings(Some(3.0), None)
                    .with_value(1000.0, None),
                PartnershipRecord::new("P4", "Median weak", "Program", start)
                    .with_ratings(Some(5.0), None)
                    .with_value(20000.0, None),
                PartnershipRecord::new("P5", "No value", "Advocacy", start)
                    .with_ratings(Some(2.0), None),
            ],
            &ctx(),
        );

        // median of 50000, 40000, 1000, 20000 is 30000
        let flagged: Vec<&str> = partnerships_needing_review(&rows)
            .iter()
            .map(|p| p.record.partner_id.as_str())
            .collect();
        assert_eq!(flagged, vec!["P1"]);

        let report = InsightsReport::build(None, Some(rows.as_slice()), None, &ctx());
        assert_eq!(report.partnerships_needing_review, vec!["P1".to_string()]);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(vec![]), None);
        assert_eq!(median(vec![3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_members_needing_attention() {
        let scored = score_members(&members(), &ctx());
        let flagged = members_needing_attention(&scored);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].record.member_id, "M2");
    }

    #[test]
    fn test_tenure_cohorts() {
        let cohorts = tenure_cohorts(&members(), &ctx());
        let count = |c: TenureCohort| cohorts.iter().find(|x| x.cohort == c).unwrap().count;
        assert_eq!(count(TenureCohort::UpToThreeMonths), 1);
        assert_eq!(count(TenureCohort::UpToTwoYears), 1);
        assert_eq!(count(TenureCohort::OverThreeYears), 1);
    }

    #[test]
    fn test_cohort_boundaries() {
        assert_eq!(TenureCohort::from_months(0), TenureCohort::UpToThreeMonths);
        assert_eq!(TenureCohort::from_months(3), TenureCohort::UpToThreeMonths);
        assert_eq!(TenureCohort::from_months(4), TenureCohort::UpToSixMonths);
        assert_eq!(TenureCohort::from_months(12), TenureCohort::UpToOneYear);
        assert_eq!(TenureCohort::from_months(37), TenureCohort::OverThreeYears);
    }

    #[test]
    fn test_organization_health() {
        let partnerships = score_partnerships(
            &[PartnershipRecord::new("P1", "P", "Funding", days_from_today(-10))
                .with_ratings(Some(8.0), Some(6.0))],
            &ctx(),
        );
        let programs = score_programs(
            &[ProgramRecord::new("PRG1", "G", days_from_today(-10), ProgramStatus::Active)],
            &ctx(),
        );
        // effectiveness 7.0 -> 70, performance neutral 50
        assert_eq!(
            organization_health(None, Some(partnerships.as_slice()), Some(programs.as_slice())),
            Some(60.0)
        );
        assert_eq!(organization_health(None, None, None), None);
        assert_eq!(organization_health(Some(&[][..]), None, None), None);
    }

    #[test]
    fn test_report_skips_missing_tables() {
        let report = InsightsReport::build(None, None, None, &ctx());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("members").is_none());
        assert!(json["organization_health"].is_null());
    }
}
