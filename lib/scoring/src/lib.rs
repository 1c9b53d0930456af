//! # OrgPulse Scoring
//!
//! Derived metrics for member, partnership and program tables.
//!
//! Each scorer is a pure function from a table to a new table that pairs every
//! raw row with its derived columns. Missing optional columns never fail a
//! scorer; they fall back to neutral values instead:
//!
//! | scorer                  | scale  | neutral default                      | tiers (High/Medium/Low) |
//! |-------------------------|--------|--------------------------------------|-------------------------|
//! | [`score_members`]       | 0-100  | 0.5 per missing sub-score, 30 days   | 75 / 50 / 25            |
//! | [`score_partnerships`]  | 1-10   | 5 when no rating is present          | 8 / 6 / 4               |
//! | [`score_programs`]      | 0-100  | 50 when no sub-metric is present     | 80 / 60 / 40            |
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use orgpulse_core::{MemberRecord, ScoringContext};
//! use orgpulse_scoring::{score_members, Tier};
//!
//! let ctx = ScoringContext::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
//! let members = vec![
//!     MemberRecord::new("M1", "Active Co", NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(), "Premium")
//!         .with_attendance(1.0)
//!         .with_satisfaction(10.0)
//!         .with_last_interaction(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
//! ];
//!
//! let scored = score_members(&members, &ctx);
//! assert_eq!(scored[0].metrics.engagement_level, Tier::High);
//! ```

pub mod effectiveness;
pub mod engagement;
pub mod insights;
pub mod performance;
pub mod tier;

pub use effectiveness::{score_partnerships, EffectivenessMetrics, ScoredPartnership};
pub use engagement::{score_members, EngagementFactors, EngagementMetrics, ScoredMember};
pub use insights::{
    members_needing_attention, organization_health, partnerships_needing_review, tenure_cohorts,
    InsightsReport,
    MemberOverview, PartnershipOverview, ProgramOverview, TenureCohort, TierCount,
};
pub use performance::{budget_closeness, score_programs, PerformanceMetrics, ScoredProgram};
pub use tier::{Thresholds, Tier};
