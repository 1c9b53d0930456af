//! # OrgPulse
//!
//! Derived metrics and explainable member similarity for nonprofit
//! operations teams.
//!
//! OrgPulse takes the member, partnership and program tables an organization
//! already keeps and adds the columns a dashboard needs: engagement scores,
//! partnership effectiveness, program performance, tier labels and a ranked
//! list of members most like a given one.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! orgpulse --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use orgpulse::prelude::*;
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let ctx = ScoringContext::new(today);
//!
//! let members = vec![
//!     MemberRecord::new("M1", "Harbor Trust", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), "Premium")
//!         .with_attendance(0.9)
//!         .with_satisfaction(9.0),
//!     MemberRecord::new("M2", "Quay Fund", NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(), "Premium")
//!         .with_attendance(0.8)
//!         .with_satisfaction(8.0),
//! ];
//!
//! let scored = score_members(&members, &ctx);
//! let similar = SimilarityRanker::members().find_similar(&scored, "M1", 5);
//! assert_eq!(similar[0].member_id, "M2");
//! ```
//!
//! ## Crate Structure
//!
//! - `orgpulse-core` - record types, reference date, ingestion normalisation
//! - `orgpulse-scoring` - engagement, effectiveness, performance and insights
//! - `orgpulse-similarity` - feature matrix, cosine ranking, explanations
//! - `orgpulse-api` - stateless REST endpoints

// Re-export core types
pub use orgpulse_core::{
    ingest, Error, MemberRecord, PartnershipRecord, PartnershipStatus, ProgramRecord,
    ProgramStatus, Record, Result, ScoringContext,
};

// Re-export scoring
pub use orgpulse_scoring::{
    score_members, score_partnerships, score_programs, InsightsReport, ScoredMember,
    ScoredPartnership, ScoredProgram, Tier,
};

// Re-export similarity
pub use orgpulse_similarity::{FeatureSchema, RankedMember, SimilarResponse, SimilarityRanker};

// Re-export API
pub use orgpulse_api::{ApiConfig, RestApi};

/// Everything needed to score and rank tables in one import.
pub mod prelude {
    pub use orgpulse_core::{
        MemberRecord, PartnershipRecord, PartnershipStatus, ProgramRecord, ProgramStatus,
        ScoringContext,
    };
    pub use orgpulse_scoring::{
        score_members, score_partnerships, score_programs, InsightsReport, Tier,
    };
    pub use orgpulse_similarity::{FeatureSchema, SimilarityRanker};
}
