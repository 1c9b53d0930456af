//! # OrgPulse Similarity
//!
//! Finds the members most like a given member.
//!
//! Every row is encoded as a feature vector (numeric fields as-is, categorical
//! fields one-hot), each column is standardised across the whole table, and
//! rows are ranked by cosine similarity to the target. Each result carries a
//! per-field breakdown of its score.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use orgpulse_core::{MemberRecord, ScoringContext};
//! use orgpulse_scoring::score_members;
//! use orgpulse_similarity::SimilarityRanker;
//!
//! let ctx = ScoringContext::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
//! let joined = NaiveDate::from_ymd_opt(2022, 3, 1).unwrap();
//! let members = vec![
//!     MemberRecord::new("M1", "Alpha", joined, "Premium").with_industry("Technology"),
//!     MemberRecord::new("M2", "Beta", joined, "Premium").with_industry("Technology"),
//!     MemberRecord::new("M3", "Gamma", joined, "Basic").with_industry("Healthcare"),
//! ];
//!
//! let scored = score_members(&members, &ctx);
//! let similar = SimilarityRanker::members().find_similar(&scored, "M1", 5);
//! assert_eq!(similar[0].member_id, "M2");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Schema    │────>│   Matrix    │────>│ Standardise │
//! │ (allow-list)│     │ (rows→cols) │     │ (z-scores)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                      ┌─────────────┐           │
//!                      │   Ranker    │<──────────┘
//!                      │  (cosine)   │
//!                      └─────────────┘
//!                             │
//!                      ┌─────────────┐
//!                      │  Explain    │
//!                      │  (stats)    │
//!                      └─────────────┘
//! ```

pub mod explain;
pub mod matrix;
pub mod ranker;
pub mod row;
pub mod schema;
pub mod vector;

// Re-export main types for convenience
pub use explain::{SimilarResponse, SimilarityStats};
pub use matrix::{ColumnGroup, FeatureMatrix};
pub use ranker::{RankedMember, SimilarityRanker, DEFAULT_LIMIT};
pub use row::{FeatureRow, FeatureValue, MemberView};
pub use schema::{FeatureField, FeatureKind, FeatureSchema, SchemaError};
pub use vector::FeatureVector;
