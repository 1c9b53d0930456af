//! # OrgPulse Core
//!
//! Core record types for the OrgPulse operations dashboard.
//!
//! This crate provides the tables every other OrgPulse crate works on:
//!
//! - [`MemberRecord`] - A member organization with optional activity columns
//! - [`PartnershipRecord`] - A partner with ratings, value and a date-driven status
//! - [`ProgramRecord`] - A program with capacity, budget and outcome columns
//! - [`ScoringContext`] - The request-scoped reference date
//! - [`ingest`] - Import-time normalisation of statuses and enrollment
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use orgpulse_core::{ingest, PartnershipRecord, PartnershipStatus, ScoringContext};
//!
//! let ctx = ScoringContext::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
//! let partner = PartnershipRecord::new(
//!     "P0001",
//!     "Partner Organization 1",
//!     "Funding",
//!     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
//! )
//! .with_end_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
//!
//! let rows = ingest::ingest_partnerships(&[partner], &ctx).unwrap();
//! assert_eq!(rows[0].status, Some(PartnershipStatus::Completed));
//! ```

pub mod context;
pub mod error;
pub mod ingest;
pub mod member;
pub mod partnership;
pub mod program;
pub mod record;

pub use context::ScoringContext;
pub use error::{Error, Result};
pub use member::MemberRecord;
pub use partnership::{PartnershipRecord, PartnershipStatus};
pub use program::{ProgramRecord, ProgramStatus};
pub use record::{find_by_id, validate_unique_ids, Record};
