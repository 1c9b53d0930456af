//! Import-time normalisation.
//!
//! Brings freshly imported rows in line with the table invariants before any
//! metric is derived: date-driven statuses, enrollment within capacity and
//! unique identifiers. Inputs are copied, never mutated in place.

use crate::context::ScoringContext;
use crate::member::MemberRecord;
use crate::partnership::{PartnershipRecord, PartnershipStatus};
use crate::program::{ProgramRecord, ProgramStatus};
use crate::record::validate_unique_ids;
use crate::Result;
use tracing::debug;

/// Status a partnership must carry given its dates.
///
/// A past end date wins over everything; a future start date means
/// `Pending` unless the partnership is still being negotiated.
pub fn resolve_partnership_status(
    record: &PartnershipRecord,
    ctx: &ScoringContext,
) -> PartnershipStatus {
    let declared = record.status.unwrap_or(PartnershipStatus::Active);
    if record.end_date.is_some_and(|end| end < ctx.today) {
        PartnershipStatus::Completed
    } else if record.start_date > ctx.today && declared != PartnershipStatus::Negotiation {
        PartnershipStatus::Pending
    } else {
        declared
    }
}

/// Status a program must carry given its dates.
pub fn resolve_program_status(record: &ProgramRecord, ctx: &ScoringContext) -> ProgramStatus {
    if record.end_date.is_some_and(|end| end < ctx.today) {
        ProgramStatus::Completed
    } else if record.start_date > ctx.today && record.status != ProgramStatus::OnHold {
        ProgramStatus::Planned
    } else {
        record.status
    }
}

/// Validate an imported member table.
pub fn ingest_members(rows: &[MemberRecord]) -> Result<Vec<MemberRecord>> {
    validate_unique_ids(rows)?;
    Ok(rows.to_vec())
}

/// Validate an imported partnership table and settle every status.
pub fn ingest_partnerships(
    rows: &[PartnershipRecord],
    ctx: &ScoringContext,
) -> Result<Vec<PartnershipRecord>> {
    validate_unique_ids(rows)?;
    let mut changed = 0usize;
    let normalized = rows
        .iter()
        .map(|row| {
            let status = resolve_partnership_status(row, ctx);
            if row.status != Some(status) {
                changed += 1;
            }
            PartnershipRecord {
                status: Some(status),
                ..row.clone()
            }
        })
        .collect();
    debug!(rows = rows.len(), changed, "partnership statuses resolved");
    Ok(normalized)
}

/// Validate an imported program table, settle statuses and clamp enrollment.
pub fn ingest_programs(rows: &[ProgramRecord], ctx: &ScoringContext) -> Result<Vec<ProgramRecord>> {
    validate_unique_ids(rows)?;
    let mut clamped = 0usize;
    let normalized = rows
        .iter()
        .map(|row| {
            let mut program = row.clone();
            program.status = resolve_program_status(row, ctx);
            if let (Some(capacity), Some(current)) = (row.capacity, row.current_enrollment) {
                if current > capacity {
                    program.current_enrollment = Some(capacity);
                    clamped += 1;
                }
            }
            program
        })
        .collect();
    debug!(rows = rows.len(), clamped, "program enrollment clamped to capacity");
    Ok(normalized)
}
