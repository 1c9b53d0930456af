//! Shared behaviour for imported rows.

use crate::{Error, Result};
use std::collections::HashSet;

/// A row of an imported table, addressable by a unique identifier.
pub trait Record {
    /// Human-readable table kind, used in error messages.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn name(&self) -> &str;
}

/// Reject tables with a blank identifier or two rows sharing one.
pub fn validate_unique_ids<R: Record>(rows: &[R]) -> Result<()> {
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        if row.id().trim().is_empty() {
            return Err(Error::InvalidRecord {
                id: row.id().to_string(),
                reason: format!("{} identifier is blank", R::KIND),
            });
        }
        if !seen.insert(row.id()) {
            return Err(Error::DuplicateId {
                kind: R::KIND,
                id: row.id().to_string(),
            });
        }
    }
    Ok(())
}

/// Locate a row by identifier.
pub fn find_by_id<'a, R: Record>(rows: &'a [R], id: &str) -> Result<&'a R> {
    rows.iter()
        .find(|row| row.id() == id)
        .ok_or_else(|| Error::RecordNotFound(format!("{} {}", R::KIND, id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemberRecord;
    use chrono::NaiveDate;

    fn member(id: &str) -> MemberRecord {
        MemberRecord::new(id, "Name", NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(), "Basic")
    }

    #[test]
    fn test_blank_identifier_rejected() {
        let err = validate_unique_ids(&[member("M1"), member("  ")]).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { .. }));
    }

    #[test]
    fn test_find_by_id() {
        let rows = vec![member("M1"), member("M2")];
        assert_eq!(find_by_id(&rows, "M2").unwrap().member_id, "M2");
        assert_eq!(
            find_by_id(&rows, "M9").unwrap_err().to_string(),
            "Record not found: member M9"
        );
    }
}
