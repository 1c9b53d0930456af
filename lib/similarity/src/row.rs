//! Field access for rankable rows.

use orgpulse_core::{MemberRecord, Record, ScoringContext};
use orgpulse_scoring::ScoredMember;

/// A single cell as seen by the feature encoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Number(f64),
    Category(&'a str),
}

impl<'a> FeatureValue<'a> {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&'a str> {
        match self {
            FeatureValue::Category(c) => Some(*c),
            FeatureValue::Number(_) => None,
        }
    }
}

/// A row the ranker can encode.
pub trait FeatureRow {
    fn row_id(&self) -> &str;

    fn row_name(&self) -> &str;

    /// Value of a named field, `None` when the row does not carry it.
    fn feature(&self, field: &str) -> Option<FeatureValue<'_>>;
}

fn member_field<'a>(member: &'a MemberRecord, field: &str) -> Option<FeatureValue<'a>> {
    match field {
        "satisfaction_score" => member.satisfaction_score.map(FeatureValue::Number),
        "attendance_rate" => member.attendance_rate.map(FeatureValue::Number),
        "fees_paid" => member.fees_paid.map(FeatureValue::Number),
        "membership_type" => Some(FeatureValue::Category(&member.membership_type)),
        "industry" => member.industry.as_deref().map(FeatureValue::Category),
        "location" => member.location.as_deref().map(FeatureValue::Category),
        _ => None,
    }
}

impl FeatureRow for ScoredMember {
    fn row_id(&self) -> &str {
        self.record.id()
    }

    fn row_name(&self) -> &str {
        self.record.name()
    }

    fn feature(&self, field: &str) -> Option<FeatureValue<'_>> {
        match field {
            "engagement_score" => Some(FeatureValue::Number(self.metrics.engagement_score)),
            "membership_duration_days" => Some(FeatureValue::Number(
                self.metrics.membership_duration_days as f64,
            )),
            "engagement_level" => Some(FeatureValue::Category(self.metrics.engagement_level.as_str())),
            other => member_field(&self.record, other),
        }
    }
}

/// An unscored member, with its tenure resolved against a context date.
#[derive(Debug, Clone, Copy)]
pub struct MemberView<'a> {
    pub record: &'a MemberRecord,
    pub ctx: &'a ScoringContext,
}

impl<'a> MemberView<'a> {
    pub fn new(record: &'a MemberRecord, ctx: &'a ScoringContext) -> Self {
        Self { record, ctx }
    }

    /// Wrap a whole table.
    pub fn table(records: &'a [MemberRecord], ctx: &'a ScoringContext) -> Vec<Self> {
        records.iter().map(|record| Self::new(record, ctx)).collect()
    }
}

impl FeatureRow for MemberView<'_> {
    fn row_id(&self) -> &str {
        self.record.id()
    }

    fn row_name(&self) -> &str {
        self.record.name()
    }

    fn feature(&self, field: &str) -> Option<FeatureValue<'_>> {
        match field {
            "membership_duration_days" => Some(FeatureValue::Number(
                self.record.membership_duration_days(self.ctx) as f64,
            )),
            other => member_field(self.record, other),
        }
    }
}
