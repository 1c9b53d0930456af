use crate::context::ScoringContext;
use crate::record::Record;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a partnership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartnershipStatus {
    Active,
    Pending,
    Completed,
    Negotiation,
}

impl fmt::Display for PartnershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PartnershipStatus::Active => "Active",
            PartnershipStatus::Pending => "Pending",
            PartnershipStatus::Completed => "Completed",
            PartnershipStatus::Negotiation => "Negotiation",
        };
        f.write_str(label)
    }
}

/// One partner organization, as imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnershipRecord {
    pub partner_id: String,
    pub name: String,
    pub partnership_type: String,
    pub start_date: NaiveDate,
    /// Absent means the partnership is open-ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PartnershipStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_contribution: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// 1 to 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_rating: Option<f64>,
    /// 1 to 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meetings_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_resources: Option<u32>,
}

impl PartnershipRecord {
    #[must_use]
    pub fn new(
        partner_id: impl Into<String>,
        name: impl Into<String>,
        partnership_type: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            partner_id: partner_id.into(),
            name: name.into(),
            partnership_type: partnership_type.into(),
            start_date,
            end_date: None,
            status: None,
            focus_area: None,
            value_contribution: None,
            cost: None,
            performance_rating: None,
            alignment_score: None,
            meetings_count: None,
            shared_resources: None,
        }
    }

    /// Still running as of the context date.
    pub fn is_ongoing(&self, ctx: &ScoringContext) -> bool {
        self.end_date.map_or(true, |end| end > ctx.today)
    }

    #[must_use]
    pub fn with_end_date(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: PartnershipStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_ratings(mut self, performance: Option<f64>, alignment: Option<f64>) -> Self {
        self.performance_rating = performance;
        self.alignment_score = alignment;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: f64, cost: Option<f64>) -> Self {
        self.value_contribution = Some(value);
        self.cost = cost;
        self
    }
}

impl Record for PartnershipRecord {
    const KIND: &'static str = "partnership";

    fn id(&self) -> &str {
        &self.partner_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
