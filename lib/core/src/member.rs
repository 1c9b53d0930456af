use crate::context::ScoringContext;
use crate::record::Record;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One member organization, as imported.
///
/// Columns an upload may omit are `Option`; the scorers substitute neutral
/// values for whatever is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub member_id: String,
    pub name: String,
    pub join_date: NaiveDate,
    pub membership_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// 1 to 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction_score: Option<f64>,
    /// Fraction of events attended, 0 to 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_interaction: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees_paid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl MemberRecord {
    /// Minimal record with only the required columns filled in.
    #[must_use]
    pub fn new(
        member_id: impl Into<String>,
        name: impl Into<String>,
        join_date: NaiveDate,
        membership_type: impl Into<String>,
    ) -> Self {
        Self {
            member_id: member_id.into(),
            name: name.into(),
            join_date,
            membership_type: membership_type.into(),
            renewal_date: None,
            industry: None,
            satisfaction_score: None,
            attendance_rate: None,
            last_interaction: None,
            fees_paid: None,
            location: None,
            contact_person: None,
            email: None,
        }
    }

    /// Days since joining, never negative.
    ///
    /// Always derived from `join_date` against the context date.
    #[inline]
    pub fn membership_duration_days(&self, ctx: &ScoringContext) -> i64 {
        ctx.days_since(self.join_date).max(0)
    }

    /// Days since the last recorded interaction, if one is known.
    #[inline]
    pub fn days_since_interaction(&self, ctx: &ScoringContext) -> Option<i64> {
        self.last_interaction.map(|date| ctx.days_since(date))
    }

    /// Renewal falls within the next `window_days` (today excluded).
    pub fn renews_within(&self, ctx: &ScoringContext, window_days: i64) -> bool {
        match self.renewal_date {
            Some(renewal) => {
                let ahead = (renewal - ctx.today).num_days();
                ahead > 0 && ahead <= window_days
            }
            None => false,
        }
    }

    #[must_use]
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    #[must_use]
    pub fn with_satisfaction(mut self, score: f64) -> Self {
        self.satisfaction_score = Some(score);
        self
    }

    #[must_use]
    pub fn with_attendance(mut self, rate: f64) -> Self {
        self.attendance_rate = Some(rate);
        self
    }

    #[must_use]
    pub fn with_last_interaction(mut self, date: NaiveDate) -> Self {
        self.last_interaction = Some(date);
        self
    }

    #[must_use]
    pub fn with_renewal_date(mut self, date: NaiveDate) -> Self {
        self.renewal_date = Some(date);
        self
    }

    #[must_use]
    pub fn with_fees_paid(mut self, fees: f64) -> Self {
        self.fees_paid = Some(fees);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl Record for MemberRecord {
    const KIND: &'static str = "member";

    fn id(&self) -> &str {
        &self.member_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
