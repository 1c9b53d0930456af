use crate::record::Record;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgramStatus {
    Active,
    Planned,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProgramStatus::Active => "Active",
            ProgramStatus::Planned => "Planned",
            ProgramStatus::Completed => "Completed",
            ProgramStatus::OnHold => "On Hold",
        };
        f.write_str(label)
    }
}

/// One program, as imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRecord {
    pub program_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub status: ProgramStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_enrollment: Option<u32>,
    /// 1 to 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<f64>,
    /// Program-defined outcome measure, 0 to 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_metric: Option<f64>,
}

impl ProgramRecord {
    #[must_use]
    pub fn new(
        program_id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        status: ProgramStatus,
    ) -> Self {
        Self {
            program_id: program_id.into(),
            name: name.into(),
            start_date,
            status,
            end_date: None,
            program_type: None,
            target_audience: None,
            capacity: None,
            current_enrollment: None,
            satisfaction_score: None,
            budget: None,
            expenses: None,
            success_metric: None,
        }
    }

    #[must_use]
    pub fn with_end_date(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    #[must_use]
    pub fn with_enrollment(mut self, capacity: u32, current: u32) -> Self {
        self.capacity = Some(capacity);
        self.current_enrollment = Some(current);
        self
    }

    #[must_use]
    pub fn with_budget(mut self, budget: f64, expenses: f64) -> Self {
        self.budget = Some(budget);
        self.expenses = Some(expenses);
        self
    }

    #[must_use]
    pub fn with_satisfaction(mut self, score: f64) -> Self {
        self.satisfaction_score = Some(score);
        self
    }

    #[must_use]
    pub fn with_success_metric(mut self, metric: f64) -> Self {
        self.success_metric = Some(metric);
        self
    }
}

impl Record for ProgramRecord {
    const KIND: &'static str = "program";

    fn id(&self) -> &str {
        &self.program_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
