//! Feature schema definitions
//!
//! Declares which row fields feed the similarity ranker and how each one is
//! encoded: numeric fields become one standardised column, categorical fields
//! become one indicator column per distinct value.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Feature schema version 1
///
/// An ordered allow-list of fields. Order fixes the column layout of the
/// feature matrix; fields a table does not carry are skipped at build time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureSchema {
    /// Schema version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    pub fields: Vec<FeatureField>,
}

fn default_version() -> u32 {
    1
}

impl FeatureSchema {
    pub fn new(fields: Vec<FeatureField>) -> Self {
        Self { version: 1, fields }
    }

    /// The member allow-list: five numeric fields, then four categorical ones.
    pub fn members() -> Self {
        Self::new(vec![
            FeatureField::numeric("satisfaction_score"),
            FeatureField::numeric("attendance_rate"),
            FeatureField::numeric("engagement_score"),
            FeatureField::numeric("membership_duration_days"),
            FeatureField::numeric("fees_paid"),
            FeatureField::categorical("membership_type"),
            FeatureField::categorical("industry"),
            FeatureField::categorical("engagement_level"),
            FeatureField::categorical("location"),
        ])
    }

    /// Validate the schema
    /// - Rejects an empty field list
    /// - Rejects a field listed twice
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::BlankFieldName);
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        Ok(())
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::members()
    }
}

/// One field of the feature schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureField {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: FeatureKind,
}

impl FeatureField {
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FeatureKind::Numeric,
        }
    }

    pub fn categorical(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FeatureKind::Categorical,
        }
    }
}

/// Encoding applied to a field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    /// Used as-is, then standardised
    Numeric,
    /// One-hot encoded, then standardised
    Categorical,
}

/// Errors that can occur during schema validation
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema cannot be empty")]
    EmptySchema,

    #[error("Field name cannot be blank")]
    BlankFieldName,

    #[error("Field '{0}' listed more than once")]
    DuplicateField(String),
}
