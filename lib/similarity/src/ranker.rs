//! Similar-row ranking
//!
//! Ranks every row of a table by cosine similarity to a target row over the
//! standardised feature matrix, with a per-field breakdown of each score.

use crate::matrix::FeatureMatrix;
use crate::row::FeatureRow;
use crate::schema::{FeatureSchema, SchemaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Default number of similar rows returned.
pub const DEFAULT_LIMIT: usize = 5;

/// One row ranked against the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMember {
    pub member_id: String,
    pub name: String,
    /// Cosine similarity in [-1, 1]
    pub similarity_score: f64,
    /// Share of the score contributed by each schema field
    pub contributions: BTreeMap<String, f64>,
}

/// Ranker that scores rows against a target over a fixed schema
#[derive(Debug, Clone)]
pub struct SimilarityRanker {
    schema: FeatureSchema,
}

impl SimilarityRanker {
    /// Create a new ranker with the given schema
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema }
    }

    /// Create a ranker after validating the schema
    pub fn try_new(schema: FeatureSchema) -> Result<Self, SchemaError> {
        schema.validate()?;
        Ok(Self::new(schema))
    }

    /// Ranker over the member allow-list
    pub fn members() -> Self {
        Self::new(FeatureSchema::members())
    }

    /// Get a reference to the schema
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Rank all rows of `rows` against `target_id`
    ///
    /// Rows sharing the target's identifier are excluded. Results are sorted by
    /// descending similarity; ties keep input order.
    pub fn rank<R: FeatureRow>(&self, rows: &[R], target_id: &str) -> Vec<RankedMember> {
        let Some(target) = rows.iter().position(|row| row.row_id() == target_id) else {
            debug!(target_id, "target row not found");
            return Vec::new();
        };

        let Some(matrix) = FeatureMatrix::standardized(rows, &self.schema) else {
            return Vec::new();
        };

        let target_vector = matrix.row(target);
        let mut ranked: Vec<RankedMember> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.row_id() != target_id)
            .map(|(index, row)| {
                let candidate = matrix.row(index);
                let terms = target_vector.cosine_terms(candidate);
                let contributions = matrix
                    .groups()
                    .iter()
                    .map(|group| (group.field.clone(), terms[group.columns.clone()].iter().sum::<f64>()))
                    .collect::<BTreeMap<_, _>>();
                RankedMember {
                    member_id: row.row_id().to_string(),
                    name: row.row_name().to_string(),
                    similarity_score: target_vector.cosine_similarity(candidate),
                    contributions,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        ranked
    }

    /// The `limit` rows most similar to `target_id`
    ///
    /// Empty when the table is empty, the target is absent or no schema field
    /// is usable.
    pub fn find_similar<R: FeatureRow>(
        &self,
        rows: &[R],
        target_id: &str,
        limit: usize,
    ) -> Vec<RankedMember> {
        let mut ranked = self.rank(rows, target_id);
        ranked.truncate(limit);
        debug!(target_id, limit, returned = ranked.len(), "similar rows ranked");
        ranked
    }
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::members()
    }
}
