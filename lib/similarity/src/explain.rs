//! Explainability for similarity results
//!
//! Response and summary structures for a similar-members query, built on the
//! per-field contributions carried by [`RankedMember`].

use crate::ranker::RankedMember;
use serde::Serialize;

/// Response structure for the similar-members endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SimilarResponse {
    /// Similar rows, most similar first
    pub result: Vec<RankedMember>,
    pub stats: SimilarityStats,
}

impl SimilarResponse {
    /// Create from ranked results
    pub fn from_ranked(ranked: Vec<RankedMember>, candidates_count: usize) -> Self {
        let stats = SimilarityStats::compute(&ranked, candidates_count);
        Self {
            result: ranked,
            stats,
        }
    }
}

/// Summary statistics for a similarity query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityStats {
    /// Number of rows the target was compared against
    pub candidates_count: usize,
    /// Number of results returned
    pub results_count: usize,
    /// Average score of results
    pub avg_score: f64,
    /// Score of best result
    pub best_score: f64,
    /// Field that contributed most to the best result
    pub top_contributing_field: Option<String>,
}

impl SimilarityStats {
    /// Compute stats from ranked results (sorted best first)
    pub fn compute(results: &[RankedMember], candidates_count: usize) -> Self {
        let Some(best) = results.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                top_contributing_field: None,
            };
        };

        let avg_score =
            results.iter().map(|r| r.similarity_score).sum::<f64>() / results.len() as f64;

        let top_contributing_field = best
            .contributions
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(name, _)| name.clone());

        Self {
            candidates_count,
            results_count: results.len(),
            avg_score,
            best_score: best.similarity_score,
            top_contributing_field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn ranked(id: &str, score: f64) -> RankedMember {
        let mut contributions = BTreeMap::new();
        contributions.insert("industry".to_string(), score * 0.5);
        contributions.insert("fees_paid".to_string(), score * 0.3);
        contributions.insert("location".to_string(), score * 0.2);

        RankedMember {
            member_id: id.to_string(),
            name: format!("Member {id}"),
            similarity_score: score,
            contributions,
        }
    }

    #[test]
    fn test_similarity_stats() {
        let results = vec![ranked("1", 0.9), ranked("2", 0.6), ranked("3", 0.3)];
        let stats = SimilarityStats::compute(&results, 10);

        assert_eq!(stats.candidates_count, 10);
        assert_eq!(stats.results_count, 3);
        assert_eq!(stats.best_score, 0.9);
        assert!((stats.avg_score - 0.6).abs() < 1e-12);
        assert_eq!(stats.top_contributing_field, Some("industry".to_string()));
    }

    #[test]
    fn test_empty_stats() {
        let stats = SimilarityStats::compute(&[], 5);

        assert_eq!(stats.candidates_count, 5);
        assert_eq!(stats.results_count, 0);
        assert_eq!(stats.best_score, 0.0);
        assert!(stats.top_contributing_field.is_none());
    }

    #[test]
    fn test_similar_response_serialization() {
        let response = SimilarResponse::from_ranked(vec![ranked("1", 0.95), ranked("2", 0.85)], 4);
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"result\""));
        assert!(json.contains("\"similarity_score\""));
        assert!(json.contains("\"contributions\""));
        assert!(json.contains("\"candidates_count\":4"));
    }
}
