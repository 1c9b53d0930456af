use serde::{Deserialize, Serialize};

/// A dense feature vector for one table row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    data: Vec<f64>,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    #[inline]
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Compute cosine similarity with another vector
    ///
    /// A zero vector is orthogonal to everything, itself included.
    #[inline]
    pub fn cosine_similarity(&self, other: &FeatureVector) -> f64 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        self.dot(other) / (norm_a * norm_b)
    }

    /// Per-component share of the cosine similarity with `other`.
    ///
    /// The returned terms sum to [`cosine_similarity`](Self::cosine_similarity).
    pub fn cosine_terms(&self, other: &FeatureVector) -> Vec<f64> {
        let denominator = self.norm() * other.norm();
        if self.dim() != other.dim() || denominator == 0.0 {
            return vec![0.0; self.dim()];
        }

        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b / denominator)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = FeatureVector::new(vec![1.0, 0.0]);
        let v2 = FeatureVector::new(vec![1.0, 0.0]);
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-12);

        let v3 = FeatureVector::new(vec![1.0, 0.0]);
        let v4 = FeatureVector::new(vec![0.0, 1.0]);
        assert!(v3.cosine_similarity(&v4).abs() < 1e-12);

        let v5 = FeatureVector::new(vec![-2.0, 0.0]);
        assert!((v1.cosine_similarity(&v5) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_guard() {
        let zero = FeatureVector::new(vec![0.0, 0.0]);
        let v = FeatureVector::new(vec![3.0, 4.0]);
        assert_eq!(zero.cosine_similarity(&v), 0.0);
        assert_eq!(zero.cosine_terms(&v), vec![0.0, 0.0]);
    }

    #[test]
    fn test_cosine_terms_sum() {
        let a = FeatureVector::new(vec![1.0, 2.0, -1.0]);
        let b = FeatureVector::new(vec![0.5, 1.0, 2.0]);
        let total: f64 = a.cosine_terms(&b).iter().sum();
        assert!((total - a.cosine_similarity(&b)).abs() < 1e-12);
    }
}
