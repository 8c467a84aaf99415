//! Consistency Checker - Consistency Index/Ratio of a comparison matrix.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{PairwiseMatrix, WeightVector};
use crate::domain::foundation::AnalysisError;

/// Judgments with a consistency ratio at or below this are acceptable.
pub const CONSISTENCY_THRESHOLD: f64 = 0.1;

/// Saaty's Random Index, indexed by matrix size (position 0 unused).
pub const RANDOM_INDEX: [f64; 11] = [0.0, 0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Random Index used for n > 10, where no canonical table value exists.
pub const RANDOM_INDEX_FALLBACK: f64 = 1.49;

/// Outcome of a consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub consistency_ratio: f64,
    /// `consistency_ratio <= CONSISTENCY_THRESHOLD`.
    pub acceptable: bool,
}

impl ConsistencyResult {
    /// Returns true when the judgments should be revised before use.
    pub fn needs_revision(&self) -> bool {
        !self.acceptable
    }
}

/// Looks up the Random Index for an n×n matrix.
pub fn random_index(n: usize) -> f64 {
    RANDOM_INDEX.get(n).copied().unwrap_or(RANDOM_INDEX_FALLBACK)
}

/// Consistency evaluation.
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Computes CI and CR for `matrix` given its derived `weights`.
    ///
    /// # Algorithm
    /// 1. `lambda_max = mean_i((M·w)_i / w_i)`
    /// 2. `CI = (lambda_max - n) / (n - 1)`, or 0 when n = 1
    /// 3. `CR = CI / RI(n)`, or 0 when RI is 0 (n <= 2)
    ///
    /// The result does not depend on how `weights` is scaled.
    ///
    /// # Errors
    /// - `DimensionMismatch` if `weights` does not match the matrix size
    /// - `InvalidValue` if any weight is not strictly positive
    pub fn evaluate(
        matrix: &PairwiseMatrix,
        weights: &[f64],
    ) -> Result<ConsistencyResult, AnalysisError> {
        let n = matrix.size();
        if weights.len() != n {
            return Err(AnalysisError::dimension_mismatch("weights", n, weights.len()));
        }
        if n == 0 {
            return Err(AnalysisError::incomplete("cannot check an empty matrix"));
        }
        if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(AnalysisError::invalid_value(
                "weights",
                "consistency requires strictly positive weights",
            ));
        }

        let weighted = matrix.multiply(weights)?;
        let lambda_max = weighted
            .iter()
            .zip(weights)
            .map(|(mw, w)| mw / w)
            .sum::<f64>()
            / n as f64;

        let consistency_index = if n > 1 {
            (lambda_max - n as f64) / (n as f64 - 1.0)
        } else {
            0.0
        };

        let ri = random_index(n);
        let consistency_ratio = if ri != 0.0 { consistency_index / ri } else { 0.0 };
        let acceptable = consistency_ratio <= CONSISTENCY_THRESHOLD;

        if acceptable {
            debug!(size = n, lambda_max, consistency_ratio, "Judgments are consistent");
        } else {
            warn!(
                size = n,
                lambda_max,
                consistency_ratio,
                threshold = CONSISTENCY_THRESHOLD,
                "Consistency ratio exceeds threshold; judgments should be revised"
            );
        }

        Ok(ConsistencyResult {
            lambda_max,
            consistency_index,
            consistency_ratio,
            acceptable,
        })
    }

    /// Convenience wrapper taking a `WeightVector`.
    pub fn evaluate_weights(
        matrix: &PairwiseMatrix,
        weights: &WeightVector,
    ) -> Result<ConsistencyResult, AnalysisError> {
        Self::evaluate(matrix, weights.as_slice())
    }
}
