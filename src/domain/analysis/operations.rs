//! Operation surface used by collaborators (HTTP handlers, CLIs, UIs).
//!
//! Thin free functions over the analysis services. Each call is a pure
//! function of its arguments; nothing is retained between calls.

use super::{
    ConsistencyChecker, ConsistencyResult, CriteriaBlock, FinalRanking, ItemSet,
    NormalizationEngine, Orientation, PairwiseMatrix, PriorityDeriver, RankAggregator,
    ScoreMatrix, ValueMatrix, WeightVector,
};
use crate::domain::foundation::AnalysisError;

/// Creates an n×n comparison matrix with every entry 1.
pub fn create_matrix(item_count: usize) -> PairwiseMatrix {
    PairwiseMatrix::new(item_count)
}

/// Records `value` for (i, j) and its reciprocal for (j, i).
pub fn set_comparison(
    matrix: &mut PairwiseMatrix,
    i: usize,
    j: usize,
    value: f64,
) -> Result<(), AnalysisError> {
    matrix.set(i, j, value)
}

/// Derives weights with the reference (eigenvector) strategy.
pub fn derive_weights(matrix: &PairwiseMatrix) -> Result<WeightVector, AnalysisError> {
    PriorityDeriver::default().derive(matrix)
}

/// Computes CI/CR for a matrix and its weights.
pub fn check_consistency(
    matrix: &PairwiseMatrix,
    weights: &WeightVector,
) -> Result<ConsistencyResult, AnalysisError> {
    ConsistencyChecker::evaluate_weights(matrix, weights)
}

/// Normalizes with the default (rejecting) degenerate-column policy.
pub fn normalize(values: &ValueMatrix, orientation: Orientation) -> Result<ScoreMatrix, AnalysisError> {
    NormalizationEngine::default().normalize(values, orientation)
}

/// `score[alt] = Σ weight[c] × contribution[c][alt]`.
pub fn aggregate_additive(
    alternatives: &ItemSet,
    criteria_weights: &[f64],
    contributions: &[Vec<f64>],
) -> Result<FinalRanking, AnalysisError> {
    RankAggregator::aggregate_additive(alternatives, criteria_weights, contributions)
}

/// `score[alt] = Π value[c][alt]^(±weight[c])`.
pub fn aggregate_multiplicative(
    alternatives: &ItemSet,
    blocks: &[CriteriaBlock<'_>],
) -> Result<FinalRanking, AnalysisError> {
    RankAggregator::aggregate_multiplicative(alternatives, blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_operations_round_trip() {
        let mut matrix = create_matrix(2);
        set_comparison(&mut matrix, 0, 1, 3.0).unwrap();

        let weights = derive_weights(&matrix).unwrap();
        assert!((weights.as_slice()[0] - 0.75).abs() < 1e-9);
        assert!((weights.as_slice()[1] - 0.25).abs() < 1e-9);

        let consistency = check_consistency(&matrix, &weights).unwrap();
        assert_eq!(consistency.consistency_ratio, 0.0);
        assert!(consistency.acceptable);
    }

    #[test]
    fn set_comparison_surfaces_errors() {
        let mut matrix = create_matrix(2);
        assert!(matches!(
            set_comparison(&mut matrix, 0, 5, 2.0),
            Err(AnalysisError::OutOfRange { index: 5, count: 2 })
        ));
        assert!(matches!(
            set_comparison(&mut matrix, 0, 1, -2.0),
            Err(AnalysisError::InvalidValue { .. })
        ));
    }

    #[test]
    fn saw_single_benefit_criterion() {
        let alternatives = ItemSet::new(vec!["alt1", "alt2"]).unwrap();
        let values = ValueMatrix::new(vec![vec![10.0], vec![20.0]]).unwrap();

        let scores = normalize(&values, Orientation::Benefit).unwrap();
        assert_eq!(scores.column(0), vec![0.5, 1.0]);

        let ranking = aggregate_additive(&alternatives, &[1.0], &[scores.column(0)]).unwrap();
        assert_eq!(ranking.scores(), &[0.5, 1.0]);
        assert_eq!(ranking.order(), vec!["alt2", "alt1"]);
    }

    #[test]
    fn multiplicative_surface_delegates() {
        let alternatives = ItemSet::new(vec!["A", "B"]).unwrap();
        let values = ValueMatrix::new(vec![vec![2.0], vec![8.0]]).unwrap();
        let ranking = aggregate_multiplicative(
            &alternatives,
            &[CriteriaBlock {
                orientation: Orientation::Cost,
                weights: &[1.0],
                values: &values,
            }],
        )
        .unwrap();

        assert_eq!(ranking.order(), vec!["A", "B"]);
    }
}
