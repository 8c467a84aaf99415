//! Priority Deriver - Turns a pairwise comparison matrix into a weight vector.
//!
//! Three strategies share one contract (`matrix -> WeightVector`):
//!
//! - `Eigenvector`: principal eigenvector of the matrix (reference method)
//! - `PowerIteration`: repeated `w <- normalize(M·w)` from the uniform vector
//! - `ColumnAverage`: normalize columns to sum 1, then average each row
//!
//! All three agree on perfectly consistent matrices. On inconsistent
//! matrices they can diverge slightly, so callers that need agreement with
//! the AHP literature should keep the default `Eigenvector`.

use nalgebra::{DMatrix, Schur, SVD};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::PairwiseMatrix;
use crate::domain::foundation::AnalysisError;

/// Default L1 convergence tolerance for power iteration.
pub const DEFAULT_POWER_TOLERANCE: f64 = 1e-4;

/// Default iteration cap for power iteration.
pub const DEFAULT_POWER_MAX_ITERATIONS: usize = 100;

/// Iteration cap for the Schur and SVD decompositions.
const DECOMPOSITION_MAX_ITERATIONS: usize = 10_000;

/// Components this close below zero are rounding noise and clamp to zero.
const NEGATIVE_NOISE: f64 = 1e-12;

/// A normalized priority vector: non-negative entries summing to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Normalizes raw non-negative values so they sum to 1.
    ///
    /// # Errors
    /// - `InvalidValue` for negative or non-finite entries
    /// - `DegenerateMatrix` when the values sum to zero
    pub fn normalized(values: Vec<f64>) -> Result<Self, AnalysisError> {
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(AnalysisError::invalid_value(
                "weights",
                "entries must be finite and non-negative",
            ));
        }
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return Err(AnalysisError::degenerate_matrix("weights sum to zero"));
        }
        Ok(Self(values.into_iter().map(|v| v / total).collect()))
    }

    /// Returns the weights.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns the number of weights.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no weights.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the vector, returning the weights.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Algorithm used to derive priorities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivationStrategy {
    /// Principal eigenvector via eigen-decomposition.
    #[default]
    Eigenvector,
    /// Power-iteration approximation of the principal eigenvector.
    PowerIteration {
        tolerance: f64,
        max_iterations: usize,
    },
    /// Column-normalize, then average rows.
    ColumnAverage,
}

impl DerivationStrategy {
    /// Power iteration with the default tolerance and iteration cap.
    pub fn power_iteration() -> Self {
        DerivationStrategy::PowerIteration {
            tolerance: DEFAULT_POWER_TOLERANCE,
            max_iterations: DEFAULT_POWER_MAX_ITERATIONS,
        }
    }

    /// Returns the display label for this strategy.
    pub fn label(&self) -> &'static str {
        match self {
            DerivationStrategy::Eigenvector => "eigenvector",
            DerivationStrategy::PowerIteration { .. } => "power iteration",
            DerivationStrategy::ColumnAverage => "column average",
        }
    }
}

/// Details of a derivation, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    pub weights: WeightVector,
    pub strategy: DerivationStrategy,
    /// Iterations used (power iteration only).
    pub iterations: Option<usize>,
    /// Whether the tolerance was reached (power iteration only).
    pub converged: Option<bool>,
}

/// Derives priority weights from pairwise comparison matrices.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriorityDeriver {
    strategy: DerivationStrategy,
}

impl PriorityDeriver {
    /// Creates a deriver using `strategy`.
    pub fn new(strategy: DerivationStrategy) -> Self {
        Self { strategy }
    }

    /// Returns the strategy in effect.
    pub fn strategy(&self) -> DerivationStrategy {
        self.strategy
    }

    /// Derives the weight vector for `matrix`.
    pub fn derive(&self, matrix: &PairwiseMatrix) -> Result<WeightVector, AnalysisError> {
        Ok(self.derive_detailed(matrix)?.weights)
    }

    /// Derives the weight vector along with convergence details.
    ///
    /// # Edge Cases
    /// - n = 0: `IncompleteInput`
    /// - n = 1: `[1.0]` regardless of strategy
    pub fn derive_detailed(&self, matrix: &PairwiseMatrix) -> Result<Derivation, AnalysisError> {
        let n = matrix.size();
        if n == 0 {
            return Err(AnalysisError::incomplete("cannot derive weights for an empty matrix"));
        }
        if n == 1 {
            return Ok(Derivation {
                weights: WeightVector(vec![1.0]),
                strategy: self.strategy,
                iterations: None,
                converged: None,
            });
        }

        let derivation = match self.strategy {
            DerivationStrategy::Eigenvector => Derivation {
                weights: principal_eigenvector(matrix)?,
                strategy: self.strategy,
                iterations: None,
                converged: None,
            },
            DerivationStrategy::PowerIteration {
                tolerance,
                max_iterations,
            } => {
                let (weights, iterations, converged) =
                    power_iteration(matrix, tolerance, max_iterations)?;
                Derivation {
                    weights,
                    strategy: self.strategy,
                    iterations: Some(iterations),
                    converged: Some(converged),
                }
            }
            DerivationStrategy::ColumnAverage => Derivation {
                weights: column_average(matrix)?,
                strategy: self.strategy,
                iterations: None,
                converged: None,
            },
        };

        debug!(
            strategy = self.strategy.label(),
            size = n,
            weights = ?derivation.weights.as_slice(),
            "Derived priority weights"
        );

        Ok(derivation)
    }
}

/// Eigenvector for the eigenvalue with the largest real part.
///
/// nalgebra only decomposes general (non-symmetric) matrices down to their
/// eigenvalues, so the eigenvector is recovered as the null space of
/// `M - λI`: the right-singular vector of its smallest singular value.
fn principal_eigenvector(matrix: &PairwiseMatrix) -> Result<WeightVector, AnalysisError> {
    let n = matrix.size();
    let m = matrix.to_dmatrix();

    let schur = Schur::try_new(m.clone(), f64::EPSILON, DECOMPOSITION_MAX_ITERATIONS)
        .ok_or_else(|| AnalysisError::degenerate_matrix("eigen-decomposition did not converge"))?;
    let lambda_max = schur
        .complex_eigenvalues()
        .iter()
        .map(|c| c.re)
        .filter(|re| re.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    if !lambda_max.is_finite() {
        return Err(AnalysisError::degenerate_matrix(
            "eigen-decomposition produced no finite eigenvalue",
        ));
    }

    let shifted = &m - DMatrix::<f64>::identity(n, n) * lambda_max;
    let svd = SVD::try_new(shifted, false, true, f64::EPSILON, DECOMPOSITION_MAX_ITERATIONS)
        .ok_or_else(|| AnalysisError::degenerate_matrix("singular value decomposition did not converge"))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| AnalysisError::degenerate_matrix("singular value decomposition failed"))?;

    let smallest = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(index, _)| index)
        .ok_or_else(|| AnalysisError::degenerate_matrix("no singular values"))?;

    let vector: Vec<f64> = v_t.row(smallest).iter().copied().collect();
    let total: f64 = vector.iter().sum();
    if total.abs() < f64::EPSILON {
        return Err(AnalysisError::degenerate_matrix(
            "principal eigenvector sums to zero",
        ));
    }

    let mut weights = Vec::with_capacity(n);
    for component in vector.iter().map(|x| x / total) {
        if component < -NEGATIVE_NOISE {
            return Err(AnalysisError::degenerate_matrix(
                "principal eigenvector has mixed signs",
            ));
        }
        weights.push(component.max(0.0));
    }

    WeightVector::normalized(weights)
}

/// Returns `(weights, iterations, converged)`.
fn power_iteration(
    matrix: &PairwiseMatrix,
    tolerance: f64,
    max_iterations: usize,
) -> Result<(WeightVector, usize, bool), AnalysisError> {
    let n = matrix.size();
    let mut w = vec![1.0 / n as f64; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < max_iterations.max(1) {
        iterations += 1;

        let product = matrix.multiply(&w)?;
        let total: f64 = product.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(AnalysisError::degenerate_matrix(
                "power iteration produced a zero vector",
            ));
        }
        let next: Vec<f64> = product.iter().map(|x| x / total).collect();

        let change: f64 = next.iter().zip(&w).map(|(a, b)| (a - b).abs()).sum();
        w = next;

        if change < tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            iterations,
            tolerance, "Power iteration stopped before reaching tolerance"
        );
    }

    Ok((WeightVector::normalized(w)?, iterations, converged))
}

fn column_average(matrix: &PairwiseMatrix) -> Result<WeightVector, AnalysisError> {
    let n = matrix.size();
    let sums = matrix.column_sums();

    if let Some(column) = sums.iter().position(|s| *s == 0.0) {
        return Err(AnalysisError::degenerate_matrix(format!(
            "column {} sums to zero",
            column
        )));
    }

    let weights = (0..n)
        .map(|i| {
            matrix
                .row(i)
                .iter()
                .zip(&sums)
                .map(|(value, sum)| value / sum)
                .sum::<f64>()
                / n as f64
        })
        .collect();

    WeightVector::normalized(weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn all_strategies() -> Vec<DerivationStrategy> {
        vec![
            DerivationStrategy::Eigenvector,
            DerivationStrategy::PowerIteration {
                tolerance: 1e-12,
                max_iterations: 1000,
            },
            DerivationStrategy::ColumnAverage,
        ]
    }

    fn consistent_matrix(true_weights: &[f64]) -> PairwiseMatrix {
        let mut m = PairwiseMatrix::new(true_weights.len());
        for i in 0..true_weights.len() {
            for j in (i + 1)..true_weights.len() {
                m.set(i, j, true_weights[i] / true_weights[j]).unwrap();
            }
        }
        m
    }

    fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < tolerance, "expected {:?}, got {:?}", expected, actual);
        }
    }

    #[test]
    fn single_item_yields_unit_weight() {
        for strategy in all_strategies() {
            let weights = PriorityDeriver::new(strategy)
                .derive(&PairwiseMatrix::new(1))
                .unwrap();
            assert_eq!(weights.as_slice(), &[1.0]);
        }
    }

    #[test]
    fn empty_matrix_is_incomplete() {
        let result = PriorityDeriver::default().derive(&PairwiseMatrix::new(0));
        assert!(matches!(result, Err(AnalysisError::IncompleteInput { .. })));
    }

    #[test]
    fn two_items_with_ratio_three() {
        let mut m = PairwiseMatrix::new(2);
        m.set(0, 1, 3.0).unwrap();

        for strategy in all_strategies() {
            let weights = PriorityDeriver::new(strategy).derive(&m).unwrap();
            assert_close(weights.as_slice(), &[0.75, 0.25], TOLERANCE);
        }
    }

    #[test]
    fn recovers_true_weights_from_consistent_matrix() {
        let truth = [0.5, 0.3, 0.2];
        let m = consistent_matrix(&truth);

        for strategy in all_strategies() {
            let weights = PriorityDeriver::new(strategy).derive(&m).unwrap();
            assert_close(weights.as_slice(), &truth, TOLERANCE);
        }
    }

    #[test]
    fn identity_matrix_gives_uniform_weights() {
        let m = PairwiseMatrix::new(4);
        for strategy in all_strategies() {
            let weights = PriorityDeriver::new(strategy).derive(&m).unwrap();
            assert_close(weights.as_slice(), &[0.25; 4], TOLERANCE);
        }
    }

    #[test]
    fn inconsistent_matrix_weights_are_valid_and_ordered() {
        // A > B > C but A vs C judged weaker than transitivity implies.
        let mut m = PairwiseMatrix::new(3);
        m.set(0, 1, 3.0).unwrap();
        m.set(1, 2, 3.0).unwrap();
        m.set(0, 2, 2.0).unwrap();

        for strategy in all_strategies() {
            let weights = PriorityDeriver::new(strategy).derive(&m).unwrap();
            let w = weights.as_slice();
            assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            assert!(w.iter().all(|x| *x >= 0.0));
            assert!(w[0] > w[1] && w[1] > w[2]);
        }
    }

    #[test]
    fn eigenvector_matches_literature_example() {
        // Saaty's classic 3x3: principal eigenvector ~ [0.6370, 0.2583, 0.1047].
        let m = PairwiseMatrix::try_from(vec![
            vec![1.0, 3.0, 5.0],
            vec![1.0 / 3.0, 1.0, 3.0],
            vec![0.2, 1.0 / 3.0, 1.0],
        ])
        .unwrap();

        let weights = PriorityDeriver::new(DerivationStrategy::Eigenvector)
            .derive(&m)
            .unwrap();
        assert_close(weights.as_slice(), &[0.6370, 0.2583, 0.1047], 1e-3);
    }

    #[test]
    fn power_iteration_reports_convergence() {
        let m = consistent_matrix(&[0.6, 0.4]);
        let derivation = PriorityDeriver::new(DerivationStrategy::power_iteration())
            .derive_detailed(&m)
            .unwrap();

        assert_eq!(derivation.converged, Some(true));
        assert!(derivation.iterations.unwrap() <= DEFAULT_POWER_MAX_ITERATIONS);
    }

    #[test]
    fn power_iteration_stops_at_iteration_cap() {
        let mut m = PairwiseMatrix::new(3);
        m.set(0, 1, 9.0).unwrap();
        m.set(1, 2, 9.0).unwrap();
        m.set(0, 2, 1.0 / 9.0).unwrap();

        let derivation = PriorityDeriver::new(DerivationStrategy::PowerIteration {
            tolerance: 0.0,
            max_iterations: 3,
        })
        .derive_detailed(&m)
        .unwrap();

        assert_eq!(derivation.iterations, Some(3));
        assert_eq!(derivation.converged, Some(false));
        let sum: f64 = derivation.weights.as_slice().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn weight_vector_normalizes_and_validates() {
        let w = WeightVector::normalized(vec![2.0, 6.0]).unwrap();
        assert_eq!(w.as_slice(), &[0.25, 0.75]);

        assert!(WeightVector::normalized(vec![0.0, 0.0]).is_err());
        assert!(WeightVector::normalized(vec![1.0, -1.0]).is_err());
        assert!(WeightVector::normalized(vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn strategy_serializes_with_kind_tag() {
        let json = serde_json::to_string(&DerivationStrategy::power_iteration()).unwrap();
        assert!(json.contains("\"kind\":\"power_iteration\""));
        assert!(json.contains("\"max_iterations\":100"));
    }
}
