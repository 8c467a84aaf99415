//! Normalization Engine - Rescales raw alternative values into comparable scores.
//!
//! # Conventions
//!
//! - Benefit columns: `score = value / column_max` (best maps to 1)
//! - Cost columns: `score = column_min / value` (cheapest maps to 1)
//! - Log domain (weighted product): `±weight × ln(value + ε)`, positive for
//!   benefit and negative for cost
//!
//! In the log domain a zero cost value becomes `-w × ln(ε)`, a very large
//! contribution: a zero cost counts as maximally favorable and dominates
//! the product.
//!
//! A zero column max (benefit) or zero column min (cost) has no defined
//! ratio. What happens then is chosen by [`DegenerateColumnPolicy`] and is
//! applied identically by every method that normalizes.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::foundation::AnalysisError;

/// Guard added before taking logarithms so that `ln(0)` stays finite.
pub const LOG_EPSILON: f64 = 1e-10;

/// Whether higher or lower raw values are preferable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Higher is better.
    Benefit,
    /// Lower is better.
    Cost,
}

impl Orientation {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Benefit => "benefit",
            Orientation::Cost => "cost",
        }
    }

    /// Exponent sign in the weighted product.
    pub fn exponent_sign(&self) -> f64 {
        match self {
            Orientation::Benefit => 1.0,
            Orientation::Cost => -1.0,
        }
    }
}

/// Handling of columns whose normalization factor is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateColumnPolicy {
    /// Fail with `DegenerateColumn`.
    #[default]
    Reject,
    /// Score every entry in the column 1.0 (maximally favorable).
    TreatAsFavorable,
}

/// Raw performance values: one row per alternative, one column per criterion.
///
/// Values are finite and non-negative. The matrix is rectangular with at
/// least one row and one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct ValueMatrix {
    rows: Vec<Vec<f64>>,
    columns: usize,
}

impl ValueMatrix {
    /// Creates a value matrix from rows.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, AnalysisError> {
        let columns = rows
            .first()
            .map(Vec::len)
            .ok_or_else(|| AnalysisError::incomplete("value matrix has no rows"))?;
        if columns == 0 {
            return Err(AnalysisError::incomplete("value matrix has no columns"));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(AnalysisError::dimension_mismatch(
                    format!("value matrix row {}", i),
                    columns,
                    row.len(),
                ));
            }
            if let Some(value) = row.iter().find(|v| !v.is_finite() || **v < 0.0) {
                return Err(AnalysisError::invalid_value(
                    format!("value matrix row {}", i),
                    format!("values must be finite and non-negative, got {}", value),
                ));
            }
        }

        Ok(Self { rows, columns })
    }

    /// Number of alternatives (rows).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of criteria (columns).
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Returns `value[i][j]`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.rows.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Returns column `j` as an owned vector.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[j]).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for ValueMatrix {
    type Error = AnalysisError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        ValueMatrix::new(rows)
    }
}

impl From<ValueMatrix> for Vec<Vec<f64>> {
    fn from(matrix: ValueMatrix) -> Self {
        matrix.rows
    }
}

/// Normalized scores with the same shape as the source `ValueMatrix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMatrix {
    rows: Vec<Vec<f64>>,
}

impl ScoreMatrix {
    /// Returns the rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Returns column `j` as an owned vector.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[j]).collect()
    }

    /// Returns `score[i][j]`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.rows.get(i).and_then(|row| row.get(j)).copied()
    }
}

/// Normalizes value matrices under a fixed degenerate-column policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationEngine {
    policy: DegenerateColumnPolicy,
}

impl NormalizationEngine {
    /// Creates an engine applying `policy` to degenerate columns.
    pub fn new(policy: DegenerateColumnPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in effect.
    pub fn policy(&self) -> DegenerateColumnPolicy {
        self.policy
    }

    /// Normalizes every column according to `orientation`.
    pub fn normalize(
        &self,
        values: &ValueMatrix,
        orientation: Orientation,
    ) -> Result<ScoreMatrix, AnalysisError> {
        let orientations = vec![orientation; values.column_count()];
        self.normalize_mixed(values, &orientations)
    }

    /// `score[i][j] = value[i][j] / max_i value[i][j]`.
    pub fn normalize_benefit(&self, values: &ValueMatrix) -> Result<ScoreMatrix, AnalysisError> {
        self.normalize(values, Orientation::Benefit)
    }

    /// `score[i][j] = min_i value[i][j] / value[i][j]`.
    pub fn normalize_cost(&self, values: &ValueMatrix) -> Result<ScoreMatrix, AnalysisError> {
        self.normalize(values, Orientation::Cost)
    }

    /// Normalizes column j according to `orientations[j]`.
    ///
    /// Used when benefit and cost criteria share one table; degenerate
    /// column errors report the column's position in `values`.
    pub fn normalize_mixed(
        &self,
        values: &ValueMatrix,
        orientations: &[Orientation],
    ) -> Result<ScoreMatrix, AnalysisError> {
        if orientations.len() != values.column_count() {
            return Err(AnalysisError::dimension_mismatch(
                "column orientations",
                values.column_count(),
                orientations.len(),
            ));
        }

        let rows = values.row_count();
        let mut scores = vec![vec![0.0; values.column_count()]; rows];

        for (j, orientation) in orientations.iter().enumerate() {
            let column = values.column(j);
            let rescaled = match rescale_column(&column, *orientation) {
                Some(rescaled) => rescaled,
                None => self.degenerate(j, *orientation, rows)?,
            };
            for (i, score) in rescaled.into_iter().enumerate() {
                scores[i][j] = score;
            }
        }

        debug!(rows, columns = values.column_count(), "Normalized value matrix");

        Ok(ScoreMatrix { rows: scores })
    }

    fn degenerate(
        &self,
        column: usize,
        orientation: Orientation,
        rows: usize,
    ) -> Result<Vec<f64>, AnalysisError> {
        let factor = match orientation {
            Orientation::Benefit => "maximum",
            Orientation::Cost => "minimum",
        };
        match self.policy {
            DegenerateColumnPolicy::Reject => Err(AnalysisError::degenerate_column(
                column,
                format!("{} column {} is zero", orientation.label(), factor),
            )),
            DegenerateColumnPolicy::TreatAsFavorable => {
                warn!(
                    column,
                    orientation = orientation.label(),
                    "Zero normalization factor; scoring whole column as 1.0"
                );
                Ok(vec![1.0; rows])
            }
        }
    }

    /// Per-row weighted log contributions for the weighted product.
    ///
    /// Row i yields `Σ_j sign × weight[j] × ln(value[i][j] + LOG_EPSILON)`,
    /// where `sign` is +1 for benefit and -1 for cost. Exponentiating the sum
    /// of these contributions across all blocks gives `Π x^(±w)`.
    pub fn log_contributions(
        values: &ValueMatrix,
        orientation: Orientation,
        weights: &[f64],
    ) -> Result<Vec<f64>, AnalysisError> {
        if weights.len() != values.column_count() {
            return Err(AnalysisError::dimension_mismatch(
                "criterion weights",
                values.column_count(),
                weights.len(),
            ));
        }
        let sign = orientation.exponent_sign();

        Ok(values
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .zip(weights)
                    .map(|(value, weight)| sign * weight * (value + LOG_EPSILON).ln())
                    .sum()
            })
            .collect())
    }
}

/// Rescales one column, or None when its normalization factor is zero.
fn rescale_column(column: &[f64], orientation: Orientation) -> Option<Vec<f64>> {
    match orientation {
        Orientation::Benefit => {
            let max = column.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            if max == 0.0 {
                return None;
            }
            Some(column.iter().map(|v| v / max).collect())
        }
        Orientation::Cost => {
            let min = column.iter().cloned().fold(f64::INFINITY, f64::min);
            if min == 0.0 {
                return None;
            }
            Some(column.iter().map(|v| min / v).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> ValueMatrix {
        ValueMatrix::new(rows).unwrap()
    }

    #[test]
    fn benefit_divides_by_column_max() {
        let values = matrix(vec![vec![10.0, 3.0], vec![20.0, 6.0]]);
        let scores = NormalizationEngine::default().normalize_benefit(&values).unwrap();

        assert_eq!(scores.rows(), &[vec![0.5, 0.5], vec![1.0, 1.0]]);
    }

    #[test]
    fn cost_maps_minimum_to_one() {
        let values = matrix(vec![vec![200.0], vec![100.0], vec![400.0]]);
        let scores = NormalizationEngine::default().normalize_cost(&values).unwrap();

        assert_eq!(scores.column(0), vec![0.5, 1.0, 0.25]);
    }

    #[test]
    fn normalize_dispatches_on_orientation() {
        let values = matrix(vec![vec![1.0], vec![4.0]]);
        let engine = NormalizationEngine::default();

        assert_eq!(
            engine.normalize(&values, Orientation::Benefit).unwrap().column(0),
            vec![0.25, 1.0]
        );
        assert_eq!(
            engine.normalize(&values, Orientation::Cost).unwrap().column(0),
            vec![1.0, 0.25]
        );
    }

    #[test]
    fn already_normalized_benefit_column_is_unchanged() {
        let values = matrix(vec![vec![0.5], vec![1.0], vec![0.2]]);
        let scores = NormalizationEngine::default().normalize_benefit(&values).unwrap();
        assert_eq!(scores.column(0), vec![0.5, 1.0, 0.2]);
    }

    #[test]
    fn zero_benefit_max_is_rejected_by_default() {
        let values = matrix(vec![vec![1.0, 0.0], vec![2.0, 0.0]]);
        let err = NormalizationEngine::default().normalize_benefit(&values).unwrap_err();

        assert!(matches!(err, AnalysisError::DegenerateColumn { column: 1, .. }));
    }

    #[test]
    fn zero_cost_min_is_rejected_by_default() {
        let values = matrix(vec![vec![0.0], vec![5.0]]);
        let err = NormalizationEngine::default().normalize_cost(&values).unwrap_err();

        assert!(matches!(err, AnalysisError::DegenerateColumn { column: 0, .. }));
    }

    #[test]
    fn favorable_policy_scores_degenerate_column_as_one() {
        let engine = NormalizationEngine::new(DegenerateColumnPolicy::TreatAsFavorable);

        let benefit = matrix(vec![vec![0.0, 2.0], vec![0.0, 4.0]]);
        let scores = engine.normalize_benefit(&benefit).unwrap();
        assert_eq!(scores.rows(), &[vec![1.0, 0.5], vec![1.0, 1.0]]);

        let cost = matrix(vec![vec![0.0], vec![5.0]]);
        assert_eq!(engine.normalize_cost(&cost).unwrap().column(0), vec![1.0, 1.0]);
    }

    #[test]
    fn mixed_orientations_normalize_per_column() {
        let values = matrix(vec![vec![10.0, 300.0], vec![5.0, 150.0]]);
        let scores = NormalizationEngine::default()
            .normalize_mixed(&values, &[Orientation::Benefit, Orientation::Cost])
            .unwrap();

        assert_eq!(scores.rows(), &[vec![1.0, 0.5], vec![0.5, 1.0]]);
    }

    #[test]
    fn mixed_orientations_report_original_column_index() {
        let values = matrix(vec![vec![1.0, 0.0], vec![2.0, 3.0]]);
        let err = NormalizationEngine::default()
            .normalize_mixed(&values, &[Orientation::Benefit, Orientation::Cost])
            .unwrap_err();

        assert!(matches!(err, AnalysisError::DegenerateColumn { column: 1, .. }));
    }

    #[test]
    fn value_matrix_validates_shape_and_values() {
        assert!(ValueMatrix::new(vec![]).is_err());
        assert!(ValueMatrix::new(vec![vec![]]).is_err());
        assert!(matches!(
            ValueMatrix::new(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(AnalysisError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            ValueMatrix::new(vec![vec![-1.0]]),
            Err(AnalysisError::InvalidValue { .. })
        ));
        assert!(ValueMatrix::new(vec![vec![f64::NAN]]).is_err());
    }

    #[test]
    fn log_contributions_apply_signed_weights() {
        let values = matrix(vec![vec![4.0, 9.0]]);
        let benefit = NormalizationEngine::log_contributions(&values, Orientation::Benefit, &[0.5, 0.5])
            .unwrap();
        // sqrt(4) * sqrt(9) = 6
        assert!((benefit[0].exp() - 6.0).abs() < 1e-6);

        let cost = NormalizationEngine::log_contributions(&values, Orientation::Cost, &[0.5, 0.5])
            .unwrap();
        assert!((cost[0].exp() - 1.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn log_contributions_guard_zero_values() {
        let values = matrix(vec![vec![0.0]]);
        let logs = NormalizationEngine::log_contributions(&values, Orientation::Benefit, &[1.0])
            .unwrap();
        assert!(logs[0].is_finite());
    }

    #[test]
    fn log_contributions_check_weight_count() {
        let values = matrix(vec![vec![1.0, 2.0]]);
        assert!(NormalizationEngine::log_contributions(&values, Orientation::Cost, &[1.0]).is_err());
    }
}
