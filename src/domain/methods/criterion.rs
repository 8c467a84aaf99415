//! Criteria and the performance table shared by SAW, WP and MAUT.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{CriteriaBlock, ItemSet, Orientation, ValueMatrix};
use crate::domain::foundation::AnalysisError;

/// A criterion with a direction of preference and a raw importance weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub orientation: Orientation,
    /// Raw user-entered weight; must be positive.
    pub weight: f64,
}

impl Criterion {
    /// A higher-is-better criterion.
    pub fn benefit(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            orientation: Orientation::Benefit,
            weight,
        }
    }

    /// A lower-is-better criterion.
    pub fn cost(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            orientation: Orientation::Cost,
            weight,
        }
    }
}

/// Alternatives × criteria table of raw values.
///
/// Row i holds alternative i, column j holds criterion j.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceTable {
    alternatives: ItemSet,
    criteria: Vec<Criterion>,
    values: ValueMatrix,
}

impl PerformanceTable {
    /// Builds a table, validating names, weights and shape.
    ///
    /// # Errors
    /// - `InvalidItemSet` for empty or duplicate criterion names
    /// - `InvalidValue` for a weight that is not finite and positive
    /// - `DimensionMismatch` when the value matrix shape disagrees
    pub fn new(
        alternatives: ItemSet,
        criteria: Vec<Criterion>,
        values: ValueMatrix,
    ) -> Result<Self, AnalysisError> {
        ItemSet::new(criteria.iter().map(|c| c.name.clone()).collect::<Vec<_>>())?;

        if let Some(criterion) = criteria
            .iter()
            .find(|c| !c.weight.is_finite() || c.weight <= 0.0)
        {
            return Err(AnalysisError::invalid_value(
                format!("weight of '{}'", criterion.name),
                format!("must be positive, got {}", criterion.weight),
            ));
        }
        if values.row_count() != alternatives.len() {
            return Err(AnalysisError::dimension_mismatch(
                "value matrix rows",
                alternatives.len(),
                values.row_count(),
            ));
        }
        if values.column_count() != criteria.len() {
            return Err(AnalysisError::dimension_mismatch(
                "value matrix columns",
                criteria.len(),
                values.column_count(),
            ));
        }

        Ok(Self {
            alternatives,
            criteria,
            values,
        })
    }

    pub fn alternatives(&self) -> &ItemSet {
        &self.alternatives
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn values(&self) -> &ValueMatrix {
        &self.values
    }

    /// Orientation of every column, in criterion order.
    pub fn orientations(&self) -> Vec<Orientation> {
        self.criteria.iter().map(|c| c.orientation).collect()
    }

    /// Raw weights rescaled to sum to 1.
    pub fn normalized_weights(&self) -> Result<Vec<f64>, AnalysisError> {
        let total: f64 = self.criteria.iter().map(|c| c.weight).sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(AnalysisError::invalid_value(
                "criterion weights",
                format!("total must be positive, got {}", total),
            ));
        }
        Ok(self.criteria.iter().map(|c| c.weight / total).collect())
    }

    /// Splits the table into one value matrix per orientation.
    ///
    /// Orientations with no criteria are omitted. `weights` is indexed by
    /// criterion and is split alongside the columns.
    pub fn split_by_orientation(
        &self,
        weights: &[f64],
    ) -> Result<Vec<OrientedColumns>, AnalysisError> {
        if weights.len() != self.criteria.len() {
            return Err(AnalysisError::dimension_mismatch(
                "criterion weights",
                self.criteria.len(),
                weights.len(),
            ));
        }

        let mut blocks = Vec::new();
        for orientation in [Orientation::Benefit, Orientation::Cost] {
            let columns: Vec<usize> = self
                .criteria
                .iter()
                .enumerate()
                .filter(|(_, c)| c.orientation == orientation)
                .map(|(j, _)| j)
                .collect();
            if columns.is_empty() {
                continue;
            }

            let rows = self
                .values
                .rows()
                .iter()
                .map(|row| columns.iter().map(|&j| row[j]).collect())
                .collect();
            blocks.push(OrientedColumns {
                orientation,
                weights: columns.iter().map(|&j| weights[j]).collect(),
                values: ValueMatrix::new(rows)?,
            });
        }
        Ok(blocks)
    }
}

/// The columns of a table that share one orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedColumns {
    pub orientation: Orientation,
    pub weights: Vec<f64>,
    pub values: ValueMatrix,
}

impl OrientedColumns {
    /// Borrowed view for the multiplicative aggregator.
    pub fn as_block(&self) -> CriteriaBlock<'_> {
        CriteriaBlock {
            orientation: self.orientation,
            weights: &self.weights,
            values: &self.values,
        }
    }
}
