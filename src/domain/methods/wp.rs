//! Weighted Product.
//!
//! `S_i = Π_j x_ij^(±w_j)` (positive exponent for benefit, negative for cost),
//! computed in the log domain. `V_i = S_i / Σ S` is the relative score and
//! drives the ranking.
//!
//! Zero values are guarded with `LOG_EPSILON`. A zero benefit value sinks an
//! alternative; a zero cost value counts as maximally favorable.

use serde::Serialize;

use super::PerformanceTable;
use crate::domain::analysis::{
    renormalize, CalculationTrace, CriteriaBlock, FinalRanking, RankAggregator,
};
use crate::domain::foundation::AnalysisError;

/// Result of a weighted-product evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedProductReport {
    pub weights: Vec<f64>,
    /// Preference `S` per alternative, in input order.
    pub preferences: Vec<f64>,
    /// Ranking by relative score `V`.
    pub ranking: FinalRanking,
    pub trace: CalculationTrace,
}

/// WP evaluator. Raw values are used directly; nothing is normalized.
pub struct WeightedProduct;

impl WeightedProduct {
    pub fn evaluate(table: &PerformanceTable) -> Result<WeightedProductReport, AnalysisError> {
        let mut trace = CalculationTrace::new();

        let weights = table.normalized_weights()?;
        trace.record(format!("Normalized criterion weights: {:?}", weights));

        let columns = table.split_by_orientation(&weights)?;
        let blocks: Vec<CriteriaBlock<'_>> = columns.iter().map(|c| c.as_block()).collect();
        let preferences = RankAggregator::multiplicative_scores(table.alternatives().len(), &blocks)?;
        for (name, s) in table.alternatives().iter().zip(&preferences) {
            trace.record(format!("S({}) = {:.6}", name, s));
        }

        let relative = renormalize(&preferences).map_err(|_| {
            AnalysisError::degenerate_scores("sum of preferences S is zero; V is undefined")
        })?;
        let ranking = FinalRanking::new(table.alternatives(), relative)?;
        for entry in ranking.ranked() {
            trace.record(format!("{}. {}: V = {:.4}", entry.rank, entry.name, entry.score));
        }

        Ok(WeightedProductReport {
            weights,
            preferences,
            ranking,
            trace,
        })
    }
}
