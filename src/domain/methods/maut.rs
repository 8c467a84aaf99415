//! Multi-Attribute Utility Theory with linear utilities.

use serde::Serialize;

use super::PerformanceTable;
use crate::domain::analysis::{
    renormalize, CalculationTrace, DecisionContext, FinalRanking, RankAggregator, ScoreMatrix,
};
use crate::domain::foundation::AnalysisError;

/// Result of a MAUT evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MautReport {
    pub weights: Vec<f64>,
    pub utilities: ScoreMatrix,
    /// Weighted utility `S` per alternative, in input order.
    pub utility_scores: Vec<f64>,
    /// Ranking by relative score `V = S / Σ S`.
    pub ranking: FinalRanking,
    pub trace: CalculationTrace,
}

/// MAUT evaluator.
pub struct MautMethod;

impl MautMethod {
    /// Utilities use the same max/min rescaling as SAW, under the context's
    /// degenerate-column policy.
    pub fn evaluate(
        table: &PerformanceTable,
        ctx: &DecisionContext,
    ) -> Result<MautReport, AnalysisError> {
        let mut trace = CalculationTrace::new();

        let weights = table.normalized_weights()?;
        trace.record(format!("Normalized criterion weights: {:?}", weights));

        let utilities = ctx
            .normalizer
            .normalize_mixed(table.values(), &table.orientations())?;
        trace.record("Computed utility matrix");

        let contributions: Vec<Vec<f64>> = (0..utilities.column_count())
            .map(|j| utilities.column(j))
            .collect();
        let utility_scores =
            RankAggregator::additive_scores(table.alternatives().len(), &weights, &contributions)?;
        for (name, s) in table.alternatives().iter().zip(&utility_scores) {
            trace.record(format!("S({}) = {:.6}", name, s));
        }

        let relative = renormalize(&utility_scores).map_err(|_| {
            AnalysisError::degenerate_scores("sum of utilities S is zero; V is undefined")
        })?;
        let ranking = FinalRanking::new(table.alternatives(), relative)?;
        for entry in ranking.ranked() {
            trace.record(format!("{}. {}: V = {:.4}", entry.rank, entry.name, entry.score));
        }

        Ok(MautReport {
            weights,
            utilities,
            utility_scores,
            ranking,
            trace,
        })
    }
}
