//! Simple Additive Weighting.
//!
//! Benefit columns are divided by their maximum, cost columns map their
//! minimum to 1, and each alternative scores `Σ w_j × r_ij`.

use serde::Serialize;

use super::PerformanceTable;
use crate::domain::analysis::{
    CalculationTrace, DecisionContext, FinalRanking, RankAggregator, ScoreMatrix,
};
use crate::domain::foundation::AnalysisError;

/// Result of a SAW evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SawReport {
    pub weights: Vec<f64>,
    pub normalized: ScoreMatrix,
    pub ranking: FinalRanking,
    pub trace: CalculationTrace,
}

/// SAW evaluator.
pub struct SawMethod;

impl SawMethod {
    pub fn evaluate(
        table: &PerformanceTable,
        ctx: &DecisionContext,
    ) -> Result<SawReport, AnalysisError> {
        let mut trace = CalculationTrace::new();

        let weights = table.normalized_weights()?;
        trace.record(format!("Normalized criterion weights: {:?}", weights));

        let normalized = ctx
            .normalizer
            .normalize_mixed(table.values(), &table.orientations())?;
        trace.record("Normalized decision matrix (benefit: x/max, cost: min/x)");

        let contributions: Vec<Vec<f64>> = (0..normalized.column_count())
            .map(|j| normalized.column(j))
            .collect();
        let ranking =
            RankAggregator::aggregate_additive(table.alternatives(), &weights, &contributions)?;
        for entry in ranking.ranked() {
            trace.record(format!("{}. {}: {:.4}", entry.rank, entry.name, entry.score));
        }

        Ok(SawReport {
            weights,
            normalized,
            ranking,
            trace,
        })
    }
}
