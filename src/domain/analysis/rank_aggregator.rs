//! Rank Aggregator - Combines criterion weights with per-alternative scores.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::{ItemSet, NormalizationEngine, Orientation, ValueMatrix};
use crate::domain::foundation::AnalysisError;

/// Relative tolerance under which two scores are ties and keep their input order.
pub const TIE_RESOLUTION: f64 = 1e-9;

/// One alternative's position in the final ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    /// 1-based rank.
    pub rank: usize,
    pub name: String,
    pub score: f64,
}

/// Immutable outcome of one aggregation run.
///
/// Exposes both the scores in input order (for tables keyed by name) and
/// the descending order (for numbered rankings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalRanking {
    alternatives: Vec<String>,
    scores: Vec<f64>,
    ranked: Vec<RankedAlternative>,
}

impl FinalRanking {
    /// Builds a ranking by stable descending sort on `scores`.
    pub fn new(alternatives: &ItemSet, scores: Vec<f64>) -> Result<Self, AnalysisError> {
        if scores.len() != alternatives.len() {
            return Err(AnalysisError::dimension_mismatch(
                "alternative scores",
                alternatives.len(),
                scores.len(),
            ));
        }
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(AnalysisError::degenerate_scores("scores must be finite"));
        }

        let order = descending_order(&scores);

        let ranked = order
            .iter()
            .enumerate()
            .map(|(position, &index)| RankedAlternative {
                rank: position + 1,
                name: alternatives.names()[index].clone(),
                score: scores[index],
            })
            .collect();

        Ok(Self {
            alternatives: alternatives.names().to_vec(),
            scores,
            ranked,
        })
    }

    /// Scores in original alternative order.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Alternative names in original input order.
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// Alternatives ordered best first.
    pub fn ranked(&self) -> &[RankedAlternative] {
        &self.ranked
    }

    /// Score for `name`.
    pub fn score_of(&self, name: &str) -> Option<f64> {
        self.alternatives
            .iter()
            .position(|n| n == name)
            .map(|i| self.scores[i])
    }

    /// Unordered name → score mapping.
    pub fn score_map(&self) -> HashMap<String, f64> {
        self.alternatives
            .iter()
            .cloned()
            .zip(self.scores.iter().copied())
            .collect()
    }

    /// Names ordered best first.
    pub fn order(&self) -> Vec<&str> {
        self.ranked.iter().map(|r| r.name.as_str()).collect()
    }

    /// The top alternative, or None if the top two scores tie.
    pub fn best(&self) -> Option<&RankedAlternative> {
        let first = self.ranked.first()?;
        match self.ranked.get(1) {
            Some(second) if is_tie(first.score, second.score) => None,
            _ => Some(first),
        }
    }
}

/// True when `a` and `b` differ by no more than `TIE_RESOLUTION` of the larger magnitude.
fn is_tie(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIE_RESOLUTION * a.abs().max(b.abs())
}

/// Indices sorted by descending score, with tied runs in input order.
///
/// The exact sort runs first, then each run of scores within tolerance of
/// its leading score is reordered by index.
fn descending_order(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut start = 0;
    while start < order.len() {
        let leader = scores[order[start]];
        let mut end = start + 1;
        while end < order.len() && is_tie(leader, scores[order[end]]) {
            end += 1;
        }
        order[start..end].sort_unstable();
        start = end;
    }
    order
}

/// A block of criteria sharing one orientation, for the weighted product.
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaBlock<'a> {
    pub orientation: Orientation,
    /// One weight per column of `values`.
    pub weights: &'a [f64],
    pub values: &'a ValueMatrix,
}

/// Aggregation of weights and contributions into a `FinalRanking`.
pub struct RankAggregator;

impl RankAggregator {
    /// Additive aggregation: `score[alt] = Σ_c weight[c] × contribution[c][alt]`.
    ///
    /// `contributions[c]` is the per-alternative vector for criterion `c`:
    /// an alternative weight vector (AHP) or a normalized score column (SAW).
    ///
    /// # Errors
    /// - `DimensionMismatch` when counts disagree
    /// - `IncompleteInput` when there are no criteria
    pub fn aggregate_additive(
        alternatives: &ItemSet,
        criteria_weights: &[f64],
        contributions: &[Vec<f64>],
    ) -> Result<FinalRanking, AnalysisError> {
        let scores = Self::additive_scores(alternatives.len(), criteria_weights, contributions)?;
        debug!(criteria = criteria_weights.len(), scores = ?scores, "Additive aggregation");
        FinalRanking::new(alternatives, scores)
    }

    /// Additive aggregation over the criteria that are kept.
    ///
    /// The kept weights are renormalized to sum to 1 before aggregation.
    ///
    /// # Errors
    /// - `Inconsistent` when nothing is kept
    /// - `DegenerateScores` when the kept weights sum to zero
    pub fn aggregate_additive_subset(
        alternatives: &ItemSet,
        criteria_weights: &[f64],
        contributions: &[Vec<f64>],
        keep: &[bool],
    ) -> Result<FinalRanking, AnalysisError> {
        if keep.len() != criteria_weights.len() {
            return Err(AnalysisError::dimension_mismatch(
                "criteria mask",
                criteria_weights.len(),
                keep.len(),
            ));
        }
        if contributions.len() != criteria_weights.len() {
            return Err(AnalysisError::dimension_mismatch(
                "contributions",
                criteria_weights.len(),
                contributions.len(),
            ));
        }
        if !keep.iter().any(|k| *k) {
            return Err(AnalysisError::inconsistent(
                "every criterion was excluded; nothing left to aggregate",
            ));
        }

        let kept_weights: Vec<f64> = criteria_weights
            .iter()
            .zip(keep)
            .filter(|(_, k)| **k)
            .map(|(w, _)| *w)
            .collect();
        let kept_contributions: Vec<Vec<f64>> = contributions
            .iter()
            .zip(keep)
            .filter(|(_, k)| **k)
            .map(|(c, _)| c.clone())
            .collect();

        let renormalized = renormalize(&kept_weights)?;
        Self::aggregate_additive(alternatives, &renormalized, &kept_contributions)
    }

    /// Multiplicative aggregation: `score[alt] = Π_c value[c][alt]^(±weight[c])`.
    ///
    /// Computed in the log domain; see [`NormalizationEngine::log_contributions`].
    pub fn aggregate_multiplicative(
        alternatives: &ItemSet,
        blocks: &[CriteriaBlock<'_>],
    ) -> Result<FinalRanking, AnalysisError> {
        let scores = Self::multiplicative_scores(alternatives.len(), blocks)?;
        debug!(blocks = blocks.len(), scores = ?scores, "Multiplicative aggregation");
        FinalRanking::new(alternatives, scores)
    }

    pub(crate) fn additive_scores(
        alternative_count: usize,
        criteria_weights: &[f64],
        contributions: &[Vec<f64>],
    ) -> Result<Vec<f64>, AnalysisError> {
        if criteria_weights.is_empty() {
            return Err(AnalysisError::incomplete("no criteria to aggregate"));
        }
        if contributions.len() != criteria_weights.len() {
            return Err(AnalysisError::dimension_mismatch(
                "contributions",
                criteria_weights.len(),
                contributions.len(),
            ));
        }

        let mut scores = vec![0.0; alternative_count];
        for (weight, contribution) in criteria_weights.iter().zip(contributions) {
            if contribution.len() != alternative_count {
                return Err(AnalysisError::dimension_mismatch(
                    "alternative contributions",
                    alternative_count,
                    contribution.len(),
                ));
            }
            for (score, value) in scores.iter_mut().zip(contribution) {
                *score += weight * value;
            }
        }
        Ok(scores)
    }

    pub(crate) fn multiplicative_scores(
        alternative_count: usize,
        blocks: &[CriteriaBlock<'_>],
    ) -> Result<Vec<f64>, AnalysisError> {
        if blocks.is_empty() {
            return Err(AnalysisError::incomplete("no criteria to aggregate"));
        }

        let mut log_scores = vec![0.0; alternative_count];
        for block in blocks {
            if block.values.row_count() != alternative_count {
                return Err(AnalysisError::dimension_mismatch(
                    format!("{} value matrix rows", block.orientation.label()),
                    alternative_count,
                    block.values.row_count(),
                ));
            }
            let logs =
                NormalizationEngine::log_contributions(block.values, block.orientation, block.weights)?;
            for (total, log) in log_scores.iter_mut().zip(logs) {
                *total += log;
            }
        }

        Ok(log_scores.into_iter().map(f64::exp).collect())
    }
}

/// Rescales non-negative weights to sum to 1.
pub fn renormalize(weights: &[f64]) -> Result<Vec<f64>, AnalysisError> {
    let total: f64 = weights.iter().sum();
    if total.is_nan() || total <= 0.0 || total.is_infinite() {
        return Err(AnalysisError::degenerate_scores("weights sum to zero"));
    }
    Ok(weights.iter().map(|w| w / total).collect())
}
