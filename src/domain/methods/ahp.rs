//! Analytic Hierarchy Process session.
//!
//! Holds the pairwise judgments for one decision: a criteria matrix and one
//! alternatives matrix per criterion. Evaluation derives local priorities
//! for every matrix, checks their consistency, applies the context's
//! inconsistency policy and aggregates additively.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::domain::analysis::{
    renormalize, CalculationTrace, ConsistencyChecker, ConsistencyResult, DecisionContext,
    FinalRanking, InconsistencyPolicy, ItemSet, PairwiseMatrix, RankAggregator, WeightVector,
    CONSISTENCY_THRESHOLD,
};
use crate::domain::foundation::{AnalysisError, SessionId};

/// A comparison matrix plus the set of pairs that have been judged.
#[derive(Debug, Clone, PartialEq)]
struct ComparisonSheet {
    matrix: PairwiseMatrix,
    entered: BTreeSet<(usize, usize)>,
}

impl ComparisonSheet {
    fn new(size: usize) -> Self {
        Self {
            matrix: PairwiseMatrix::new(size),
            entered: BTreeSet::new(),
        }
    }

    fn record(&mut self, i: usize, j: usize, value: f64) -> Result<(), AnalysisError> {
        self.matrix.set(i, j, value)?;
        self.entered.insert((i.min(j), i.max(j)));
        Ok(())
    }

    fn required_pairs(&self) -> usize {
        let n = self.matrix.size();
        n * n.saturating_sub(1) / 2
    }

    fn missing_pairs(&self) -> usize {
        self.required_pairs() - self.entered.len()
    }
}

/// Local priorities of the alternatives under one criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionPriorities {
    pub criterion: String,
    pub comparisons: PairwiseMatrix,
    pub weights: WeightVector,
    pub consistency: ConsistencyResult,
    /// Dropped from aggregation under `InconsistencyPolicy::Exclude`.
    pub excluded: bool,
}

/// Result of an AHP evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AhpReport {
    pub session_id: SessionId,
    pub criteria: Vec<String>,
    pub criteria_comparisons: PairwiseMatrix,
    pub criteria_weights: WeightVector,
    pub criteria_consistency: ConsistencyResult,
    pub alternative_priorities: Vec<CriterionPriorities>,
    /// Criterion weights actually used, after exclusions and renormalization.
    pub applied_weights: Vec<f64>,
    pub ranking: FinalRanking,
    pub warnings: Vec<String>,
    pub trace: CalculationTrace,
}

impl AhpReport {
    /// Criteria dropped under `InconsistencyPolicy::Exclude`.
    pub fn excluded_criteria(&self) -> Vec<&str> {
        self.alternative_priorities
            .iter()
            .filter(|p| p.excluded)
            .map(|p| p.criterion.as_str())
            .collect()
    }
}

/// Judgments for one AHP decision.
#[derive(Debug, Clone, PartialEq)]
pub struct AhpSession {
    id: SessionId,
    criteria: ItemSet,
    alternatives: ItemSet,
    criteria_sheet: ComparisonSheet,
    alternative_sheets: Vec<ComparisonSheet>,
}

impl AhpSession {
    /// Starts a session with every comparison at 1 (equal importance).
    pub fn new(criteria: ItemSet, alternatives: ItemSet) -> Self {
        Self::with_id(SessionId::new(), criteria, alternatives)
    }

    pub fn with_id(id: SessionId, criteria: ItemSet, alternatives: ItemSet) -> Self {
        let criteria_sheet = ComparisonSheet::new(criteria.len());
        let alternative_sheets = (0..criteria.len())
            .map(|_| ComparisonSheet::new(alternatives.len()))
            .collect();
        Self {
            id,
            criteria,
            alternatives,
            criteria_sheet,
            alternative_sheets,
        }
    }

    /// Returns the session attributed to `id`, keeping its judgments.
    pub fn with_session_id(mut self, id: SessionId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn criteria(&self) -> &ItemSet {
        &self.criteria
    }

    pub fn alternatives(&self) -> &ItemSet {
        &self.alternatives
    }

    pub fn criteria_matrix(&self) -> &PairwiseMatrix {
        &self.criteria_sheet.matrix
    }

    /// Alternatives matrix under criterion `criterion`.
    pub fn alternative_matrix(&self, criterion: usize) -> Result<&PairwiseMatrix, AnalysisError> {
        self.alternative_sheets
            .get(criterion)
            .map(|sheet| &sheet.matrix)
            .ok_or_else(|| AnalysisError::out_of_range(criterion, self.criteria.len()))
    }

    /// Records how much more important criterion `i` is than criterion `j`.
    pub fn compare_criteria(&mut self, i: usize, j: usize, value: f64) -> Result<(), AnalysisError> {
        self.criteria.ensure_comparable()?;
        self.criteria_sheet.record(i, j, value)
    }

    pub fn compare_criteria_by_name(
        &mut self,
        row: &str,
        column: &str,
        value: f64,
    ) -> Result<(), AnalysisError> {
        let i = self.criteria.require_index(row)?;
        let j = self.criteria.require_index(column)?;
        self.compare_criteria(i, j, value)
    }

    /// Records how much alternative `i` is preferred to `j` under `criterion`.
    pub fn compare_alternatives(
        &mut self,
        criterion: usize,
        i: usize,
        j: usize,
        value: f64,
    ) -> Result<(), AnalysisError> {
        self.alternatives.ensure_comparable()?;
        let count = self.criteria.len();
        self.alternative_sheets
            .get_mut(criterion)
            .ok_or_else(|| AnalysisError::out_of_range(criterion, count))?
            .record(i, j, value)
    }

    pub fn compare_alternatives_by_name(
        &mut self,
        criterion: &str,
        row: &str,
        column: &str,
        value: f64,
    ) -> Result<(), AnalysisError> {
        let c = self.criteria.require_index(criterion)?;
        let i = self.alternatives.require_index(row)?;
        let j = self.alternatives.require_index(column)?;
        self.compare_alternatives(c, i, j, value)
    }

    /// Fails with `IncompleteInput` naming the first matrix with unjudged pairs.
    pub fn ensure_complete(&self) -> Result<(), AnalysisError> {
        let missing = self.criteria_sheet.missing_pairs();
        if missing > 0 {
            return Err(AnalysisError::incomplete(format!(
                "criteria comparisons are missing {} of {} pairs",
                missing,
                self.criteria_sheet.required_pairs()
            )));
        }
        for (name, sheet) in self.criteria.iter().zip(&self.alternative_sheets) {
            let missing = sheet.missing_pairs();
            if missing > 0 {
                return Err(AnalysisError::incomplete(format!(
                    "alternative comparisons under '{}' are missing {} of {} pairs",
                    name,
                    missing,
                    sheet.required_pairs()
                )));
            }
        }
        Ok(())
    }

    /// Derives, checks and aggregates all judgments into a ranking.
    ///
    /// # Errors
    /// - `IncompleteInput` when some pair was never judged
    /// - `Inconsistent` under `InconsistencyPolicy::Reject` when any matrix
    ///   exceeds the threshold, or when every criterion is excluded
    pub fn evaluate(&self, ctx: &DecisionContext) -> Result<AhpReport, AnalysisError> {
        self.ensure_complete()?;

        let mut trace = CalculationTrace::new();
        let mut warnings = Vec::new();
        let policy = ctx.inconsistency_policy;
        trace.record(format!(
            "Deriving priorities with {} strategy",
            ctx.deriver.strategy().label()
        ));

        let criteria_matrix = &self.criteria_sheet.matrix;
        let criteria_derivation = ctx.deriver.derive_detailed(criteria_matrix)?;
        if criteria_derivation.converged == Some(false) {
            warnings.push("power iteration did not converge for criteria".to_string());
        }
        let criteria_weights = criteria_derivation.weights;
        let criteria_consistency =
            ConsistencyChecker::evaluate_weights(criteria_matrix, &criteria_weights)?;
        trace.record(format!("Criteria weights: {:?}", criteria_weights.as_slice()));
        trace.record(format!(
            "Criteria consistency ratio: {:.4}",
            criteria_consistency.consistency_ratio
        ));

        if criteria_consistency.needs_revision() {
            let message = format!(
                "criteria comparisons are inconsistent (CR = {:.4} > {})",
                criteria_consistency.consistency_ratio, CONSISTENCY_THRESHOLD
            );
            if policy == InconsistencyPolicy::Reject {
                return Err(AnalysisError::inconsistent(message));
            }
            warn!(session_id = %self.id, "{}", message);
            warnings.push(message);
        }

        let mut alternative_priorities = Vec::with_capacity(self.criteria.len());
        for (name, sheet) in self.criteria.iter().zip(&self.alternative_sheets) {
            let derivation = ctx.deriver.derive_detailed(&sheet.matrix)?;
            if derivation.converged == Some(false) {
                warnings.push(format!("power iteration did not converge under '{}'", name));
            }
            let consistency = ConsistencyChecker::evaluate_weights(&sheet.matrix, &derivation.weights)?;
            trace.record(format!(
                "'{}': local priorities {:?}, CR {:.4}",
                name,
                derivation.weights.as_slice(),
                consistency.consistency_ratio
            ));

            let mut excluded = false;
            if consistency.needs_revision() {
                let message = format!(
                    "alternative comparisons under '{}' are inconsistent (CR = {:.4} > {})",
                    name, consistency.consistency_ratio, CONSISTENCY_THRESHOLD
                );
                match policy {
                    InconsistencyPolicy::Reject => return Err(AnalysisError::inconsistent(message)),
                    InconsistencyPolicy::Exclude => {
                        excluded = true;
                        warn!(session_id = %self.id, criterion = name, "Excluding inconsistent criterion");
                        warnings.push(format!("{}; criterion excluded", message));
                    }
                    InconsistencyPolicy::IncludeWithWarning => {
                        warn!(session_id = %self.id, "{}", message);
                        warnings.push(message);
                    }
                }
            }

            alternative_priorities.push(CriterionPriorities {
                criterion: name.to_string(),
                comparisons: sheet.matrix.clone(),
                weights: derivation.weights,
                consistency,
                excluded,
            });
        }

        let keep: Vec<bool> = alternative_priorities.iter().map(|p| !p.excluded).collect();
        let contributions: Vec<Vec<f64>> = alternative_priorities
            .iter()
            .map(|p| p.weights.as_slice().to_vec())
            .collect();
        let ranking = RankAggregator::aggregate_additive_subset(
            &self.alternatives,
            criteria_weights.as_slice(),
            &contributions,
            &keep,
        )?;

        let kept_weights: Vec<f64> = criteria_weights
            .as_slice()
            .iter()
            .zip(&keep)
            .map(|(w, k)| if *k { *w } else { 0.0 })
            .collect();
        let applied_weights = renormalize(&kept_weights)?;

        for entry in ranking.ranked() {
            trace.record(format!("{}. {}: {:.4}", entry.rank, entry.name, entry.score));
        }
        info!(
            session_id = %self.id,
            best = ranking.best().map(|r| r.name.as_str()).unwrap_or("tie"),
            warnings = warnings.len(),
            "AHP evaluation complete"
        );

        Ok(AhpReport {
            session_id: self.id,
            criteria: self.criteria.names().to_vec(),
            criteria_comparisons: criteria_matrix.clone(),
            criteria_weights,
            criteria_consistency,
            alternative_priorities,
            applied_weights,
            ranking,
            warnings,
            trace,
        })
    }
}
