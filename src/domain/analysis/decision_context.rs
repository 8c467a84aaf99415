//! Decision Context - Explicit per-session settings passed to every evaluation.
//!
//! The engine keeps no process-wide state. Each caller builds a context
//! (usually from `EngineConfig`) and passes it into the methods it runs.

use serde::{Deserialize, Serialize};

use super::{DegenerateColumnPolicy, DerivationStrategy, NormalizationEngine, PriorityDeriver};

/// What to do with a criterion whose judgments fail the consistency check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InconsistencyPolicy {
    /// Drop the criterion and renormalize the remaining weights.
    Exclude,
    /// Keep the criterion and attach a warning to the result.
    #[default]
    IncludeWithWarning,
    /// Fail the evaluation with `Inconsistent`.
    Reject,
}

/// Algorithms and policies in effect for one decision session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecisionContext {
    pub deriver: PriorityDeriver,
    pub normalizer: NormalizationEngine,
    pub inconsistency_policy: InconsistencyPolicy,
}

impl DecisionContext {
    /// Creates a context from its parts.
    pub fn new(
        strategy: DerivationStrategy,
        degenerate_column_policy: DegenerateColumnPolicy,
        inconsistency_policy: InconsistencyPolicy,
    ) -> Self {
        Self {
            deriver: PriorityDeriver::new(strategy),
            normalizer: NormalizationEngine::new(degenerate_column_policy),
            inconsistency_policy,
        }
    }

    /// Returns a copy with a different inconsistency policy.
    pub fn with_inconsistency_policy(mut self, policy: InconsistencyPolicy) -> Self {
        self.inconsistency_policy = policy;
        self
    }

    /// Returns a copy with a different derivation strategy.
    pub fn with_strategy(mut self, strategy: DerivationStrategy) -> Self {
        self.deriver = PriorityDeriver::new(strategy);
        self
    }

    /// Returns a copy with a different degenerate-column policy.
    pub fn with_degenerate_column_policy(mut self, policy: DegenerateColumnPolicy) -> Self {
        self.normalizer = NormalizationEngine::new(policy);
        self
    }
}
