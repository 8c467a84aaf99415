//! Engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analysis::{
    DecisionContext, DegenerateColumnPolicy, DerivationStrategy, InconsistencyPolicy,
    DEFAULT_POWER_MAX_ITERATIONS, DEFAULT_POWER_TOLERANCE,
};

/// Priority derivation algorithm, as named in configuration
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Eigenvector,
    PowerIteration,
    ColumnAverage,
}

/// Algorithms and policies applied to every evaluation
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Priority derivation algorithm
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Convergence tolerance for power iteration
    #[serde(default = "default_power_tolerance")]
    pub power_tolerance: f64,

    /// Iteration cap for power iteration
    #[serde(default = "default_power_max_iterations")]
    pub power_max_iterations: usize,

    /// Handling of criteria whose judgments are inconsistent
    #[serde(default)]
    pub inconsistency_policy: InconsistencyPolicy,

    /// Handling of columns with a zero normalization factor
    #[serde(default)]
    pub degenerate_column_policy: DegenerateColumnPolicy,
}

impl EngineConfig {
    /// Resolve the configured strategy with its parameters
    pub fn strategy(&self) -> DerivationStrategy {
        match self.strategy {
            StrategyKind::Eigenvector => DerivationStrategy::Eigenvector,
            StrategyKind::PowerIteration => DerivationStrategy::PowerIteration {
                tolerance: self.power_tolerance,
                max_iterations: self.power_max_iterations,
            },
            StrategyKind::ColumnAverage => DerivationStrategy::ColumnAverage,
        }
    }

    /// Build the decision context passed to every method
    pub fn context(&self) -> DecisionContext {
        DecisionContext::new(
            self.strategy(),
            self.degenerate_column_policy,
            self.inconsistency_policy,
        )
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.power_tolerance.is_finite() || self.power_tolerance <= 0.0 {
            return Err(ValidationError::InvalidPowerTolerance(self.power_tolerance));
        }
        if self.power_max_iterations == 0 {
            return Err(ValidationError::InvalidIterationLimit);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            power_tolerance: default_power_tolerance(),
            power_max_iterations: default_power_max_iterations(),
            inconsistency_policy: InconsistencyPolicy::default(),
            degenerate_column_policy: DegenerateColumnPolicy::default(),
        }
    }
}

fn default_power_tolerance() -> f64 {
    DEFAULT_POWER_TOLERANCE
}

fn default_power_max_iterations() -> usize {
    DEFAULT_POWER_MAX_ITERATIONS
}
