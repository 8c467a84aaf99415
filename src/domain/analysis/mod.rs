//! Analysis Module - The priority-derivation and aggregation engine.
//!
//! Pure, stateless services that turn pairwise judgments into weights,
//! measure how contradictory those judgments are, and combine weights with
//! alternative scores into a ranking.
//!
//! # Components
//!
//! - `PairwiseMatrix` - Reciprocal comparison matrix with atomic paired writes
//! - `PriorityDeriver` - Eigenvector / power-iteration / column-average weights
//! - `ConsistencyChecker` - Consistency Index and Ratio against Saaty's RI table
//! - `NormalizationEngine` - Benefit/cost rescaling and log-domain transforms
//! - `RankAggregator` - Additive and multiplicative aggregation into `FinalRanking`
//! - `RankingComputed` - Event published with every ranking
//!
//! # Data Flow
//!
//! judgments → `PairwiseMatrix` → `PriorityDeriver` → `WeightVector`
//! → `ConsistencyChecker` → `RankAggregator` → `FinalRanking`

mod calculation_trace;
mod comparison_value;
mod consistency_checker;
mod decision_context;
mod events;
mod item_set;
mod normalization_engine;
mod pairwise_matrix;
mod priority_deriver;
mod rank_aggregator;

pub mod operations;

pub use calculation_trace::CalculationTrace;
pub use comparison_value::{parse_comparison, validate_comparison, ComparisonInput};
pub use consistency_checker::{
    random_index, ConsistencyChecker, ConsistencyResult, CONSISTENCY_THRESHOLD, RANDOM_INDEX,
    RANDOM_INDEX_FALLBACK,
};
pub use decision_context::{DecisionContext, InconsistencyPolicy};
pub use events::{MethodKind, RankingComputed};
pub use item_set::ItemSet;
pub use normalization_engine::{
    DegenerateColumnPolicy, NormalizationEngine, Orientation, ScoreMatrix, ValueMatrix,
    LOG_EPSILON,
};
pub use pairwise_matrix::PairwiseMatrix;
pub use priority_deriver::{
    Derivation, DerivationStrategy, PriorityDeriver, WeightVector, DEFAULT_POWER_MAX_ITERATIONS,
    DEFAULT_POWER_TOLERANCE,
};
pub use rank_aggregator::{
    renormalize, CriteriaBlock, FinalRanking, RankAggregator, RankedAlternative, TIE_RESOLUTION,
};
