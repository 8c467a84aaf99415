//! Application layer - Problem files, commands and handlers.
//!
//! This layer turns decision problems into domain calls and wraps the
//! results with the events they produce.

pub mod handlers;
pub mod problem;

pub use handlers::{
    DecisionReport, EvaluateDecisionCommand, EvaluateDecisionHandler, EvaluateDecisionResult,
};
pub use problem::{AhpProblem, ComparisonEntry, DecisionProblem, ProblemError, TableProblem};
