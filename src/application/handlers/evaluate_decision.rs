//! EvaluateDecisionHandler - Command handler that runs a decision method.

use serde::Serialize;
use tracing::{info, warn};

use crate::application::problem::DecisionProblem;
use crate::domain::analysis::{DecisionContext, FinalRanking, MethodKind, RankingComputed};
use crate::domain::foundation::{AnalysisError, DomainEvent, SessionId};
use crate::domain::methods::{
    AhpReport, MautMethod, MautReport, SawMethod, SawReport, WeightedProduct,
    WeightedProductReport,
};

/// Command to evaluate one decision problem.
#[derive(Debug, Clone)]
pub struct EvaluateDecisionCommand {
    pub problem: DecisionProblem,
    /// Session to attribute the ranking to; a new one is created if absent.
    pub session_id: Option<SessionId>,
}

/// Method-specific report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DecisionReport {
    Ahp(AhpReport),
    Saw(SawReport),
    Wp(WeightedProductReport),
    Maut(MautReport),
}

impl DecisionReport {
    pub fn method(&self) -> MethodKind {
        match self {
            DecisionReport::Ahp(_) => MethodKind::Ahp,
            DecisionReport::Saw(_) => MethodKind::Saw,
            DecisionReport::Wp(_) => MethodKind::Wp,
            DecisionReport::Maut(_) => MethodKind::Maut,
        }
    }

    pub fn ranking(&self) -> &FinalRanking {
        match self {
            DecisionReport::Ahp(r) => &r.ranking,
            DecisionReport::Saw(r) => &r.ranking,
            DecisionReport::Wp(r) => &r.ranking,
            DecisionReport::Maut(r) => &r.ranking,
        }
    }

    /// Consistency and convergence warnings (AHP only).
    pub fn warnings(&self) -> &[String] {
        match self {
            DecisionReport::Ahp(r) => &r.warnings,
            _ => &[],
        }
    }
}

/// Result of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluateDecisionResult {
    pub session_id: SessionId,
    pub report: DecisionReport,
    pub event: RankingComputed,
}

/// Handler for evaluating decision problems under a fixed context.
pub struct EvaluateDecisionHandler {
    context: DecisionContext,
}

impl EvaluateDecisionHandler {
    pub fn new(context: DecisionContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &DecisionContext {
        &self.context
    }

    pub fn handle(
        &self,
        cmd: EvaluateDecisionCommand,
    ) -> Result<EvaluateDecisionResult, AnalysisError> {
        let session_id = cmd.session_id.unwrap_or_default();
        let method = cmd.problem.method();
        info!(session_id = %session_id, method = %method, "Evaluating decision");

        // 1. Run the method
        let report = match &cmd.problem {
            DecisionProblem::Ahp(problem) => {
                let session = problem.to_session()?.with_session_id(session_id);
                DecisionReport::Ahp(session.evaluate(&self.context)?)
            }
            DecisionProblem::Saw(problem) => {
                DecisionReport::Saw(SawMethod::evaluate(&problem.to_table()?, &self.context)?)
            }
            DecisionProblem::Wp(problem) => {
                DecisionReport::Wp(WeightedProduct::evaluate(&problem.to_table()?)?)
            }
            DecisionProblem::Maut(problem) => {
                DecisionReport::Maut(MautMethod::evaluate(&problem.to_table()?, &self.context)?)
            }
        };

        for warning in report.warnings() {
            warn!(session_id = %session_id, "{}", warning);
        }

        // 2. Summarize as an event
        let event = RankingComputed::from_ranking(session_id, method, report.ranking());
        info!(
            event_type = event.event_type(),
            event_id = %event.event_id(),
            best = event.best_alternative.as_deref().unwrap_or("tie"),
            "Ranking computed"
        );

        Ok(EvaluateDecisionResult {
            session_id,
            report,
            event,
        })
    }
}
