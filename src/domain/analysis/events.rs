//! Analysis domain events.
//!
//! Events published when a decision method finishes ranking alternatives.
//! They carry summarized results, not the full report.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::FinalRanking;
use crate::domain::foundation::{domain_event, EventId, SessionId, Timestamp};

/// Aggregation convention that produced a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Ahp,
    Saw,
    Wp,
    Maut,
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MethodKind::Ahp => "ahp",
            MethodKind::Saw => "saw",
            MethodKind::Wp => "wp",
            MethodKind::Maut => "maut",
        };
        write!(f, "{}", s)
    }
}

/// Published when a method has ranked the alternatives of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingComputed {
    /// Unique event identifier for deduplication.
    pub event_id: EventId,
    pub session_id: SessionId,
    pub method: MethodKind,
    /// Map of alternative name -> final score.
    pub alternative_scores: HashMap<String, f64>,
    /// Name of the best-scoring alternative (None if the top two tie).
    pub best_alternative: Option<String>,
    pub computed_at: Timestamp,
}

impl RankingComputed {
    /// Summarizes `ranking` as an event stamped now.
    pub fn from_ranking(session_id: SessionId, method: MethodKind, ranking: &FinalRanking) -> Self {
        Self {
            event_id: EventId::new(),
            session_id,
            method,
            alternative_scores: ranking.score_map(),
            best_alternative: ranking.best().map(|r| r.name.clone()),
            computed_at: Timestamp::now(),
        }
    }
}

domain_event!(
    RankingComputed,
    event_type = "analysis.ranking_computed",
    schema_version = 1,
    aggregate_id = session_id,
    occurred_at = computed_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::ItemSet;
    use crate::domain::foundation::DomainEvent;

    fn ranking(scores: Vec<f64>) -> FinalRanking {
        FinalRanking::new(&ItemSet::new(vec!["alt-1", "alt-2"]).unwrap(), scores).unwrap()
    }

    #[test]
    fn ranking_computed_names_best_alternative() {
        let event = RankingComputed::from_ranking(
            SessionId::new(),
            MethodKind::Saw,
            &ranking(vec![0.3, 0.7]),
        );

        assert_eq!(event.best_alternative.as_deref(), Some("alt-2"));
        assert_eq!(event.alternative_scores.get("alt-1"), Some(&0.3));
    }

    #[test]
    fn ranking_computed_has_no_best_on_tie() {
        let event = RankingComputed::from_ranking(
            SessionId::new(),
            MethodKind::Maut,
            &ranking(vec![0.5, 0.5]),
        );

        assert!(event.best_alternative.is_none());
    }

    #[test]
    fn ranking_computed_event_contract() {
        let session_id = SessionId::new();
        let event =
            RankingComputed::from_ranking(session_id, MethodKind::Ahp, &ranking(vec![0.6, 0.4]));

        assert_eq!(event.event_type(), "analysis.ranking_computed");
        assert_eq!(event.schema_version(), 1);
        assert_eq!(event.aggregate_id(), session_id.to_string());
        assert_eq!(event.event_id(), event.event_id);
    }

    #[test]
    fn method_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&MethodKind::Wp).unwrap(), "\"wp\"");
        assert_eq!(MethodKind::Maut.to_string(), "maut");
    }
}
