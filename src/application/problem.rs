//! Decision problem files.
//!
//! A problem file names its method and carries everything that method
//! needs. YAML (`.yaml`/`.yml`) and JSON (`.json`) are accepted.
//!
//! ```yaml
//! method: ahp
//! criteria: [cost, comfort]
//! alternatives: [car, train]
//! criteria_comparisons:
//!   - { row: cost, column: comfort, value: 3 }
//! alternative_comparisons:
//!   cost:
//!     - { row: train, column: car, value: "1/2" }
//!   comfort:
//!     - { row: train, column: car, value: 5 }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::analysis::{ComparisonInput, ItemSet, MethodKind, ValueMatrix};
use crate::domain::foundation::AnalysisError;
use crate::domain::methods::{AhpSession, Criterion, PerformanceTable};

/// Errors that can occur while reading a problem file
#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported problem file format '{0}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error("Invalid YAML problem: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON problem: {0}")]
    Json(#[from] serde_json::Error),
}

/// One judgment: how strongly `row` is preferred to `column`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub row: String,
    pub column: String,
    pub value: ComparisonInput,
}

/// Pairwise judgments for an AHP decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AhpProblem {
    pub criteria: Vec<String>,
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub criteria_comparisons: Vec<ComparisonEntry>,
    /// Judgments between alternatives, keyed by criterion name.
    #[serde(default)]
    pub alternative_comparisons: BTreeMap<String, Vec<ComparisonEntry>>,
}

impl AhpProblem {
    /// Replays every judgment into a fresh session.
    pub fn to_session(&self) -> Result<AhpSession, AnalysisError> {
        let mut session = AhpSession::new(
            ItemSet::new(self.criteria.clone())?,
            ItemSet::new(self.alternatives.clone())?,
        );

        for entry in &self.criteria_comparisons {
            session.compare_criteria_by_name(&entry.row, &entry.column, entry.value.resolve()?)?;
        }
        for (criterion, entries) in &self.alternative_comparisons {
            for entry in entries {
                session.compare_alternatives_by_name(
                    criterion,
                    &entry.row,
                    &entry.column,
                    entry.value.resolve()?,
                )?;
            }
        }
        Ok(session)
    }
}

/// Raw performance values for SAW, WP or MAUT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableProblem {
    pub alternatives: Vec<String>,
    pub criteria: Vec<Criterion>,
    /// One row per alternative, one column per criterion.
    pub values: Vec<Vec<f64>>,
}

impl TableProblem {
    pub fn to_table(&self) -> Result<PerformanceTable, AnalysisError> {
        PerformanceTable::new(
            ItemSet::new(self.alternatives.clone())?,
            self.criteria.clone(),
            ValueMatrix::new(self.values.clone())?,
        )
    }
}

/// A decision problem tagged with the method that evaluates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DecisionProblem {
    Ahp(AhpProblem),
    Saw(TableProblem),
    Wp(TableProblem),
    Maut(TableProblem),
}

impl DecisionProblem {
    /// Method named by the problem.
    pub fn method(&self) -> MethodKind {
        match self {
            DecisionProblem::Ahp(_) => MethodKind::Ahp,
            DecisionProblem::Saw(_) => MethodKind::Saw,
            DecisionProblem::Wp(_) => MethodKind::Wp,
            DecisionProblem::Maut(_) => MethodKind::Maut,
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ProblemError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ProblemError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a problem file, choosing the parser by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProblemError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !matches!(extension.as_str(), "yaml" | "yml" | "json") {
            return Err(ProblemError::UnsupportedFormat(extension));
        }

        let text = std::fs::read_to_string(path).map_err(|source| ProblemError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if extension == "json" {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::Orientation;

    const AHP_YAML: &str = r#"
method: ahp
criteria: [cost, comfort]
alternatives: [car, train]
criteria_comparisons:
  - { row: cost, column: comfort, value: 3 }
alternative_comparisons:
  cost:
    - { row: train, column: car, value: "1/2" }
  comfort:
    - { row: train, column: car, value: 5 }
"#;

    #[test]
    fn parses_ahp_yaml_with_fractions() {
        let problem = DecisionProblem::from_yaml_str(AHP_YAML).unwrap();
        assert_eq!(problem.method(), MethodKind::Ahp);

        let DecisionProblem::Ahp(ahp) = problem else {
            panic!("expected an AHP problem");
        };
        let session = ahp.to_session().unwrap();

        assert_eq!(session.criteria_matrix().get(1, 0).unwrap(), 1.0 / 3.0);
        let cost = session.alternative_matrix(0).unwrap();
        assert_eq!(cost.get(1, 0).unwrap(), 0.5);
        assert_eq!(cost.get(0, 1).unwrap(), 2.0);
    }

    #[test]
    fn parses_table_json() {
        let json = r#"{
            "method": "wp",
            "alternatives": ["A", "B"],
            "criteria": [
                {"name": "quality", "orientation": "benefit", "weight": 2},
                {"name": "price", "orientation": "cost", "weight": 1}
            ],
            "values": [[7, 300], [9, 450]]
        }"#;

        let problem = DecisionProblem::from_json_str(json).unwrap();
        let DecisionProblem::Wp(table) = problem else {
            panic!("expected a WP problem");
        };
        assert_eq!(table.criteria[1].orientation, Orientation::Cost);
        let table = table.to_table().unwrap();
        assert_eq!(table.values().get(1, 1), Some(450.0));
    }

    #[test]
    fn unknown_method_is_rejected() {
        let result = DecisionProblem::from_yaml_str("method: topsis\nalternatives: []\n");
        assert!(matches!(result, Err(ProblemError::Yaml(_))));
    }

    #[test]
    fn unknown_names_surface_as_analysis_errors() {
        let problem = AhpProblem {
            criteria: vec!["cost".into(), "comfort".into()],
            alternatives: vec!["car".into(), "train".into()],
            criteria_comparisons: vec![ComparisonEntry {
                row: "cost".into(),
                column: "speed".into(),
                value: ComparisonInput::from(2.0),
            }],
            alternative_comparisons: BTreeMap::new(),
        };
        assert!(matches!(
            problem.to_session(),
            Err(AnalysisError::InvalidItemSet { .. })
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let result = DecisionProblem::from_path("problem.toml");
        assert!(matches!(result, Err(ProblemError::UnsupportedFormat(ext)) if ext == "toml"));
    }
}
