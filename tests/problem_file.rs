//! Problem files on disk through the evaluate handler.

use std::io::Write;

use mcda_engine::application::{
    DecisionProblem, DecisionReport, EvaluateDecisionCommand, EvaluateDecisionHandler,
    ProblemError,
};
use mcda_engine::config::EngineConfig;
use mcda_engine::domain::analysis::MethodKind;
use mcda_engine::domain::foundation::AnalysisError;
use tempfile::NamedTempFile;

fn write_problem(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn evaluate(problem: DecisionProblem) -> Result<DecisionReport, AnalysisError> {
    let handler = EvaluateDecisionHandler::new(EngineConfig::default().context());
    handler
        .handle(EvaluateDecisionCommand {
            problem,
            session_id: None,
        })
        .map(|result| result.report)
}

const AHP_YAML: &str = r#"
method: ahp
criteria: [A, B]
alternatives: [X, Y]
criteria_comparisons:
  - { row: A, column: B, value: 4 }
alternative_comparisons:
  A:
    - { row: X, column: Y, value: 2 }
  B:
    - { row: X, column: Y, value: "1/2" }
"#;

#[test]
fn ahp_yaml_file_ranks_alternatives() {
    let file = write_problem(".yaml", AHP_YAML);

    let problem = DecisionProblem::from_path(file.path()).unwrap();
    assert_eq!(problem.method(), MethodKind::Ahp);

    let report = evaluate(problem).unwrap();
    assert_eq!(report.ranking().order(), vec!["X", "Y"]);
    assert!((report.ranking().score_of("X").unwrap() - 0.6).abs() < 1e-9);
}

#[test]
fn maut_json_file_ranks_alternatives() {
    let file = write_problem(
        ".json",
        r#"{
            "method": "maut",
            "alternatives": ["north", "south", "east"],
            "criteria": [
                {"name": "rent", "orientation": "cost", "weight": 3},
                {"name": "space", "orientation": "benefit", "weight": 2},
                {"name": "light", "orientation": "benefit", "weight": 1}
            ],
            "values": [
                [1200, 80, 6],
                [900, 60, 9],
                [1500, 95, 7]
            ]
        }"#,
    );

    let report = evaluate(DecisionProblem::from_path(file.path()).unwrap()).unwrap();

    let DecisionReport::Maut(maut) = &report else {
        panic!("expected a MAUT report");
    };
    assert_eq!(maut.weights, vec![0.5, 1.0 / 3.0, 1.0 / 6.0]);
    let total: f64 = maut.ranking.scores().iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert_eq!(maut.ranking.order()[0], "south");
}

#[test]
fn report_serializes_with_method_tag() {
    let file = write_problem(
        ".yml",
        "method: saw\nalternatives: [a, b]\ncriteria:\n  - { name: c, orientation: benefit, weight: 1 }\nvalues: [[10], [20]]\n",
    );

    let report = evaluate(DecisionProblem::from_path(file.path()).unwrap()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["method"], "saw");
    assert_eq!(json["ranking"]["ranked"][0]["name"], "b");
}

#[test]
fn incomplete_ahp_file_is_rejected() {
    let file = write_problem(
        ".yaml",
        "method: ahp\ncriteria: [A, B]\nalternatives: [X, Y]\ncriteria_comparisons:\n  - { row: A, column: B, value: 2 }\n",
    );

    let result = evaluate(DecisionProblem::from_path(file.path()).unwrap());
    assert!(matches!(result, Err(AnalysisError::IncompleteInput { .. })));
}

#[test]
fn malformed_fraction_is_invalid_value() {
    let file = write_problem(
        ".yaml",
        &AHP_YAML.replace("\"1/2\"", "\"1/0\""),
    );

    let result = evaluate(DecisionProblem::from_path(file.path()).unwrap());
    assert!(matches!(result, Err(AnalysisError::InvalidValue { .. })));
}

#[test]
fn missing_file_reports_path() {
    let result = DecisionProblem::from_path("/nonexistent/problem.yaml");
    match result {
        Err(ProblemError::Io { path, .. }) => assert!(path.ends_with("problem.yaml")),
        other => panic!("expected an I/O error, got {:?}", other),
    }
}
