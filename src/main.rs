//! `mcda` - evaluate a decision problem file and print the report as JSON.
//!
//! ```text
//! mcda <problem-file> [--config <file>] [--session <uuid>]
//! ```
//!
//! `--session` tags the report and its event with a caller-chosen session id.

use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;
use tracing::{error, info};

use mcda_engine::application::{
    DecisionProblem, EvaluateDecisionCommand, EvaluateDecisionHandler, ProblemError,
};
use mcda_engine::config::{AppConfig, ConfigError, LoggingConfig};
use mcda_engine::domain::foundation::{AnalysisError, SessionId};

const USAGE: &str = "usage: mcda <problem-file> [--config <file>] [--session <uuid>]";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}\n{}", USAGE)]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Problem(#[from] ProblemError),

    #[error("{} - {}", .0.code(), .0)]
    Analysis(#[from] AnalysisError),

    #[error("Failed to render report: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Debug, PartialEq)]
struct CliArgs {
    problem: PathBuf,
    config: Option<PathBuf>,
    session: Option<SessionId>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, CliError> {
    let mut problem = None;
    let mut config = None;
    let mut session = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--config needs a file".to_string()))?;
                config = Some(PathBuf::from(path));
            }
            "--session" | "-s" => {
                let id = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--session needs a uuid".to_string()))?;
                let id = id
                    .parse::<SessionId>()
                    .map_err(|err| CliError::Usage(format!("invalid session id '{}': {}", id, err)))?;
                session = Some(id);
            }
            "--help" | "-h" => return Err(CliError::Usage("help requested".to_string())),
            flag if flag.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option '{}'", flag)));
            }
            _ if problem.is_some() => {
                return Err(CliError::Usage(format!("unexpected argument '{}'", arg)));
            }
            _ => problem = Some(PathBuf::from(arg)),
        }
    }

    let problem = problem.ok_or_else(|| CliError::Usage("missing problem file".to_string()))?;
    Ok(CliArgs {
        problem,
        config,
        session,
    })
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = logging.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn run(args: CliArgs) -> Result<String, CliError> {
    let config = match &args.config {
        Some(path) => AppConfig::load_with_file(path)?,
        None => AppConfig::load()?,
    };
    config.validate().map_err(ConfigError::from)?;
    init_tracing(&config.logging)?;

    info!(problem = %args.problem.display(), strategy = ?config.engine.strategy, "Loading problem");
    let problem = DecisionProblem::from_path(&args.problem)?;

    let handler = EvaluateDecisionHandler::new(config.engine.context());
    let result = handler.handle(EvaluateDecisionCommand {
        problem,
        session_id: args.session,
    })?;

    Ok(serde_json::to_string_pretty(&result)?)
}

fn main() -> ExitCode {
    let outcome = parse_args(std::env::args().skip(1)).and_then(run);
    match outcome {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Evaluation failed");
            eprintln!("mcda: {}", err);
            match err {
                CliError::Usage(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
