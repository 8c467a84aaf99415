//! Comparison Value - Parsing of textual pairwise judgments ("3", "1/3", "0.25").

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AnalysisError;

/// Parses a comparison entered as a decimal number or an `a/b` fraction.
///
/// # Edge Cases
/// - Surrounding whitespace is ignored: `" 1 / 3 "` parses as 1/3
/// - A zero denominator is rejected
/// - The resulting value must be finite and strictly positive
pub fn parse_comparison(text: &str) -> Result<f64, AnalysisError> {
    let text = text.trim();

    let value = match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = parse_number(numerator, text)?;
            let denominator = parse_number(denominator, text)?;
            if denominator == 0.0 {
                return Err(AnalysisError::invalid_value(
                    "comparison",
                    format!("'{}' has a zero denominator", text),
                ));
            }
            numerator / denominator
        }
        None => parse_number(text, text)?,
    };

    validate_comparison(value)
}

/// Checks that a numeric comparison is finite and strictly positive.
pub fn validate_comparison(value: f64) -> Result<f64, AnalysisError> {
    if !value.is_finite() {
        return Err(AnalysisError::invalid_value(
            "comparison",
            "must be a finite number",
        ));
    }
    if value <= 0.0 {
        return Err(AnalysisError::invalid_value(
            "comparison",
            format!("must be greater than zero, got {}", value),
        ));
    }
    Ok(value)
}

fn parse_number(part: &str, original: &str) -> Result<f64, AnalysisError> {
    part.trim().parse::<f64>().map_err(|_| {
        AnalysisError::invalid_value("comparison", format!("'{}' is not a number or fraction", original))
    })
}

/// A judgment as written by a decision-maker: a number or fraction text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComparisonInput {
    Number(f64),
    Text(String),
}

impl ComparisonInput {
    /// Resolves the input to a validated positive value.
    pub fn resolve(&self) -> Result<f64, AnalysisError> {
        match self {
            ComparisonInput::Number(value) => validate_comparison(*value),
            ComparisonInput::Text(text) => parse_comparison(text),
        }
    }
}

impl From<f64> for ComparisonInput {
    fn from(value: f64) -> Self {
        ComparisonInput::Number(value)
    }
}

impl From<&str> for ComparisonInput {
    fn from(text: &str) -> Self {
        ComparisonInput::Text(text.to_string())
    }
}
