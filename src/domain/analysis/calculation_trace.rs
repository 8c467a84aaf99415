//! Calculation Trace - Human-readable record of the steps a method performed.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordered log of calculation steps, returned alongside method results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationTrace {
    steps: Vec<String>,
}

impl CalculationTrace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step and emits it as a debug event.
    pub fn record(&mut self, step: impl Into<String>) {
        let step = step.into();
        debug!(step = %step, "Calculation step");
        self.steps.push(step);
    }

    /// Returns the recorded steps.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
