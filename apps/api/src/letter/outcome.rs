//! Step outcomes: a letter step either produced its payload or spent its
//! retry budget. Exhaustion is a value, never a propagated fault.

use serde::{Deserialize, Serialize};

/// Sentinel produced when a step's retry budget is spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Result of a retried step. Serialized untagged: `Done` renders as the
/// payload itself, `Exhausted` as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepOutcome<T> {
    Done(T),
    Exhausted(ErrorRecord),
}

impl<T> StepOutcome<T> {
    pub fn exhausted(message: impl Into<String>) -> Self {
        StepOutcome::Exhausted(ErrorRecord::new(message))
    }

    #[cfg(test)]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, StepOutcome::Exhausted(_))
    }

    #[cfg(test)]
    pub fn done(self) -> Option<T> {
        match self {
            StepOutcome::Done(value) => Some(value),
            StepOutcome::Exhausted(_) => None,
        }
    }
}
