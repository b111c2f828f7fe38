//! The single value a run reports back to its caller.

use crate::interpreter::{Halt, State};

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success {
        trace: Vec<String>,
    },
    /// `trace` holds whatever the run produced before it stopped.
    Failure {
        message: String,
        trace: Vec<String>,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn trace(&self) -> &[String] {
        match self {
            Outcome::Success { trace } | Outcome::Failure { trace, .. } => trace,
        }
    }

    /// Text for the output surface: the joined trace on success, the
    /// failure message otherwise.
    pub fn render(&self) -> String {
        match self {
            Outcome::Success { trace } => trace.join("\n"),
            Outcome::Failure { message, .. } => message.clone(),
        }
    }
}

impl From<Result<State, Halt>> for Outcome {
    fn from(result: Result<State, Halt>) -> Self {
        match result {
            Ok(state) => Outcome::Success { trace: state.trace },
            Err(halt) => Outcome::Failure {
                message: halt.error.to_string(),
                trace: halt.trace,
            },
        }
    }
}
