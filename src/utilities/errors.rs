//! Error types for the agent dispatch loop.
//!
//! Only model-level failures, loop bounds/deadlines, and construction-time
//! registration problems terminate an `ask` call abnormally. Capability
//! execution failures are structured here but rendered back into the
//! conversation as text so the model can self-correct.

use std::time::Duration;

use thiserror::Error;

/// Fatal errors surfaced by [`crate::agent::Agent::ask`].
#[derive(Debug, Error)]
pub enum AgentError {
    /// The chat model reported an error. Propagated immediately; no retry
    /// at this layer.
    #[error("chat model error: {message}")]
    Model { message: String },

    /// The function-call round-trip cap was reached without a terminal
    /// message from the model.
    #[error("round-trip limit of {limit} reached without a final answer")]
    LoopBoundExceeded { limit: usize },

    /// A single model round-trip exceeded the configured timeout.
    #[error("model call timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// The overall deadline for the `ask` call expired.
    #[error("ask deadline of {deadline:?} exceeded")]
    DeadlineExceeded { deadline: Duration },
}

/// Construction-time errors raised while registering capabilities.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Two capabilities were registered under the same name.
    #[error("capability name '{name}' is already registered")]
    DuplicateName { name: String },
}

/// The cause of a failed function-call execution.
#[derive(Debug, Error)]
pub enum ExecutionFailure {
    /// The requested name does not match any registered capability.
    #[error("no capability is registered under that name")]
    UnknownFunction,

    /// The argument payload was not a JSON object.
    #[error("arguments must be a JSON object, got {0}")]
    InvalidArguments(String),

    /// A declared required parameter was absent from the arguments.
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    /// The bound host handler returned an error.
    #[error("{0}")]
    HandlerFailed(String),
}

/// Recoverable failure while resolving or invoking a requested capability.
///
/// Carries the requested function name and the underlying cause. Never
/// escapes the dispatch loop: it is rendered with
/// [`CapabilityExecutionError::to_function_result`] and re-injected into the
/// conversation through the function-result channel, letting the model
/// decide how to recover.
#[derive(Debug, Error)]
#[error("function '{function}' failed: {kind}")]
pub struct CapabilityExecutionError {
    /// Name of the function the model asked for.
    pub function: String,
    /// Underlying cause.
    pub kind: ExecutionFailure,
}

impl CapabilityExecutionError {
    /// Failure for a name with no registered capability.
    pub fn unknown_function(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            kind: ExecutionFailure::UnknownFunction,
        }
    }

    /// Failure for an argument payload that is not a JSON object.
    pub fn invalid_arguments(function: impl Into<String>, got: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            kind: ExecutionFailure::InvalidArguments(got.into()),
        }
    }

    /// Failure for a missing required parameter.
    pub fn missing_parameter(function: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            kind: ExecutionFailure::MissingParameter(parameter.into()),
        }
    }

    /// Failure raised by the host handler itself.
    pub fn handler_failed(function: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            kind: ExecutionFailure::HandlerFailed(cause.into()),
        }
    }

    /// Render this failure as the textual function result sent back to the
    /// model. The wording invites the model to recover by asking the user
    /// for more information instead of aborting the turn.
    pub fn to_function_result(&self) -> String {
        format!(
            "an error occurred while running function {}: '{}'. \
             You may need to ask the user for more information.",
            self.function, self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_function_result_wording() {
        let err = CapabilityExecutionError::handler_failed("getWeather", "city not found");
        assert_eq!(
            err.to_function_result(),
            "an error occurred while running function getWeather: 'city not found'. \
             You may need to ask the user for more information."
        );
    }

    #[test]
    fn test_unknown_function_mentions_name() {
        let err = CapabilityExecutionError::unknown_function("doStuff");
        let result = err.to_function_result();
        assert!(result.contains("doStuff"));
        assert!(result.contains("no capability is registered"));
    }

    #[test]
    fn test_agent_error_display() {
        let err = AgentError::Model {
            message: "rate limited".to_string(),
        };
        assert_eq!(format!("{}", err), "chat model error: rate limited");

        let err = AgentError::LoopBoundExceeded { limit: 25 };
        assert!(format!("{}", err).contains("25"));
    }

    #[test]
    fn test_registration_error_display() {
        let err = RegistrationError::DuplicateName {
            name: "search".to_string(),
        };
        assert!(format!("{}", err).contains("'search'"));
    }
}
