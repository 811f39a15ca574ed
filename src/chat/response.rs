//! Chat model response shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A function invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the capability the model wants executed.
    pub name: String,
    /// Raw argument payload, conceptually a JSON object.
    #[serde(default)]
    pub arguments: Value,
}

impl FunctionCall {
    /// Create a new function call request.
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// One response from the chat model.
///
/// Exactly one shape holds per response. Modeling this as an enum makes the
/// "never simultaneously an error and a function call" invariant hold by
/// construction rather than by runtime checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatModelResponse {
    /// Terminal user-facing message; ends the turn.
    Message(String),
    /// Fatal model-level error (rate limit, refusal, transport failure).
    Error(String),
    /// The model wants a capability executed before it can answer.
    FunctionCall(FunctionCall),
}

impl ChatModelResponse {
    /// Terminal message response.
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    /// Fatal error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// Function call response.
    pub fn function_call(name: impl Into<String>, arguments: Value) -> Self {
        Self::FunctionCall(FunctionCall::new(name, arguments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors() {
        assert_eq!(
            ChatModelResponse::message("hi"),
            ChatModelResponse::Message("hi".to_string())
        );
        assert_eq!(
            ChatModelResponse::error("rate limited"),
            ChatModelResponse::Error("rate limited".to_string())
        );

        let call = ChatModelResponse::function_call("getWeather", json!({"city": "Paris"}));
        match call {
            ChatModelResponse::FunctionCall(fc) => {
                assert_eq!(fc.name, "getWeather");
                assert_eq!(fc.arguments["city"], "Paris");
            }
            other => panic!("expected function call, got {:?}", other),
        }
    }

    #[test]
    fn test_function_call_default_arguments() {
        let fc: FunctionCall = serde_json::from_value(json!({"name": "ping"})).unwrap();
        assert_eq!(fc.arguments, Value::Null);
    }
}
