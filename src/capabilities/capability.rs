//! Capability definition — one host-invocable function visible to the model.
//!
//! A capability is declared statically at agent-definition time: a name, a
//! description telling the model how/when/why to use it, an ordered typed
//! parameter list, and the bound host handler. There is no runtime
//! introspection; the host declares its capability table explicitly.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utilities::errors::CapabilityExecutionError;

// ---------------------------------------------------------------------------
// Parameter schema
// ---------------------------------------------------------------------------

/// JSON type of a declared capability parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

/// One typed parameter in a capability's signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityParameter {
    /// Parameter name; arguments are bound against it.
    pub name: String,
    /// Declared JSON type.
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    /// Human-readable description of the parameter.
    pub description: String,
    /// Whether the model must supply this parameter.
    #[serde(default = "default_true")]
    pub required: bool,
}

fn default_true() -> bool {
    true
}

impl CapabilityParameter {
    /// Create a new required parameter.
    pub fn new(
        name: impl Into<String>,
        param_type: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
            required: true,
        }
    }

    /// Create a new optional parameter.
    pub fn optional(
        name: impl Into<String>,
        param_type: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            required: false,
            ..Self::new(name, param_type, description)
        }
    }
}

// ---------------------------------------------------------------------------
// CapabilityDescriptor
// ---------------------------------------------------------------------------

/// Machine-readable description of one invocable function.
///
/// This is what gets pushed to the chat model via `set_functions`: the name,
/// the description, and the ordered typed parameter list. Built once during
/// agent construction; read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    /// Unique name within one registry.
    pub name: String,
    /// Description used to tell the model how/when/why to call this.
    pub description: String,
    /// Ordered parameter declarations.
    #[serde(default)]
    pub parameters: Vec<CapabilityParameter>,
}

// ---------------------------------------------------------------------------
// Capability (descriptor + bound handler)
// ---------------------------------------------------------------------------

/// Type alias for a boxed capability handler.
///
/// Receives the name-bound arguments and returns the textual function result
/// sent back into the conversation.
pub type CapabilityFn = Arc<
    dyn Fn(HashMap<String, Value>) -> Result<String, Box<dyn std::error::Error + Send + Sync>>
        + Send
        + Sync,
>;

/// A descriptor bound to its host handler.
#[derive(Clone)]
pub struct Capability {
    descriptor: CapabilityDescriptor,
    handler: CapabilityFn,
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("name", &self.descriptor.name)
            .field("description", &self.descriptor.description)
            .field("parameters", &self.descriptor.parameters)
            .finish()
    }
}

impl Capability {
    /// Create a new capability wrapping the given handler.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: CapabilityFn,
    ) -> Self {
        Self {
            descriptor: CapabilityDescriptor {
                name: name.into(),
                description: description.into(),
                parameters: Vec::new(),
            },
            handler,
        }
    }

    /// Builder method to append a parameter declaration.
    pub fn with_parameter(mut self, parameter: CapabilityParameter) -> Self {
        self.descriptor.parameters.push(parameter);
        self
    }

    /// The capability's unique name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// The machine-readable descriptor.
    pub fn descriptor(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }

    /// Bind a raw argument payload against the declared parameter schema
    /// and invoke the handler.
    ///
    /// Arguments are matched by parameter name, never by position. A missing
    /// required parameter or a non-object payload fails before the handler
    /// runs; arguments the schema does not declare are dropped with a
    /// warning.
    pub fn invoke(&self, arguments: &Value) -> Result<String, CapabilityExecutionError> {
        let bound = self.bind_arguments(arguments)?;
        (self.handler)(bound).map_err(|e| {
            CapabilityExecutionError::handler_failed(&self.descriptor.name, e.to_string())
        })
    }

    /// Decode the raw payload into a name-keyed argument map.
    fn bind_arguments(
        &self,
        arguments: &Value,
    ) -> Result<HashMap<String, Value>, CapabilityExecutionError> {
        let object = match arguments {
            Value::Object(map) => map.clone(),
            // Missing payloads are fine for zero-parameter capabilities.
            Value::Null => serde_json::Map::new(),
            other => {
                return Err(CapabilityExecutionError::invalid_arguments(
                    &self.descriptor.name,
                    json_type_name(other),
                ))
            }
        };

        let mut bound = HashMap::new();
        for parameter in &self.descriptor.parameters {
            match object.get(&parameter.name) {
                Some(value) => {
                    bound.insert(parameter.name.clone(), value.clone());
                }
                None if parameter.required => {
                    return Err(CapabilityExecutionError::missing_parameter(
                        &self.descriptor.name,
                        &parameter.name,
                    ));
                }
                None => {}
            }
        }

        for key in object.keys() {
            if !self.descriptor.parameters.iter().any(|p| p.name == *key) {
                log::warn!(
                    "capability '{}': ignoring undeclared argument '{}'",
                    self.descriptor.name,
                    key
                );
            }
        }

        Ok(bound)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::errors::ExecutionFailure;
    use serde_json::json;

    fn weather_capability() -> Capability {
        Capability::new(
            "getWeather",
            "Get the current weather for a city",
            Arc::new(|args| {
                let city = args
                    .get("city")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown");
                Ok(format!("weather in {}", city))
            }),
        )
        .with_parameter(CapabilityParameter::new(
            "city",
            ParameterType::String,
            "City name",
        ))
        .with_parameter(CapabilityParameter::optional(
            "units",
            ParameterType::String,
            "Unit system",
        ))
    }

    #[test]
    fn test_invoke_binds_by_name() {
        let cap = weather_capability();
        let result = cap.invoke(&json!({"city": "Paris"})).unwrap();
        assert_eq!(result, "weather in Paris");
    }

    #[test]
    fn test_invoke_ignores_argument_order() {
        let cap = weather_capability();
        // Declaration order is (city, units); payload order is reversed.
        let result = cap
            .invoke(&json!({"units": "metric", "city": "Oslo"}))
            .unwrap();
        assert_eq!(result, "weather in Oslo");
    }

    #[test]
    fn test_missing_required_parameter() {
        let cap = weather_capability();
        let err = cap.invoke(&json!({"units": "metric"})).unwrap_err();
        assert!(matches!(err.kind, ExecutionFailure::MissingParameter(ref p) if p == "city"));
    }

    #[test]
    fn test_optional_parameter_may_be_omitted() {
        let cap = weather_capability();
        assert!(cap.invoke(&json!({"city": "Lima"})).is_ok());
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        let cap = weather_capability();
        let err = cap.invoke(&json!(["Paris"])).unwrap_err();
        assert!(matches!(err.kind, ExecutionFailure::InvalidArguments(_)));
    }

    #[test]
    fn test_null_arguments_for_zero_parameter_capability() {
        let cap = Capability::new("ping", "Liveness probe", Arc::new(|_| Ok("pong".into())));
        assert_eq!(cap.invoke(&Value::Null).unwrap(), "pong");
    }

    #[test]
    fn test_undeclared_arguments_are_dropped() {
        let cap = weather_capability();
        let result = cap
            .invoke(&json!({"city": "Rome", "mood": "sunny please"}))
            .unwrap();
        assert_eq!(result, "weather in Rome");
    }

    #[test]
    fn test_handler_failure_is_structured() {
        let cap = Capability::new(
            "explode",
            "Always fails",
            Arc::new(|_| Err("boom".into())),
        );
        let err = cap.invoke(&json!({})).unwrap_err();
        assert_eq!(err.function, "explode");
        assert!(matches!(err.kind, ExecutionFailure::HandlerFailed(ref c) if c == "boom"));
    }

    #[test]
    fn test_descriptor_serializes_parameter_type() {
        let cap = weather_capability();
        let value = serde_json::to_value(cap.descriptor()).unwrap();
        assert_eq!(value["name"], "getWeather");
        assert_eq!(value["parameters"][0]["type"], "string");
        assert_eq!(value["parameters"][0]["required"], true);
        assert_eq!(value["parameters"][1]["required"], false);
    }
}
