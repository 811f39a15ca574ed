//! # agentloop
//!
//! Capability discovery and function-dispatch loop for chat-model agents.
//!
//! A host application declares an [`Agent`]: a natural-language duty
//! description plus a table of host-callable capabilities. The agent drives
//! a conversation with an external chat-completion model (behind the
//! [`ChatModel`] trait) that may invoke those capabilities instead of
//! answering directly. `Agent::ask` mediates each user turn through a
//! bounded loop: interpret the model response, execute requested
//! capabilities, feed results back, repeat until a terminal answer.
//!
//! ```no_run
//! use std::sync::Arc;
//! use agentloop::{Agent, Capability, CapabilityParameter, ParameterType};
//! # use agentloop::{ChatModel, ChatModelResponse, CapabilityDescriptor};
//! # struct MyModel;
//! # #[async_trait::async_trait]
//! # impl ChatModel for MyModel {
//! #     fn set_functions(&mut self, _: &[CapabilityDescriptor]) {}
//! #     async fn send_user_message(&mut self, _: &str) -> ChatModelResponse {
//! #         ChatModelResponse::message("")
//! #     }
//! #     async fn send_function_result(&mut self, _: &str, _: &str) -> ChatModelResponse {
//! #         ChatModelResponse::message("")
//! #     }
//! # }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut agent = Agent::builder(MyModel)
//!     .duty("You report the weather.")
//!     .capability(
//!         Capability::new("getWeather", "Current weather for a city", Arc::new(|args| {
//!             let city = args.get("city").and_then(|v| v.as_str()).unwrap_or("?");
//!             Ok(format!("sunny in {city}"))
//!         }))
//!         .with_parameter(CapabilityParameter::new(
//!             "city",
//!             ParameterType::String,
//!             "City name",
//!         )),
//!     )
//!     .build()?;
//!
//! let answer = agent.ask("What's the weather in Paris?").await?;
//! # let _ = answer;
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod capabilities;
pub mod chat;
pub mod utilities;

pub use agent::{Agent, AgentBuilder, DispatchConfig};
pub use capabilities::{
    Capability, CapabilityDescriptor, CapabilityFn, CapabilityParameter, CapabilityRegistry,
    ParameterType,
};
pub use chat::{ChatModel, ChatModelResponse, FunctionCall};
pub use utilities::errors::{
    AgentError, CapabilityExecutionError, ExecutionFailure, RegistrationError,
};
