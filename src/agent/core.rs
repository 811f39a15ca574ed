//! Agent core — construction and the bounded function-dispatch loop.
//!
//! An agent bundles a duty description, an immutable capability table, and
//! a chat-model client. `ask` mediates one logical user turn: it sends the
//! message, executes any function calls the model requests, feeds results
//! back, and repeats until the model produces a terminal message or a
//! fatal error ends the turn.

use std::future::Future;
use std::time::Duration;

use tokio::time::{timeout, Instant};
use uuid::Uuid;

use crate::capabilities::{Capability, CapabilityRegistry};
use crate::chat::{ChatModel, ChatModelResponse, FunctionCall};
use crate::utilities::errors::{AgentError, CapabilityExecutionError, RegistrationError};

/// Duty used when the builder is not given one.
pub const DEFAULT_DUTY: &str = "You are a helpful generalist assistant.";

/// Default cap on function-call round-trips per `ask` call.
pub const DEFAULT_MAX_ROUND_TRIPS: usize = 25;

// ---------------------------------------------------------------------------
// DispatchConfig
// ---------------------------------------------------------------------------

/// Bounds applied to a single `ask` turn.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum number of function-call round-trips before the turn is
    /// abandoned with [`AgentError::LoopBoundExceeded`].
    pub max_round_trips: usize,
    /// Timeout applied to each individual model call.
    pub round_trip_timeout: Option<Duration>,
    /// Overall deadline for the whole `ask` call.
    pub deadline: Option<Duration>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_round_trips: DEFAULT_MAX_ROUND_TRIPS,
            round_trip_timeout: None,
            deadline: None,
        }
    }
}

/// Which bound produced a model-call timeout.
#[derive(Debug, Clone, Copy)]
enum TimeoutKind {
    RoundTrip(Duration),
    Deadline(Duration),
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// A duty description plus a capability table, bound to a chat model.
///
/// Created once per conversation context via [`Agent::builder`]; the
/// capability set is computed at construction and immutable for the agent's
/// lifetime. Conversation history is owned by the [`ChatModel`] implementor.
pub struct Agent {
    duty: String,
    capabilities: CapabilityRegistry,
    chat_model: Box<dyn ChatModel>,
    config: DispatchConfig,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("duty", &self.duty)
            .field("capabilities", &self.capabilities.names())
            .field("config", &self.config)
            .finish()
    }
}

impl Agent {
    /// Create a builder around the given chat model.
    pub fn builder(chat_model: impl ChatModel + 'static) -> AgentBuilder {
        AgentBuilder {
            duty: None,
            capabilities: Vec::new(),
            chat_model: Box::new(chat_model),
            config: DispatchConfig::default(),
        }
    }

    /// The agent's natural-language duty description.
    pub fn duty(&self) -> &str {
        &self.duty
    }

    /// The immutable capability table.
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Run one logical user turn down to a single terminal answer.
    ///
    /// The turn may span multiple model/host round-trips: every function
    /// call the model issues is executed against the registered capability
    /// table and its result fed back before the next model response is
    /// interpreted. Execution failures never end the turn; they are
    /// rendered as text and returned through the function-result channel so
    /// the model can recover. The loop is iterative and bounded: stack
    /// depth stays constant regardless of round-trip count.
    ///
    /// # Errors
    ///
    /// - [`AgentError::Model`] when the model reports an error.
    /// - [`AgentError::LoopBoundExceeded`] when the round-trip cap is hit.
    /// - [`AgentError::Timeout`] / [`AgentError::DeadlineExceeded`] when a
    ///   configured time bound expires.
    pub async fn ask(&mut self, user_message: &str) -> Result<String, AgentError> {
        let call_id = Uuid::new_v4();
        let started_at = Instant::now();
        let deadline_at = self.config.deadline.map(|d| started_at + d);

        log::debug!(
            "[{}] ask: sending user message ({} capabilities registered)",
            call_id,
            self.capabilities.len()
        );

        let bound = remaining_bound(&self.config, deadline_at)?;
        let mut response =
            bounded(self.chat_model.send_user_message(user_message), bound).await?;

        let mut round_trips = 0usize;
        loop {
            match response {
                ChatModelResponse::Message(message) => {
                    log::debug!(
                        "[{}] terminal message after {} round-trip(s) in {:.2}ms",
                        call_id,
                        round_trips,
                        started_at.elapsed().as_secs_f64() * 1000.0
                    );
                    return Ok(message);
                }
                ChatModelResponse::Error(message) => {
                    log::warn!("[{}] model reported an error: {}", call_id, message);
                    return Err(AgentError::Model { message });
                }
                ChatModelResponse::FunctionCall(call) => {
                    round_trips += 1;
                    if round_trips > self.config.max_round_trips {
                        log::warn!(
                            "[{}] abandoning turn: {} round-trips without a final answer",
                            call_id,
                            self.config.max_round_trips
                        );
                        return Err(AgentError::LoopBoundExceeded {
                            limit: self.config.max_round_trips,
                        });
                    }

                    let result = self.execute_function(&call, call_id);
                    let bound = remaining_bound(&self.config, deadline_at)?;
                    response = bounded(
                        self.chat_model.send_function_result(&call.name, &result),
                        bound,
                    )
                    .await?;
                }
            }
        }
    }

    /// Execute one requested function call, absorbing every failure into a
    /// textual function result.
    fn execute_function(&self, call: &FunctionCall, call_id: Uuid) -> String {
        let started_at = Instant::now();
        match self.try_execute(call) {
            Ok(result) => {
                log::debug!(
                    "[{}] function '{}' finished in {:.2}ms",
                    call_id,
                    call.name,
                    started_at.elapsed().as_secs_f64() * 1000.0
                );
                result
            }
            Err(err) => {
                log::warn!("[{}] {}", call_id, err);
                err.to_function_result()
            }
        }
    }

    fn try_execute(&self, call: &FunctionCall) -> Result<String, CapabilityExecutionError> {
        let capability = self
            .capabilities
            .get(&call.name)
            .ok_or_else(|| CapabilityExecutionError::unknown_function(&call.name))?;
        capability.invoke(&call.arguments)
    }
}

/// Compute the time bound for the next model call, failing if the overall
/// deadline has already passed. The tighter of the per-call timeout and the
/// remaining deadline wins.
fn remaining_bound(
    config: &DispatchConfig,
    deadline_at: Option<Instant>,
) -> Result<Option<(Duration, TimeoutKind)>, AgentError> {
    let deadline = config.deadline.unwrap_or_default();
    let remaining = match deadline_at {
        Some(at) => {
            let now = Instant::now();
            if now >= at {
                return Err(AgentError::DeadlineExceeded { deadline });
            }
            Some(at - now)
        }
        None => None,
    };

    Ok(match (config.round_trip_timeout, remaining) {
        (Some(t), Some(r)) if r <= t => Some((r, TimeoutKind::Deadline(deadline))),
        (Some(t), _) => Some((t, TimeoutKind::RoundTrip(t))),
        (None, Some(r)) => Some((r, TimeoutKind::Deadline(deadline))),
        (None, None) => None,
    })
}

/// Await a model call under an optional time bound.
async fn bounded<F>(
    future: F,
    bound: Option<(Duration, TimeoutKind)>,
) -> Result<ChatModelResponse, AgentError>
where
    F: Future<Output = ChatModelResponse>,
{
    match bound {
        None => Ok(future.await),
        Some((limit, kind)) => timeout(limit, future).await.map_err(|_| match kind {
            TimeoutKind::RoundTrip(t) => AgentError::Timeout { timeout: t },
            TimeoutKind::Deadline(d) => AgentError::DeadlineExceeded { deadline: d },
        }),
    }
}

// ---------------------------------------------------------------------------
// AgentBuilder
// ---------------------------------------------------------------------------

/// Declarative agent construction.
///
/// Collects the duty text, the capability table, and dispatch bounds, then
/// `build` registers every capability (surfacing duplicate names before any
/// `ask` call) and performs the one-time `set_functions` push to the model.
pub struct AgentBuilder {
    duty: Option<String>,
    capabilities: Vec<Capability>,
    chat_model: Box<dyn ChatModel>,
    config: DispatchConfig,
}

impl AgentBuilder {
    /// Set the duty description fed to the model as context.
    pub fn duty(mut self, duty: impl Into<String>) -> Self {
        self.duty = Some(duty.into());
        self
    }

    /// Add a capability to the agent's table.
    pub fn capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Set the round-trip cap for each `ask` call.
    pub fn max_round_trips(mut self, max_round_trips: usize) -> Self {
        self.config.max_round_trips = max_round_trips;
        self
    }

    /// Set the per-model-call timeout.
    pub fn round_trip_timeout(mut self, timeout: Duration) -> Self {
        self.config.round_trip_timeout = Some(timeout);
        self
    }

    /// Set the overall deadline for each `ask` call.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.config.deadline = Some(deadline);
        self
    }

    /// Build the agent, registering all capabilities and pushing the
    /// capability list to the chat model.
    pub fn build(self) -> Result<Agent, RegistrationError> {
        let mut capabilities = CapabilityRegistry::new();
        for capability in self.capabilities {
            capabilities.register(capability)?;
        }

        let mut chat_model = self.chat_model;
        chat_model.set_functions(&capabilities.descriptors());

        Ok(Agent {
            duty: self.duty.unwrap_or_else(|| DEFAULT_DUTY.to_string()),
            capabilities,
            chat_model,
            config: self.config,
        })
    }
}
