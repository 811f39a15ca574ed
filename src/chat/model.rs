//! The chat-model collaborator contract.

use async_trait::async_trait;

use super::response::ChatModelResponse;
use crate::capabilities::CapabilityDescriptor;

/// Abstract contract for the external chat-completion service.
///
/// Implementors own the conversation history, the network client, and the
/// provider-specific wire format. The dispatch loop only depends on this
/// trait: it registers the capability list once, then alternates between
/// user messages and function results until the model produces a terminal
/// message.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Register the agent's capability list with the model.
    ///
    /// Called exactly once, at agent construction.
    fn set_functions(&mut self, capabilities: &[CapabilityDescriptor]);

    /// Send the user's message and wait for the model's reply.
    async fn send_user_message(&mut self, text: &str) -> ChatModelResponse;

    /// Send a function result back and wait for the model's next reply.
    ///
    /// Synthesized failure messages travel through this same channel; from
    /// the model's perspective they are indistinguishable from successful
    /// results.
    async fn send_function_result(
        &mut self,
        function_name: &str,
        result: &str,
    ) -> ChatModelResponse;
}
