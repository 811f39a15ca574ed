//! Chat module — the external chat-model collaborator boundary.
//!
//! Defines the response shapes the dispatch loop interprets and the
//! [`ChatModel`] trait a provider client must implement. Wire protocol,
//! prompt composition, and history management all live behind the trait.

pub mod model;
pub mod response;

pub use model::ChatModel;
pub use response::{ChatModelResponse, FunctionCall};
