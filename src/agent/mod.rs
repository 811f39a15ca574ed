//! Agent module — the dispatch-loop orchestrator.

pub mod core;

pub use core::{Agent, AgentBuilder, DispatchConfig, DEFAULT_DUTY, DEFAULT_MAX_ROUND_TRIPS};
