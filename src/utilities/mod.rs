//! Shared utilities for the agent dispatch loop.

pub mod errors;
