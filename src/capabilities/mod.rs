//! Capabilities — what an agent can do on the host's behalf.
//!
//! A capability pairs a machine-readable descriptor (name, description,
//! ordered typed parameters) with the host handler that executes it. The
//! registry keeps one agent's capability table, built declaratively at
//! construction time.

pub mod capability;
pub mod registry;

pub use capability::{
    Capability, CapabilityDescriptor, CapabilityFn, CapabilityParameter, ParameterType,
};
pub use registry::CapabilityRegistry;
