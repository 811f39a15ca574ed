//! Capability registry — the ordered capability table for one agent.
//!
//! Holds the capabilities an agent exposes to its chat model, in
//! registration order. Duplicate names are a configuration error reported
//! at registration time, not at call time. Pure in-memory structure; the
//! registry is built exactly once, at agent construction, and its
//! descriptor list is pushed to the chat model in a one-time call.

use std::collections::HashMap;

use super::capability::{Capability, CapabilityDescriptor};
use crate::utilities::errors::RegistrationError;

/// Ordered, name-indexed set of capabilities.
#[derive(Debug, Default, Clone)]
pub struct CapabilityRegistry {
    /// Capabilities in registration order.
    capabilities: Vec<Capability>,
    /// Name → position in `capabilities`.
    index: HashMap<String, usize>,
}

impl CapabilityRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability.
    ///
    /// Order of registration is preserved and determines the order of
    /// [`CapabilityRegistry::descriptors`]. Registering a second capability
    /// under an existing name fails.
    pub fn register(&mut self, capability: Capability) -> Result<(), RegistrationError> {
        let name = capability.name().to_string();
        if self.index.contains_key(&name) {
            return Err(RegistrationError::DuplicateName { name });
        }
        self.index.insert(name, self.capabilities.len());
        self.capabilities.push(capability);
        Ok(())
    }

    /// Resolve a capability by exact name.
    pub fn get(&self, name: &str) -> Option<&Capability> {
        self.index.get(name).map(|&i| &self.capabilities[i])
    }

    /// Ordered snapshot of the machine-readable capability list.
    pub fn descriptors(&self) -> Vec<CapabilityDescriptor> {
        self.capabilities
            .iter()
            .map(|c| c.descriptor().clone())
            .collect()
    }

    /// Capability names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.capabilities.iter().map(|c| c.name()).collect()
    }

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Iterate over capabilities in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.capabilities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn capability(name: &str) -> Capability {
        Capability::new(name, format!("{} capability", name), Arc::new(|_| Ok(String::new())))
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CapabilityRegistry::new();
        registry.register(capability("search")).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.get("search").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut registry = CapabilityRegistry::new();
        registry.register(capability("search")).unwrap();

        let err = registry.register(capability("search")).unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::DuplicateName { ref name } if name == "search"
        ));
        // The first registration is untouched.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_descriptors_preserve_registration_order() {
        let mut registry = CapabilityRegistry::new();
        registry.register(capability("alpha")).unwrap();
        registry.register(capability("beta")).unwrap();
        registry.register(capability("gamma")).unwrap();

        let names: Vec<String> = registry
            .descriptors()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
        assert_eq!(registry.names(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = CapabilityRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.descriptors().is_empty());
    }
}
