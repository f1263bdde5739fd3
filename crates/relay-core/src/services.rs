//! Host service container.
//!
//! Holds the opaque context the host passes to `initialize()` together with
//! any typed services the plugin derives from it. Everything is dropped when
//! the component terminates, so no service outlives the host context it was
//! obtained from.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Container for the host context and derived services.
pub struct ServiceContainer<C> {
    context: Option<C>,
    services: HashMap<TypeId, Box<dyn Any + Send>>,
    disposed: bool,
}

impl<C> Default for ServiceContainer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ServiceContainer<C> {
    /// Create an empty container.
    pub fn new() -> Self {
        Self {
            context: None,
            services: HashMap::new(),
            disposed: false,
        }
    }

    /// Store the host context, replacing any previous one.
    ///
    /// Re-arms a disposed container.
    pub fn set_context(&mut self, context: C) {
        self.context = Some(context);
        self.disposed = false;
    }

    /// The stored host context.
    #[inline]
    pub fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    /// Register a service, returning the one it replaces.
    pub fn register<T: Any + Send>(&mut self, service: T) -> Option<T> {
        self.services
            .insert(TypeId::of::<T>(), Box::new(service))
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|previous| *previous)
    }

    /// Look up a service by type.
    pub fn get<T: Any + Send>(&self) -> Option<&T> {
        self.services
            .get(&TypeId::of::<T>())
            .and_then(|service| service.downcast_ref::<T>())
    }

    /// Look up a service by type, mutably.
    pub fn get_mut<T: Any + Send>(&mut self) -> Option<&mut T> {
        self.services
            .get_mut(&TypeId::of::<T>())
            .and_then(|service| service.downcast_mut::<T>())
    }

    /// Returns true if a service of type `T` is registered.
    pub fn contains<T: Any + Send>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered services (the context is not counted).
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns true if no services are registered.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Release the context and every service.
    ///
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        self.services.clear();
        self.context = None;
        self.disposed = true;
    }

    /// Returns true between `dispose()` and the next `set_context()`.
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<C> std::fmt::Debug for ServiceContainer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("has_context", &self.context.is_some())
            .field("services", &self.services.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct HostName(&'static str);

    #[test]
    fn test_context_roundtrip() {
        let mut services = ServiceContainer::new();
        assert!(services.context().is_none());

        services.set_context(1u32);
        services.set_context(2u32);
        assert_eq!(services.context(), Some(&2));
    }

    #[test]
    fn test_typed_services() {
        let mut services: ServiceContainer<()> = ServiceContainer::new();
        assert!(services.register(HostName("first")).is_none());
        assert_eq!(services.register(HostName("second")), Some(HostName("first")));

        assert!(services.contains::<HostName>());
        assert!(!services.contains::<u64>());
        assert_eq!(services.get::<HostName>(), Some(&HostName("second")));

        services.get_mut::<HostName>().unwrap().0 = "third";
        assert_eq!(services.get::<HostName>().unwrap().0, "third");
        assert_eq!(services.len(), 1);
    }

    #[test]
    fn test_dispose() {
        let mut services = ServiceContainer::new();
        services.set_context("host");
        services.register(HostName("daw"));

        services.dispose();
        services.dispose();
        assert!(services.is_disposed());
        assert!(services.context().is_none());
        assert!(services.is_empty());

        services.set_context("other host");
        assert!(!services.is_disposed());
        assert_eq!(services.context(), Some(&"other host"));
    }
}
