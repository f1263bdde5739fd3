//! Message observer registry.
//!
//! Observers are plain closures. `dispatch` calls them synchronously, in the
//! order they were subscribed, on the thread that delivered the message.

/// Handle returned by [`MessageObservers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

type Observer<M> = Box<dyn FnMut(&M) + Send>;

/// Ordered list of message observers.
pub struct MessageObservers<M> {
    observers: Vec<(ObserverId, Observer<M>)>,
    next_id: u64,
}

impl<M> Default for MessageObservers<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> MessageObservers<M> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
        }
    }

    /// Append an observer. It runs after every observer already registered.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&M) + Send + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Number of registered observers.
    #[inline]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns true if nobody is listening.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Call every observer with `message`, in registration order.
    ///
    /// Returns how many observers ran.
    pub fn dispatch(&mut self, message: &M) -> usize {
        for (_, observer) in self.observers.iter_mut() {
            observer(message);
        }
        self.observers.len()
    }

    /// Remove all observers.
    pub fn clear(&mut self) {
        self.observers.clear();
    }
}

impl<M> std::fmt::Debug for MessageObservers<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageObservers")
            .field("len", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut observers = MessageObservers::new();

        for tag in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            observers.subscribe(move |msg: &u32| log.lock().unwrap().push((tag, *msg)));
        }

        assert_eq!(observers.dispatch(&7), 3);
        assert_eq!(
            *log.lock().unwrap(),
            vec![("first", 7), ("second", 7), ("third", 7)]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut observers: MessageObservers<()> = MessageObservers::new();
        let a = observers.subscribe(|_| {});
        let b = observers.subscribe(|_| {});
        assert_ne!(a, b);

        assert!(observers.unsubscribe(a));
        assert!(!observers.unsubscribe(a));
        assert_eq!(observers.len(), 1);
        assert_eq!(observers.dispatch(&()), 1);

        observers.clear();
        assert!(observers.is_empty());
        assert_eq!(observers.dispatch(&()), 0);
    }
}
