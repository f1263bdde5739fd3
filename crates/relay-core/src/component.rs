//! Component lifecycle and peer connection.
//!
//! This module defines the control-path half of a plugin:
//!
//! - **[`ComponentBase`]**: the state every component carries (host context,
//!   peer slot, message observers).
//! - **[`PluginComponent`]**: the operations the host drives, each with a
//!   default implementation on top of `ComponentBase`.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --initialize--> Initialized --terminate--> Terminated
//!                                    ^                          |
//!                                    +-------initialize---------+
//!
//! Within Initialized:  Disconnected <--connect/disconnect--> Connected
//! ```
//!
//! # Threading
//!
//! All operations here run on the host's control thread and are never
//! called concurrently with each other. The host also guarantees that
//! `initialize()` returns before audio processing starts. No locking is done
//! here; a component used outside that contract must add its own.

use crate::connection::{Connection, ConnectionState, PeerRef};
use crate::observers::{MessageObservers, ObserverId};
use crate::services::ServiceContainer;
use crate::status::Status;

/// Position on the context axis of the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Created, `initialize()` not called yet.
    #[default]
    Uninitialized,
    /// Host context available.
    Initialized,
    /// `terminate()` called; the host context is gone.
    Terminated,
}

// =============================================================================
// ComponentBase
// =============================================================================

/// Shared state behind the default [`PluginComponent`] operations.
///
/// # Type Parameters
///
/// - `C`: the host context handed to `initialize()`
/// - `P`: the peer handle, compared by identity
/// - `M`: the message type delivered by `notify()`
pub struct ComponentBase<C, P, M> {
    lifecycle: LifecycleState,
    services: ServiceContainer<C>,
    connection: Connection<P>,
    observers: MessageObservers<M>,
}

impl<C, P, M> Default for ComponentBase<C, P, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, P, M> ComponentBase<C, P, M> {
    /// Create an uninitialized, disconnected component.
    pub fn new() -> Self {
        Self {
            lifecycle: LifecycleState::Uninitialized,
            services: ServiceContainer::new(),
            connection: Connection::new(),
            observers: MessageObservers::new(),
        }
    }

    /// Current position on the context axis.
    #[inline]
    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    /// Current position on the connection axis.
    #[inline]
    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Returns true while a peer is held.
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }

    /// The held peer, if any.
    #[inline]
    pub fn peer(&self) -> Option<&P> {
        self.connection.peer()
    }

    /// The host context stored by the last `initialize()`.
    ///
    /// `None` before initialization and after termination.
    #[inline]
    pub fn context(&self) -> Option<&C> {
        self.services.context()
    }

    /// Services derived from the host context.
    #[inline]
    pub fn services(&self) -> &ServiceContainer<C> {
        &self.services
    }

    /// Services derived from the host context, mutably.
    #[inline]
    pub fn services_mut(&mut self) -> &mut ServiceContainer<C> {
        &mut self.services
    }

    /// Register a message observer.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&M) + Send + 'static,
    {
        self.observers.subscribe(observer)
    }

    /// Remove a message observer.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of registered observers.
    #[inline]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Store the host context and enter [`LifecycleState::Initialized`].
    ///
    /// Overwrites any previous context. The context is not inspected.
    pub fn initialize(&mut self, context: C) -> Status {
        log::trace!("component: initialize");
        self.services.set_context(context);
        self.lifecycle = LifecycleState::Initialized;
        Status::Success
    }

    /// Drop the peer, dispose the services and enter
    /// [`LifecycleState::Terminated`].
    pub fn terminate(&mut self) -> Status {
        log::trace!("component: terminate");
        self.connection.clear();
        self.services.dispose();
        self.lifecycle = LifecycleState::Terminated;
        Status::Success
    }

    /// Deliver `message` to every observer, in registration order.
    ///
    /// Returns true if at least one observer ran.
    pub fn dispatch(&mut self, message: &M) -> bool {
        self.observers.dispatch(message) > 0
    }
}

impl<C, P: PeerRef, M> ComponentBase<C, P, M> {
    /// Link to `peer`. See [`Connection::connect`].
    pub fn connect(&mut self, peer: Option<P>) -> Status {
        log::trace!("component: connect");
        self.connection.connect(peer)
    }

    /// Unlink from `peer`. See [`Connection::disconnect`].
    pub fn disconnect(&mut self, peer: Option<&P>) -> Status {
        log::trace!("component: disconnect");
        self.connection.disconnect(peer)
    }
}

impl<C, P, M> std::fmt::Debug for ComponentBase<C, P, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentBase")
            .field("lifecycle", &self.lifecycle)
            .field("connection", &self.connection.state())
            .field("services", &self.services)
            .field("observers", &self.observers)
            .finish()
    }
}

// =============================================================================
// PluginComponent Trait
// =============================================================================

/// The control-path half of a plugin.
///
/// Only [`base`](Self::base) and [`base_mut`](Self::base_mut) are required.
/// A component that wants to react to messages itself overrides
/// [`on_message`](Self::on_message) instead of registering observers.
///
/// # Example
///
/// ```ignore
/// struct Controller {
///     base: ComponentBase<HostContext, ConnectionPeer, HostMessage>,
/// }
///
/// impl PluginComponent for Controller {
///     type Context = HostContext;
///     type Peer = ConnectionPeer;
///     type Message = HostMessage;
///
///     fn base(&self) -> &ComponentBase<HostContext, ConnectionPeer, HostMessage> { &self.base }
///     fn base_mut(&mut self) -> &mut ComponentBase<HostContext, ConnectionPeer, HostMessage> { &mut self.base }
/// }
/// ```
pub trait PluginComponent: Send {
    /// Host context handed to `initialize()`.
    type Context;
    /// Non-owning handle to the connected peer.
    type Peer: PeerRef;
    /// Payload delivered by `notify()`.
    type Message;

    /// State backing the default implementations.
    fn base(&self) -> &ComponentBase<Self::Context, Self::Peer, Self::Message>;

    /// Mutable state backing the default implementations.
    fn base_mut(&mut self) -> &mut ComponentBase<Self::Context, Self::Peer, Self::Message>;

    /// Store the host context. Always succeeds.
    fn initialize(&mut self, context: Self::Context) -> Status {
        self.base_mut().initialize(context)
    }

    /// Drop the peer and every host service. Always succeeds.
    fn terminate(&mut self) -> Status {
        self.base_mut().terminate()
    }

    /// Link to a peer.
    ///
    /// [`Status::InvalidArgument`] for an absent peer,
    /// [`Status::SoftFailure`] if a peer is already held.
    fn connect(&mut self, peer: Option<Self::Peer>) -> Status {
        self.base_mut().connect(peer)
    }

    /// Unlink from a peer.
    ///
    /// [`Status::SoftFailure`] unless `peer` is the one currently held.
    fn disconnect(&mut self, peer: Option<&Self::Peer>) -> Status {
        self.base_mut().disconnect(peer)
    }

    /// Receive a message from the peer.
    ///
    /// [`Status::InvalidArgument`] for an absent message (nothing is
    /// dispatched), [`Status::SoftFailure`] if nobody handled it.
    fn notify(&mut self, message: Option<&Self::Message>) -> Status {
        log::trace!("component: notify");
        let Some(message) = message else {
            log::debug!("notify rejected: no message given");
            return Status::InvalidArgument;
        };
        let handled = self.on_message(message);
        if !handled {
            log::debug!("notify: no observer handled the message");
        }
        Status::from_handled(handled)
    }

    /// Handle a message delivered by `notify()`.
    ///
    /// Returns true if the message was handled. The default forwards it to
    /// the registered observers.
    fn on_message(&mut self, message: &Self::Message) -> bool {
        self.base_mut().dispatch(message)
    }
}

impl<C, P, M> PluginComponent for ComponentBase<C, P, M>
where
    C: Send,
    P: PeerRef + Send,
{
    type Context = C;
    type Peer = P;
    type Message = M;

    fn base(&self) -> &ComponentBase<C, P, M> {
        self
    }

    fn base_mut(&mut self) -> &mut ComponentBase<C, P, M> {
        self
    }
}
