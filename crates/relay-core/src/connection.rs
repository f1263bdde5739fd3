//! Single-peer connection tracking.
//!
//! A component may be linked to at most one peer at a time (typically the
//! processor linked to its edit controller). The component never owns the
//! peer: it holds a weak handle and compares handles by identity.

use std::sync::Weak;

use crate::status::Status;

/// A non-owning handle to a connection endpoint.
///
/// Implementations compare by identity, never by value: two handles are the
/// same peer only if they point at the same endpoint.
pub trait PeerRef {
    /// Returns true if both handles refer to the same endpoint.
    fn is_same_peer(&self, other: &Self) -> bool;
}

impl<T: ?Sized> PeerRef for Weak<T> {
    #[inline]
    fn is_same_peer(&self, other: &Self) -> bool {
        Weak::ptr_eq(self, other)
    }
}

/// Whether a peer is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No peer held.
    #[default]
    Disconnected,
    /// Exactly one peer held.
    Connected,
}

/// Holder for the single peer slot.
#[derive(Debug)]
pub struct Connection<P> {
    peer: Option<P>,
}

impl<P> Default for Connection<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Connection<P> {
    /// Create a disconnected slot.
    pub const fn new() -> Self {
        Self { peer: None }
    }

    /// The held peer, if any.
    #[inline]
    pub fn peer(&self) -> Option<&P> {
        self.peer.as_ref()
    }

    /// Current connection state.
    #[inline]
    pub fn state(&self) -> ConnectionState {
        if self.peer.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Drop the held peer unconditionally and return it.
    pub fn clear(&mut self) -> Option<P> {
        self.peer.take()
    }
}

impl<P: PeerRef> Connection<P> {
    /// Store `peer` if the slot is empty.
    ///
    /// - absent peer: [`Status::InvalidArgument`]
    /// - slot already taken: [`Status::SoftFailure`], existing peer kept
    pub fn connect(&mut self, peer: Option<P>) -> Status {
        let Some(peer) = peer else {
            log::debug!("connect rejected: no peer given");
            return Status::InvalidArgument;
        };
        if self.peer.is_some() {
            log::debug!("connect rejected: already connected");
            return Status::SoftFailure;
        }
        self.peer = Some(peer);
        Status::Success
    }

    /// Clear the slot if it holds `peer`.
    ///
    /// Returns [`Status::SoftFailure`] with no state change when nothing is
    /// held, when `peer` is absent, or when it is a different endpoint.
    pub fn disconnect(&mut self, peer: Option<&P>) -> Status {
        let is_held = match (&self.peer, peer) {
            (Some(held), Some(peer)) => held.is_same_peer(peer),
            _ => false,
        };
        if is_held {
            self.peer = None;
            return Status::Success;
        }

        if self.peer.is_none() {
            log::debug!("disconnect rejected: not connected");
        } else {
            log::debug!("disconnect rejected: peer mismatch");
        }
        Status::SoftFailure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Endpoint;

    #[test]
    fn test_weak_identity() {
        let a = Arc::new(Endpoint);
        let b = Arc::new(Endpoint);

        assert!(Arc::downgrade(&a).is_same_peer(&Arc::downgrade(&a)));
        assert!(!Arc::downgrade(&a).is_same_peer(&Arc::downgrade(&b)));
    }

    #[test]
    fn test_connect_and_disconnect() {
        let a = Arc::new(Endpoint);
        let mut connection = Connection::new();
        assert_eq!(connection.state(), ConnectionState::Disconnected);

        assert_eq!(connection.connect(Some(Arc::downgrade(&a))), Status::Success);
        assert_eq!(connection.state(), ConnectionState::Connected);

        assert_eq!(connection.disconnect(Some(&Arc::downgrade(&a))), Status::Success);
        assert_eq!(connection.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_connect_absent_peer() {
        let mut connection: Connection<Weak<Endpoint>> = Connection::new();
        assert_eq!(connection.connect(None), Status::InvalidArgument);
        assert!(connection.peer().is_none());
    }

    #[test]
    fn test_disconnect_when_empty() {
        let a = Arc::new(Endpoint);
        let mut connection: Connection<Weak<Endpoint>> = Connection::default();
        assert_eq!(connection.disconnect(Some(&Arc::downgrade(&a))), Status::SoftFailure);
        assert_eq!(connection.disconnect(None), Status::SoftFailure);
    }

    #[test]
    fn test_held_peer_does_not_keep_endpoint_alive() {
        let a = Arc::new(Endpoint);
        let mut connection = Connection::new();
        connection.connect(Some(Arc::downgrade(&a)));
        drop(a);

        let held = connection.peer().unwrap();
        assert!(held.upgrade().is_none());
        assert!(connection.clear().is_some());
        assert_eq!(connection.state(), ConnectionState::Disconnected);
    }
}
