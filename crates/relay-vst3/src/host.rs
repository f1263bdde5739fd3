//! Handles to host-side VST3 objects.
//!
//! - [`HostContext`]: the `FUnknown` passed to `IPluginBase::initialize`
//! - [`ConnectionPeer`]: the `IConnectionPoint` passed to `connect`
//! - [`HostMessage`]: the `IMessage` passed to `notify`
//!
//! The context and messages are reference counted while held. The peer is
//! not: VST3 hosts keep both endpoints alive from `connect()` until
//! `disconnect()`, and holding a strong reference would create a cycle
//! between processor and controller.

use std::ffi::CStr;
use std::ptr::{self, NonNull};

use relay_core::{PeerRef, Status};
use vst3::Steinberg::Vst::{IConnectionPoint, IConnectionPointTrait, IMessage, IMessageTrait};
use vst3::Steinberg::FUnknown;
use vst3::{ComPtr, ComRef, Interface};

use crate::status::from_tresult;

// =============================================================================
// HostContext
// =============================================================================

/// The host context received by `initialize()`.
///
/// Holds a counted reference that is released when the component
/// terminates. The host may pass null; the handle is stored either way.
#[derive(Clone, Default)]
pub struct HostContext {
    unknown: Option<ComPtr<FUnknown>>,
}

// Safety: the context is only touched from the host's control thread, which
// VST3 serializes for a given component.
unsafe impl Send for HostContext {}

impl HostContext {
    /// Take a reference to the host's context object.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a valid `FUnknown` pointer.
    pub unsafe fn from_raw(ptr: *mut FUnknown) -> Self {
        Self {
            unknown: ComRef::from_raw(ptr).map(|unknown| unknown.to_com_ptr()),
        }
    }

    /// Returns true if the host passed null.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.unknown.is_none()
    }

    /// Raw pointer to the context, or null.
    #[inline]
    pub fn as_ptr(&self) -> *mut FUnknown {
        self.unknown
            .as_ref()
            .map_or(ptr::null_mut(), |unknown| unknown.as_ptr())
    }

    /// Query the context for a host interface (e.g. `IHostApplication`).
    pub fn query<I: Interface>(&self) -> Option<ComPtr<I>> {
        self.unknown.as_ref().and_then(|unknown| unknown.cast::<I>())
    }
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HostContext").field(&self.as_ptr()).finish()
    }
}

// =============================================================================
// ConnectionPeer
// =============================================================================

/// Non-owning handle to the connected `IConnectionPoint`.
///
/// Compared by address. No reference is taken (see the module docs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionPeer {
    ptr: NonNull<IConnectionPoint>,
}

// Safety: the pointer is only dereferenced from the host's control thread.
unsafe impl Send for ConnectionPeer {}

impl ConnectionPeer {
    /// Wrap a peer pointer. Returns `None` for null.
    #[inline]
    pub fn from_raw(ptr: *mut IConnectionPoint) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr })
    }

    /// The raw peer pointer.
    #[inline]
    pub fn as_ptr(&self) -> *mut IConnectionPoint {
        self.ptr.as_ptr()
    }

    /// Forward a message to the peer's `notify()`.
    ///
    /// Result codes outside the protocol's three map to
    /// [`Status::SoftFailure`].
    ///
    /// # Safety
    ///
    /// The peer must still be alive, i.e. the host has not yet called
    /// `disconnect()` for it.
    pub unsafe fn send(&self, message: &HostMessage) -> Status {
        match ComRef::from_raw(self.as_ptr()) {
            Some(peer) => from_tresult(peer.notify(message.as_ptr())).unwrap_or(Status::SoftFailure),
            None => Status::InvalidArgument,
        }
    }
}

impl PeerRef for ConnectionPeer {
    #[inline]
    fn is_same_peer(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

// =============================================================================
// HostMessage
// =============================================================================

/// A message received from (or sent to) the peer.
#[derive(Clone)]
pub struct HostMessage {
    message: ComPtr<IMessage>,
}

// Safety: messages are only used on the host's control thread.
unsafe impl Send for HostMessage {}

impl HostMessage {
    /// Take a reference to a message. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a valid `IMessage` pointer.
    pub unsafe fn from_raw(ptr: *mut IMessage) -> Option<Self> {
        ComRef::from_raw(ptr).map(|message| Self {
            message: message.to_com_ptr(),
        })
    }

    /// The message identifier, if set and valid UTF-8.
    pub fn id(&self) -> Option<&str> {
        // Safety: the message is alive while self holds a reference, and
        // the id string is owned by the message.
        unsafe {
            let id = self.message.getMessageID();
            if id.is_null() {
                return None;
            }
            CStr::from_ptr(id.cast()).to_str().ok()
        }
    }

    /// Raw pointer to the message.
    #[inline]
    pub fn as_ptr(&self) -> *mut IMessage {
        self.message.as_ptr()
    }
}

impl std::fmt::Debug for HostMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostMessage")
            .field("id", &self.id())
            .finish()
    }
}
