//! Generic VST3 component wrapper.
//!
//! [`Vst3Component`] exposes any [`PluginComponent`] built on the VST3 handle
//! types as a COM object implementing `IPluginBase` and `IConnectionPoint`.
//!
//! ```text
//! User component (implements PluginComponent)
//!        ↓
//! Vst3Component<T> (this wrapper)
//!        ↓
//! VST3 COM interfaces (IPluginBase, IConnectionPoint)
//! ```
//!
//! Null pointers from the host become absent arguments, and the resulting
//! [`Status`](relay_core::Status) is returned as a `tresult`.

use std::cell::UnsafeCell;

use relay_core::PluginComponent;
use vst3::Steinberg::Vst::{IConnectionPoint, IConnectionPointTrait, IMessage};
use vst3::Steinberg::{tresult, FUnknown, IPluginBase, IPluginBaseTrait};
use vst3::Class;

use crate::host::{ConnectionPeer, HostContext, HostMessage};
use crate::status::to_tresult;

/// A [`PluginComponent`] that speaks in VST3 handle types.
///
/// Implemented automatically for every component with the matching
/// associated types.
pub trait HostComponent:
    PluginComponent<Context = HostContext, Peer = ConnectionPeer, Message = HostMessage> + 'static
{
}

impl<T> HostComponent for T where
    T: PluginComponent<Context = HostContext, Peer = ConnectionPeer, Message = HostMessage>
        + 'static
{
}

/// COM wrapper around a [`HostComponent`].
///
/// # Example
///
/// ```ignore
/// let component = ComWrapper::new(Vst3Component::new(MyComponent::default()));
/// let connection_point = component.to_com_ptr::<IConnectionPoint>().unwrap();
/// ```
pub struct Vst3Component<T> {
    inner: UnsafeCell<T>,
}

// Safety: Vst3Component is Send because the wrapped component is Send
// (required by PluginComponent).
unsafe impl<T: Send> Send for Vst3Component<T> {}

// Safety: Vst3Component is Sync because VST3 calls IPluginBase and
// IConnectionPoint from the UI thread only, never concurrently for one
// instance.
unsafe impl<T: Send> Sync for Vst3Component<T> {}

impl<T> Vst3Component<T> {
    /// Wrap a component.
    pub fn new(component: T) -> Self {
        Self {
            inner: UnsafeCell::new(component),
        }
    }

    /// Unwrap the component.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }

    /// Shared access to the wrapped component.
    ///
    /// # Safety
    ///
    /// No host call may be in progress on this instance.
    #[inline]
    pub unsafe fn component(&self) -> &T {
        &*self.inner.get()
    }

    /// Exclusive access to the wrapped component.
    ///
    /// # Safety
    ///
    /// Must only be called from host entry points, which VST3 serializes.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    unsafe fn component_mut(&self) -> &mut T {
        &mut *self.inner.get()
    }
}

impl<T: HostComponent> Class for Vst3Component<T> {
    type Interfaces = (IPluginBase, IConnectionPoint);
}

// =============================================================================
// IPluginBase implementation
// =============================================================================

impl<T: HostComponent> IPluginBaseTrait for Vst3Component<T> {
    unsafe fn initialize(&self, context: *mut FUnknown) -> tresult {
        let context = HostContext::from_raw(context);
        if context.is_null() {
            log::debug!("IPluginBase::initialize called without host context");
        }
        to_tresult(self.component_mut().initialize(context))
    }

    unsafe fn terminate(&self) -> tresult {
        to_tresult(self.component_mut().terminate())
    }
}

// =============================================================================
// IConnectionPoint implementation
// =============================================================================

impl<T: HostComponent> IConnectionPointTrait for Vst3Component<T> {
    unsafe fn connect(&self, other: *mut IConnectionPoint) -> tresult {
        to_tresult(self.component_mut().connect(ConnectionPeer::from_raw(other)))
    }

    unsafe fn disconnect(&self, other: *mut IConnectionPoint) -> tresult {
        let peer = ConnectionPeer::from_raw(other);
        to_tresult(self.component_mut().disconnect(peer.as_ref()))
    }

    unsafe fn notify(&self, message: *mut IMessage) -> tresult {
        let message = HostMessage::from_raw(message);
        to_tresult(self.component_mut().notify(message.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::host_message;
    use relay_core::{ComponentBase, LifecycleState, Status};
    use std::ptr;
    use std::sync::{Arc, Mutex};
    use vst3::Steinberg::{kInvalidArgument, kResultFalse, kResultOk};
    use vst3::ComWrapper;

    #[derive(Default)]
    struct Endpoint {
        base: ComponentBase<HostContext, ConnectionPeer, HostMessage>,
    }

    impl PluginComponent for Endpoint {
        type Context = HostContext;
        type Peer = ConnectionPeer;
        type Message = HostMessage;

        fn base(&self) -> &ComponentBase<HostContext, ConnectionPeer, HostMessage> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ComponentBase<HostContext, ConnectionPeer, HostMessage> {
            &mut self.base
        }
    }

    #[test]
    fn test_lifecycle_through_com() {
        let component = ComWrapper::new(Vst3Component::new(Endpoint::default()));
        let plugin_base = component.to_com_ptr::<IPluginBase>().unwrap();

        unsafe {
            assert_eq!(plugin_base.initialize(ptr::null_mut()), kResultOk);
            assert_eq!(component.component().base().lifecycle(), LifecycleState::Initialized);

            assert_eq!(plugin_base.terminate(), kResultOk);
            assert_eq!(component.component().base().lifecycle(), LifecycleState::Terminated);
        }
    }

    #[test]
    fn test_connection_through_com() {
        let a = ComWrapper::new(Vst3Component::new(Endpoint::default()));
        let b = ComWrapper::new(Vst3Component::new(Endpoint::default()));
        let a_point = a.to_com_ptr::<IConnectionPoint>().unwrap();
        let b_point = b.to_com_ptr::<IConnectionPoint>().unwrap();

        unsafe {
            assert_eq!(a_point.connect(ptr::null_mut()), kInvalidArgument);
            assert_eq!(a_point.connect(b_point.as_ptr()), kResultOk);
            assert_eq!(a_point.connect(a_point.as_ptr()), kResultFalse);
            assert_eq!(
                a.component().base().peer().map(|p| p.as_ptr()),
                Some(b_point.as_ptr())
            );

            // Wrong peer and null peer are both refused
            assert_eq!(a_point.disconnect(a_point.as_ptr()), kResultFalse);
            assert_eq!(a_point.disconnect(ptr::null_mut()), kResultFalse);
            assert_eq!(a_point.disconnect(b_point.as_ptr()), kResultOk);
            assert!(!a.component().base().is_connected());
        }
    }

    #[test]
    fn test_notify_through_com() {
        let component = ComWrapper::new(Vst3Component::new(Endpoint::default()));
        let point = component.to_com_ptr::<IConnectionPoint>().unwrap();

        unsafe {
            assert_eq!(point.notify(ptr::null_mut()), kInvalidArgument);
        }
    }

    /// An endpoint whose single observer records received message ids.
    fn recording_endpoint() -> (Endpoint, Arc<Mutex<Vec<String>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let mut endpoint = Endpoint::default();
        endpoint.base.subscribe(move |message: &HostMessage| {
            sink.lock()
                .unwrap()
                .push(message.id().unwrap_or_default().to_string());
        });
        (endpoint, received)
    }

    #[test]
    fn test_notify_message_through_com() {
        let (endpoint, received) = recording_endpoint();
        let component = ComWrapper::new(Vst3Component::new(endpoint));
        let point = component.to_com_ptr::<IConnectionPoint>().unwrap();
        let message = host_message(c"ping");

        unsafe {
            assert_eq!(point.notify(message.as_ptr()), kResultOk);
        }
        assert_eq!(*received.lock().unwrap(), vec!["ping".to_string()]);

        // Without observers the message is refused softly
        let silent = ComWrapper::new(Vst3Component::new(Endpoint::default()));
        let silent_point = silent.to_com_ptr::<IConnectionPoint>().unwrap();
        unsafe {
            assert_eq!(silent_point.notify(message.as_ptr()), kResultFalse);
        }
    }

    #[test]
    fn test_peer_send_reaches_wrapped_component() {
        let (endpoint, received) = recording_endpoint();
        let component = ComWrapper::new(Vst3Component::new(endpoint));
        let point = component.to_com_ptr::<IConnectionPoint>().unwrap();
        let peer = ConnectionPeer::from_raw(point.as_ptr()).unwrap();

        let status = unsafe { peer.send(&host_message(c"ping")) };
        assert_eq!(status, Status::Success);
        assert_eq!(*received.lock().unwrap(), vec!["ping".to_string()]);

        let silent = ComWrapper::new(Vst3Component::new(Endpoint::default()));
        let silent_point = silent.to_com_ptr::<IConnectionPoint>().unwrap();
        let silent_peer = ConnectionPeer::from_raw(silent_point.as_ptr()).unwrap();
        let status = unsafe { silent_peer.send(&host_message(c"ping")) };
        assert_eq!(status, Status::SoftFailure);
    }

    #[test]
    fn test_terminate_drops_peer() {
        let a = ComWrapper::new(Vst3Component::new(Endpoint::default()));
        let b = ComWrapper::new(Vst3Component::new(Endpoint::default()));
        let a_base = a.to_com_ptr::<IPluginBase>().unwrap();
        let a_point = a.to_com_ptr::<IConnectionPoint>().unwrap();
        let b_point = b.to_com_ptr::<IConnectionPoint>().unwrap();

        unsafe {
            assert_eq!(a_base.initialize(ptr::null_mut()), kResultOk);
            assert_eq!(a_point.connect(b_point.as_ptr()), kResultOk);
            assert_eq!(a_base.terminate(), kResultOk);
            assert!(a.component().base().peer().is_none());

            // Peer slot is free again after re-initialization
            assert_eq!(a_base.initialize(ptr::null_mut()), kResultOk);
            assert_eq!(a_point.connect(b_point.as_ptr()), kResultOk);
        }
    }

    #[test]
    fn test_into_inner() {
        let wrapper = Vst3Component::new(Endpoint::default());
        let endpoint = wrapper.into_inner();
        assert_eq!(endpoint.base().lifecycle(), LifecycleState::Uninitialized);
    }
}
