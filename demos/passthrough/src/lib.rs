//! Relay Passthrough - Example plugin built on the Relay base layer.
//!
//! This plugin shows how to:
//! 1. Describe the channel layout with a static `RouterConfig`
//! 2. Keep the default fan-out routing and post-process the result
//! 3. Accept a host pan-law offer through `set_pan_law()`
//! 4. Reuse `ComponentBase` for the lifecycle and peer connection
//! 5. Observe peer messages with `subscribe()` and `on_message()`, and send
//!    messages back with `ConnectionPeer::send()`
//! 6. Wrap the component for a VST3 host with `Vst3Component`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use relay::prelude::*;
use relay::vst3_impl::vst3::ComWrapper;

// =============================================================================
// Plugin Configuration
// =============================================================================

/// Stereo in, stereo out, no tail.
pub static CONFIG: RouterConfig = RouterConfig::stereo();

/// Balance position used once a pan law has been negotiated (0.5 = center).
const BALANCE: f32 = 0.5;

/// Component state type shared by the plugin and its tests.
type Base = ComponentBase<HostContext, ConnectionPeer, HostMessage>;

// =============================================================================
// Plugin
// =============================================================================

/// Stereo passthrough with optional pan-law balance.
pub struct Passthrough {
    router: RouterState,
    base: Base,
    pan_law: Option<(PanLaw, f32)>,
    messages: Arc<AtomicUsize>,
}

impl Passthrough {
    /// Create the plugin with its static layout.
    pub fn new() -> Self {
        let messages = Arc::new(AtomicUsize::new(0));
        let mut base = Base::new();

        let counter = Arc::clone(&messages);
        base.subscribe(move |_message: &HostMessage| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        Self {
            router: RouterState::from_config(&CONFIG),
            base,
            pan_law: None,
            messages,
        }
    }

    /// The accepted pan law and its gain, if the host offered one.
    pub fn pan_law(&self) -> Option<(PanLaw, f32)> {
        self.pan_law
    }

    /// Number of peer messages received so far.
    pub fn messages_received(&self) -> usize {
        self.messages.load(Ordering::Relaxed)
    }

    /// Forward a message to the connected peer.
    ///
    /// Returns [`Status::SoftFailure`] when no peer is connected.
    pub fn send_to_peer(&self, message: &HostMessage) -> Status {
        match self.base.peer() {
            // Safety: the host keeps the peer alive until it calls disconnect(),
            // which clears it from the base.
            Some(peer) => unsafe { peer.send(message) },
            None => {
                log::debug!("No peer connected, dropping {:?}", message.id());
                Status::SoftFailure
            }
        }
    }

    /// Scale a stereo output pair by the negotiated pan law.
    fn apply_balance(&self, outputs: &mut [AudioBuffer<'_, f32>]) {
        let Some((law, gain)) = self.pan_law else {
            return;
        };
        let (left_gain, right_gain) = law.gains(BALANCE, gain);

        if let [left, right, ..] = outputs {
            for (samples, g) in [(left, left_gain), (right, right_gain)] {
                if let Some(samples) = samples.as_mut_slice() {
                    samples.iter_mut().for_each(|s| *s *= g);
                }
            }
        }
    }
}

impl Default for Passthrough {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Audio path
// =============================================================================

impl AudioChannelRouter for Passthrough {
    fn router_state(&self) -> &RouterState {
        &self.router
    }

    fn router_state_mut(&mut self) -> &mut RouterState {
        &mut self.router
    }

    fn process(&mut self, inputs: &[AudioBuffer<'_, f32>], outputs: &mut [AudioBuffer<'_, f32>]) {
        if let Err(err) = route_channels(inputs, outputs) {
            report_route_error(&err);
            return;
        }
        self.apply_balance(outputs);
    }

    fn set_pan_law(&mut self, law: PanLaw, gain: f32) -> bool {
        if !(gain > 0.0 && gain <= 1.0) {
            log::debug!("Rejected pan law {:?} with gain {}", law, gain);
            return false;
        }
        log::info!("Accepted pan law {:?} with gain {}", law, gain);
        self.pan_law = Some((law, gain));
        true
    }
}

// =============================================================================
// Control path
// =============================================================================

impl PluginComponent for Passthrough {
    type Context = HostContext;
    type Peer = ConnectionPeer;
    type Message = HostMessage;

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn on_message(&mut self, message: &HostMessage) -> bool {
        log::debug!("Passthrough received {:?}", message.id());
        self.base.dispatch(message)
    }
}

/// Build the COM object handed to a VST3 host.
pub fn create_component() -> ComWrapper<Vst3Component<Passthrough>> {
    ComWrapper::new(Vst3Component::new(Passthrough::new()))
}
