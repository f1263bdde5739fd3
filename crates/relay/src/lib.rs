//! # Relay
//!
//! Plugin base layer for Rust.
//!
//! Relay provides the behavior every hosted audio plugin shares before it
//! adds its own DSP: default channel routing and a single-peer component
//! lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! Your Plugin (implements AudioChannelRouter + PluginComponent)
//!        ↓
//! Vst3Component<P> (VST3 boundary wrapper)
//!        ↓
//! VST3 COM interfaces
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay::prelude::*;
//!
//! static CONFIG: RouterConfig = RouterConfig::stereo();
//!
//! struct Through { router: RouterState }
//!
//! impl AudioChannelRouter for Through {
//!     fn router_state(&self) -> &RouterState { &self.router }
//!     fn router_state_mut(&mut self) -> &mut RouterState { &mut self.router }
//! }
//!
//! let mut plugin = Through { router: RouterState::from_config(&CONFIG) };
//! plugin.process(&inputs, &mut outputs);
//! ```

// Re-export sub-crates
pub use relay_core as core;
#[cfg(feature = "vst3")]
pub use relay_vst3 as vst3_impl;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use relay::prelude::*;
/// ```
pub mod prelude {
    pub use relay_core::{
        // Audio path
        AudioBuffer, AudioChannelRouter, PanLaw, RouterConfig, RouterState, Sample,
        // Routing helpers
        copy_channel, fan_out, report_route_error, route_channels, Route, RouteError, RouteResult,
        // Control path
        ComponentBase, ConnectionState, LifecycleState, ObserverId, PeerRef, PluginComponent,
        ServiceContainer, Status,
    };

    #[cfg(feature = "vst3")]
    pub use relay_vst3::{ConnectionPeer, HostContext, HostMessage, Vst3Component};
}
