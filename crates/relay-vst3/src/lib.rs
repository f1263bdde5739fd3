//! # relay-vst3
//!
//! VST3 boundary layer for the Relay plugin base layer.
//!
//! This crate exposes `relay-core` components to a VST3 host. It handles the
//! COM-level details:
//!
//! - Host handles ([`HostContext`], [`ConnectionPeer`], [`HostMessage`])
//! - Generic component wrapper ([`Vst3Component`]) implementing
//!   `IPluginBase` and `IConnectionPoint`
//! - [`Status`](relay_core::Status) to `tresult` translation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relay_core::{ComponentBase, PluginComponent};
//! use relay_vst3::{vst3, ConnectionPeer, HostContext, HostMessage, Vst3Component};
//!
//! #[derive(Default)]
//! struct MyController {
//!     base: ComponentBase<HostContext, ConnectionPeer, HostMessage>,
//! }
//!
//! impl PluginComponent for MyController {
//!     type Context = HostContext;
//!     type Peer = ConnectionPeer;
//!     type Message = HostMessage;
//!     fn base(&self) -> &ComponentBase<HostContext, ConnectionPeer, HostMessage> { &self.base }
//!     fn base_mut(&mut self) -> &mut ComponentBase<HostContext, ConnectionPeer, HostMessage> { &mut self.base }
//! }
//!
//! let com = vst3::ComWrapper::new(Vst3Component::new(MyController::default()));
//! ```

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

pub mod component;
pub mod host;
pub mod status;

#[cfg(test)]
mod testing;

// Re-exports
pub use component::{HostComponent, Vst3Component};
pub use host::{ConnectionPeer, HostContext, HostMessage};
pub use status::{from_tresult, to_tresult};

// Re-export the vst3 crate for downstream use
pub use vst3;
