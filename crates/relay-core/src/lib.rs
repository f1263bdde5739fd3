//! # relay-core
//!
//! Core abstractions for the Relay plugin base layer.
//!
//! This crate provides the format-agnostic behavior every hosted audio plugin
//! inherits before it adds its own DSP. Its only dependency is the `log`
//! facade.
//!
//! ## Main Traits
//!
//! - [`AudioChannelRouter`] - Audio path: channel counts, negotiated rate and
//!   block size, default input-to-output routing, pan-law negotiation
//! - [`PluginComponent`] - Control path: initialize/terminate, single-peer
//!   connect/disconnect, message notification
//!
//! The two are independent. A concrete plugin implements both; the host
//! orders the calls (initialize, connect, process..., disconnect, terminate).
//!
//! ## Types
//!
//! - [`AudioBuffer`] - One channel of borrowed audio with a writable flag
//! - [`RouterState`] / [`RouterConfig`] - Router state and its static shape
//! - [`ComponentBase`] - Host context, peer slot and observers
//! - [`Status`] - Result code of every control operation
//! - [`RouteError`] - Channel routing precondition failures
//! - [`PanLaw`] - Negotiable pan-law conventions

pub mod buffer;
pub mod component;
pub mod config;
pub mod connection;
pub mod error;
pub mod observers;
pub mod pan_law;
pub mod router;
pub mod sample;
pub mod services;
pub mod status;

// Re-exports for convenience
pub use buffer::AudioBuffer;
pub use component::{ComponentBase, LifecycleState, PluginComponent};
pub use config::RouterConfig;
pub use connection::{Connection, ConnectionState, PeerRef};
pub use error::{RouteError, RouteResult};
pub use observers::{MessageObservers, ObserverId};
pub use pan_law::PanLaw;
pub use router::{copy_channel, fan_out, report_route_error, route_channels, AudioChannelRouter, FanOut, Route, RouterState};
pub use sample::Sample;
pub use services::ServiceContainer;
pub use status::Status;
