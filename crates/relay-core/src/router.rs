//! Channel routing: the default audio path of every plugin.
//!
//! A plugin that does not override [`AudioChannelRouter::process`] copies its
//! inputs to its outputs using a fixed fan-out pattern:
//!
//! ```text
//! n = 0
//! while n < outputs:
//!     for i in 0..inputs while n < outputs:
//!         outputs[n] <- inputs[i]; n += 1
//!     n += 1                       // one output slot is skipped per pass
//! ```
//!
//! With 2 inputs and 5 outputs this writes `out[0..2]` and `out[3..5]` and
//! leaves `out[2]` untouched. Existing hosts observe this pattern, so it is
//! kept exactly as is. [`fan_out`] exposes the same plan as an iterator.
//!
//! # Threading
//!
//! `process()` and `process_f64()` run on the host's audio thread. They do
//! not allocate, lock or block. Everything else on the trait is control-path
//! state, written by the host before processing starts. The router performs
//! no synchronization of its own; the host orders the calls.

use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::buffer::AudioBuffer;
use crate::config::RouterConfig;
use crate::error::{RouteError, RouteResult};
use crate::pan_law::PanLaw;
use crate::sample::Sample;

// =============================================================================
// Fan-out plan
// =============================================================================

/// A single input-to-output copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    /// Index into the input channel set.
    pub input: usize,
    /// Index into the output channel set.
    pub output: usize,
}

impl Route {
    /// Create a route.
    pub const fn new(input: usize, output: usize) -> Self {
        Self { input, output }
    }
}

/// Iterator over the routes of one `process()` call, in copy order.
///
/// Created by [`fan_out`]. Output indices are strictly increasing, so no
/// output is written twice.
#[derive(Debug, Clone)]
pub struct FanOut {
    input_count: usize,
    output_count: usize,
    input: usize,
    output: usize,
}

/// Plan the routes for `input_count` inputs and `output_count` outputs.
///
/// # Example
///
/// ```ignore
/// let outputs: Vec<usize> = fan_out(2, 5).map(|r| r.output).collect();
/// assert_eq!(outputs, [0, 1, 3, 4]);
/// ```
pub fn fan_out(input_count: usize, output_count: usize) -> FanOut {
    FanOut {
        input_count,
        output_count,
        input: 0,
        output: 0,
    }
}

impl Iterator for FanOut {
    type Item = Route;

    fn next(&mut self) -> Option<Route> {
        while self.output < self.output_count {
            if self.input < self.input_count {
                let route = Route::new(self.input, self.output);
                self.input += 1;
                self.output += 1;
                return Some(route);
            }
            // Inputs exhausted: restart them one output further on.
            self.input = 0;
            self.output += 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.input_count == 0 {
            return (0, Some(0));
        }
        (0, Some(self.output_count.saturating_sub(self.output)))
    }
}

impl FusedIterator for FanOut {}

// =============================================================================
// Copy helpers
// =============================================================================

fn check_route<S: Sample>(
    route: Route,
    source: &AudioBuffer<'_, S>,
    dest: &AudioBuffer<'_, S>,
) -> RouteResult<()> {
    if source.sample_count() != dest.sample_count() {
        return Err(RouteError::SampleCountMismatch {
            input: route.input,
            output: route.output,
            source_samples: source.sample_count(),
            dest_samples: dest.sample_count(),
        });
    }
    if !dest.can_write() {
        return Err(RouteError::ReadOnlyDestination {
            output: route.output,
        });
    }
    Ok(())
}

/// Copy one channel.
///
/// `route` only labels the error; the buffers are passed directly so plugins
/// overriding `process()` can copy arbitrary pairs.
///
/// # Errors
///
/// Fails without touching `dest` if the sample counts differ or `dest` is
/// read-only.
pub fn copy_channel<S: Sample>(
    route: Route,
    source: &AudioBuffer<'_, S>,
    dest: &mut AudioBuffer<'_, S>,
) -> RouteResult<()> {
    check_route(route, source, dest)?;
    if let Some(samples) = dest.as_mut_slice() {
        samples.copy_from_slice(source.as_slice());
    }
    Ok(())
}

/// Copy `inputs` to `outputs` following the fan-out plan.
///
/// Every route is validated before the first sample is written, so a
/// contract violation leaves all outputs unmodified.
pub fn route_channels<S: Sample>(
    inputs: &[AudioBuffer<'_, S>],
    outputs: &mut [AudioBuffer<'_, S>],
) -> RouteResult<()> {
    for route in fan_out(inputs.len(), outputs.len()) {
        check_route(route, &inputs[route.input], &outputs[route.output])?;
    }
    for route in fan_out(inputs.len(), outputs.len()) {
        copy_channel(route, &inputs[route.input], &mut outputs[route.output])?;
    }
    Ok(())
}

/// Set once the first routing violation has been logged.
static VIOLATION_REPORTED: AtomicBool = AtomicBool::new(false);

/// Apply the contract-violation policy to a routing error.
///
/// Debug builds treat a violation as fatal. Release builds log the first
/// violation only, so the audio thread reaches the logger at most once per
/// process. The caller leaves the outputs as the host supplied them.
pub fn report_route_error(err: &RouteError) {
    if cfg!(debug_assertions) {
        panic!("channel routing precondition failed: {}", err);
    }
    if first_report(&VIOLATION_REPORTED) {
        log::error!("Channel routing skipped: {} (later violations are not logged)", err);
    }
}

/// Returns true exactly once per latch.
#[inline]
fn first_report(latch: &AtomicBool) -> bool {
    !latch.swap(true, Ordering::Relaxed)
}

/// Run [`route_channels`] and apply [`report_route_error`] on failure.
fn route_or_report<S: Sample>(inputs: &[AudioBuffer<'_, S>], outputs: &mut [AudioBuffer<'_, S>]) {
    if let Err(err) = route_channels(inputs, outputs) {
        report_route_error(&err);
    }
}

// =============================================================================
// RouterState
// =============================================================================

/// Plain state behind the default [`AudioChannelRouter`] methods.
///
/// Channel counts and tail size are fixed when the state is built with
/// [`new`](Self::new) or [`from_config`](Self::from_config); no setter
/// exists for them, so a host holding `router_state_mut()` can only change
/// the negotiated values. Sample rate and block size are
/// negotiated by the host and default to zero until it does so.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouterState {
    input_count: usize,
    output_count: usize,
    tail_size: usize,
    sample_rate: f64,
    block_size: usize,
}

impl RouterState {
    /// Create state with the given counts.
    pub const fn new(input_count: usize, output_count: usize, tail_size: usize) -> Self {
        Self {
            input_count,
            output_count,
            tail_size,
            sample_rate: 0.0,
            block_size: 0,
        }
    }

    /// Create state from a static configuration.
    pub const fn from_config(config: &RouterConfig) -> Self {
        Self::new(config.input_count, config.output_count, config.tail_size)
    }

    /// Number of input channels.
    #[inline]
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Number of output channels.
    #[inline]
    pub fn output_count(&self) -> usize {
        self.output_count
    }

    /// Tail length in samples.
    #[inline]
    pub fn tail_size(&self) -> usize {
        self.tail_size
    }

    /// Host sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Host block size in samples.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Store the negotiated sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
    }

    /// Store the negotiated block size.
    pub fn set_block_size(&mut self, block_size: usize) {
        self.block_size = block_size;
    }
}

// =============================================================================
// AudioChannelRouter Trait
// =============================================================================

/// The audio-path half of a plugin.
///
/// Only [`router_state`](Self::router_state) and
/// [`router_state_mut`](Self::router_state_mut) are required. Everything
/// else has a default that a concrete plugin may override; a plugin with its
/// own DSP overrides `process()` and keeps the rest.
///
/// # Example
///
/// ```ignore
/// struct Mute {
///     routing: RouterState,
/// }
///
/// impl AudioChannelRouter for Mute {
///     fn router_state(&self) -> &RouterState { &self.routing }
///     fn router_state_mut(&mut self) -> &mut RouterState { &mut self.routing }
///
///     fn process(&mut self, _inputs: &[AudioBuffer], outputs: &mut [AudioBuffer]) {
///         for output in outputs {
///             output.clear();
///         }
///     }
/// }
/// ```
pub trait AudioChannelRouter: Send {
    /// State backing the default implementations.
    fn router_state(&self) -> &RouterState;

    /// Mutable state backing the default implementations.
    fn router_state_mut(&mut self) -> &mut RouterState;

    /// Number of audio input channels.
    fn input_count(&self) -> usize {
        self.router_state().input_count()
    }

    /// Number of audio output channels.
    fn output_count(&self) -> usize {
        self.router_state().output_count()
    }

    /// Samples produced after input stops.
    fn tail_size(&self) -> usize {
        self.router_state().tail_size()
    }

    /// Sample rate negotiated with the host.
    fn sample_rate(&self) -> f64 {
        self.router_state().sample_rate()
    }

    /// Called by the host when the sample rate changes.
    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.router_state_mut().set_sample_rate(sample_rate);
    }

    /// Block size negotiated with the host.
    fn block_size(&self) -> usize {
        self.router_state().block_size()
    }

    /// Called by the host when the block size changes.
    fn set_block_size(&mut self, block_size: usize) {
        self.router_state_mut().set_block_size(block_size);
    }

    /// Process one block at 32-bit precision.
    ///
    /// The default copies inputs to outputs with the fan-out pattern
    /// described in the [module docs](self).
    ///
    /// # Real-Time Safety
    ///
    /// Called on the audio thread. Must not allocate, lock or block, and
    /// must not keep any buffer past the call.
    fn process(&mut self, inputs: &[AudioBuffer<'_, f32>], outputs: &mut [AudioBuffer<'_, f32>]) {
        route_or_report(inputs, outputs);
    }

    /// Process one block at 64-bit precision.
    ///
    /// Same contract and default behavior as [`process`](Self::process).
    fn process_f64(
        &mut self,
        inputs: &[AudioBuffer<'_, f64>],
        outputs: &mut [AudioBuffer<'_, f64>],
    ) {
        route_or_report(inputs, outputs);
    }

    /// Offer a pan law to the plugin.
    ///
    /// Returns true if the plugin accepts `law` with `gain`. The default
    /// refuses every request and changes nothing.
    fn set_pan_law(&mut self, law: PanLaw, gain: f32) -> bool {
        let _ = (law, gain);
        false
    }
}

impl AudioChannelRouter for RouterState {
    fn router_state(&self) -> &RouterState {
        self
    }

    fn router_state_mut(&mut self) -> &mut RouterState {
        self
    }
}
