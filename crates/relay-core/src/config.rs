//! Router configuration.
//!
//! Channel counts and tail size are fixed when a router is built. They are
//! declared once, usually as a `static`, and handed to
//! [`RouterState::from_config`](crate::RouterState::from_config).
//!
//! # Example
//!
//! ```ignore
//! use relay_core::RouterConfig;
//!
//! pub static ROUTING: RouterConfig = RouterConfig::new(2, 2)
//!     .with_tail_size(4410);
//! ```

/// Fixed I/O shape of a router.
///
/// Every field defaults to zero, which is what a router reports until the
/// implementation declares otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouterConfig {
    /// Number of audio input channels.
    pub input_count: usize,

    /// Number of audio output channels.
    pub output_count: usize,

    /// Samples the plugin keeps producing after input stops
    /// (reverb or delay decay).
    pub tail_size: usize,
}

impl RouterConfig {
    /// Create a configuration with the given channel counts and no tail.
    pub const fn new(input_count: usize, output_count: usize) -> Self {
        Self {
            input_count,
            output_count,
            tail_size: 0,
        }
    }

    /// Stereo in, stereo out.
    pub const fn stereo() -> Self {
        Self::new(2, 2)
    }

    /// Set the tail size in samples.
    pub const fn with_tail_size(mut self, tail_size: usize) -> Self {
        self.tail_size = tail_size;
        self
    }
}
