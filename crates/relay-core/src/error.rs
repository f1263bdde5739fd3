//! Error types for the Relay base layer.
//!
//! Only contract violations on the audio path are errors. Protocol outcomes
//! on the control path use [`Status`](crate::Status) instead.

use std::fmt;

/// Precondition failures detected while routing channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// Source and destination hold a different number of samples.
    SampleCountMismatch {
        /// Input channel index.
        input: usize,
        /// Output channel index.
        output: usize,
        /// Sample count of the input buffer.
        source_samples: usize,
        /// Sample count of the output buffer.
        dest_samples: usize,
    },
    /// The destination buffer was handed over without write access.
    ReadOnlyDestination {
        /// Output channel index.
        output: usize,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SampleCountMismatch {
                input,
                output,
                source_samples,
                dest_samples,
            } => write!(
                f,
                "Sample count mismatch: input {} has {} samples, output {} has {}",
                input, source_samples, output, dest_samples
            ),
            Self::ReadOnlyDestination { output } => {
                write!(f, "Output channel {} is not writable", output)
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;
