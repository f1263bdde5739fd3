//! Per-channel audio buffer views.
//!
//! An [`AudioBuffer`] is one channel's sample block for one `process()` call.
//! The host owns the memory; the router only ever sees a borrowed slice,
//! tagged with whether it may be written.
//!
//! # Channel Sets
//!
//! A channel set is simply a slice of buffers. Position is the channel
//! index:
//!
//! ```ignore
//! let inputs = [AudioBuffer::new(&left_in), AudioBuffer::new(&right_in)];
//! let mut outputs = [
//!     AudioBuffer::writable(&mut left_out),
//!     AudioBuffer::writable(&mut right_out),
//! ];
//! router.process(&inputs, &mut outputs);
//! ```
//!
//! # Real-Time Safety
//!
//! Buffers are thin wrappers around slices. Constructing, reading and
//! writing them never allocates.

use crate::sample::Sample;

/// Backing storage of an [`AudioBuffer`].
enum Samples<'a, S> {
    ReadOnly(&'a [S]),
    Writable(&'a mut [S]),
}

/// One channel of audio for a single processing block.
///
/// # Type Parameter
///
/// `S` is the sample type, defaulting to `f32`. Use `AudioBuffer<f64>` for
/// 64-bit processing.
///
/// # Lifetime
///
/// The `'a` lifetime ties the buffer to the host's audio data. A buffer is
/// only valid within the `process()` call that received it and must not be
/// stored past it.
pub struct AudioBuffer<'a, S: Sample = f32> {
    samples: Samples<'a, S>,
}

impl<'a, S: Sample> AudioBuffer<'a, S> {
    /// Wrap a read-only sample block.
    #[inline]
    pub fn new(samples: &'a [S]) -> Self {
        Self {
            samples: Samples::ReadOnly(samples),
        }
    }

    /// Wrap a writable sample block.
    #[inline]
    pub fn writable(samples: &'a mut [S]) -> Self {
        Self {
            samples: Samples::Writable(samples),
        }
    }

    /// Number of samples in this block.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if the buffer accepts writes.
    #[inline]
    pub fn can_write(&self) -> bool {
        matches!(self.samples, Samples::Writable(_))
    }

    /// Returns true if the block holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    /// Read access to the samples.
    #[inline]
    pub fn as_slice(&self) -> &[S] {
        match &self.samples {
            Samples::ReadOnly(s) => &s[..],
            Samples::Writable(s) => &s[..],
        }
    }

    /// Write access to the samples.
    ///
    /// Returns `None` for read-only buffers.
    #[inline]
    pub fn as_mut_slice(&mut self) -> Option<&mut [S]> {
        match &mut self.samples {
            Samples::ReadOnly(_) => None,
            Samples::Writable(s) => Some(&mut s[..]),
        }
    }

    /// Silence the buffer.
    ///
    /// Returns false (and leaves the data alone) for read-only buffers.
    pub fn clear(&mut self) -> bool {
        match self.as_mut_slice() {
            Some(samples) => {
                samples.fill(S::ZERO);
                true
            }
            None => false,
        }
    }
}

impl<S: Sample> std::fmt::Debug for AudioBuffer<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioBuffer")
            .field("sample_count", &self.sample_count())
            .field("can_write", &self.can_write())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_buffer() {
        let data = [0.5f32; 8];
        let mut buffer = AudioBuffer::new(&data);

        assert_eq!(buffer.sample_count(), 8);
        assert!(!buffer.can_write());
        assert!(buffer.as_mut_slice().is_none());
        assert!(!buffer.clear());
        assert_eq!(buffer.as_slice(), &data);
    }

    #[test]
    fn test_writable_buffer() {
        let mut data = [0.5f64; 4];
        let mut buffer = AudioBuffer::writable(&mut data);

        assert!(buffer.can_write());
        buffer.as_mut_slice().unwrap()[1] = 1.0;
        assert_eq!(buffer.as_slice()[1], 1.0);

        assert!(buffer.clear());
        assert!(buffer.as_slice().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_empty_buffer() {
        let buffer: AudioBuffer<'_, f32> = AudioBuffer::new(&[]);
        assert!(buffer.is_empty());
        assert_eq!(format!("{:?}", buffer), "AudioBuffer { sample_count: 0, can_write: false }");
    }
}
