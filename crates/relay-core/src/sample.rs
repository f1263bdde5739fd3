//! Sample type abstraction for f32/f64 audio routing.
//!
//! Enables zero-cost generic buffer handling through monomorphization.

/// Trait for audio sample types (f32, f64).
///
/// Routing only moves samples around, so the trait carries nothing beyond
/// a zero value for silencing.
pub trait Sample: Copy + Default + PartialEq + Send + Sync + 'static {
    /// Zero value (0.0).
    const ZERO: Self;
}

impl Sample for f32 {
    const ZERO: Self = 0.0;
}

impl Sample for f64 {
    const ZERO: Self = 0.0;
}
