//! Pan-law capability negotiation.
//!
//! Hosts ask a plugin whether it supports a given pan law through
//! [`AudioChannelRouter::set_pan_law`](crate::AudioChannelRouter::set_pan_law).
//! The base router refuses every request; plugins that pan may accept one or
//! both laws and use [`PanLaw::gains`] to derive channel gains.

use std::f32::consts::FRAC_PI_2;

/// Gain-mapping convention for stereo panning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanLaw {
    /// L = 1 - p, R = p.
    #[default]
    Linear,
    /// L = cos(p·π/2), R = sin(p·π/2). Constant power across the field.
    EqualPower,
}

impl PanLaw {
    /// Convert from the host's raw pan-law value.
    ///
    /// Returns `None` for values the host API does not define.
    pub const fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Linear),
            1 => Some(Self::EqualPower),
            _ => None,
        }
    }

    /// Raw host value for this pan law.
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Linear => 0,
            Self::EqualPower => 1,
        }
    }

    /// Left/right gains for a pan position.
    ///
    /// `position` runs from 0.0 (hard left) to 1.0 (hard right) and is
    /// clamped to that range. Both gains are scaled by `gain`, the value
    /// the host negotiated alongside the law.
    pub fn gains(self, position: f32, gain: f32) -> (f32, f32) {
        let p = position.clamp(0.0, 1.0);
        let (left, right) = match self {
            Self::Linear => (1.0 - p, p),
            Self::EqualPower => {
                let angle = p * FRAC_PI_2;
                (angle.cos(), angle.sin())
            }
        };
        (left * gain, right * gain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_raw_conversion() {
        assert_eq!(PanLaw::from_raw(0), Some(PanLaw::Linear));
        assert_eq!(PanLaw::from_raw(1), Some(PanLaw::EqualPower));
        assert_eq!(PanLaw::from_raw(2), None);
        assert_eq!(PanLaw::from_raw(-1), None);
        assert_eq!(PanLaw::EqualPower.as_raw(), 1);
    }

    #[test]
    fn test_linear_gains() {
        let (l, r) = PanLaw::Linear.gains(0.25, 1.0);
        assert!(approx(l, 0.75));
        assert!(approx(r, 0.25));

        let (l, r) = PanLaw::Linear.gains(0.5, 2.0);
        assert!(approx(l, 1.0));
        assert!(approx(r, 1.0));
    }

    #[test]
    fn test_equal_power_center() {
        let (l, r) = PanLaw::EqualPower.gains(0.5, 1.0);
        assert!(approx(l, r));
        assert!(approx(l * l + r * r, 1.0));
    }

    #[test]
    fn test_position_is_clamped() {
        let (l, r) = PanLaw::Linear.gains(-3.0, 1.0);
        assert!(approx(l, 1.0));
        assert!(approx(r, 0.0));

        let (l, r) = PanLaw::EqualPower.gains(7.0, 1.0);
        assert!(l.abs() < 1e-6);
        assert!(approx(r, 1.0));
    }
}
