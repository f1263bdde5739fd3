//! Protocol-level result codes.
//!
//! Control operations (initialize, terminate, connect, disconnect, notify)
//! never panic and never return `Err`. Every outcome is reported through
//! [`Status`], which the format layers translate into their native result
//! codes (e.g. VST3 `tresult`).

use std::fmt;

/// Outcome of a control-path operation.
///
/// Hosts treat [`Status::SoftFailure`] as non-fatal (retry or ignore) and
/// [`Status::InvalidArgument`] as a caller bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// The operation completed.
    #[default]
    Success,
    /// A required argument was absent or malformed. No state changed.
    InvalidArgument,
    /// The operation was refused in the current state. No state changed.
    ///
    /// Used for "already connected", "peer mismatch" and "no observer".
    SoftFailure,
}

impl Status {
    /// Returns true for [`Status::Success`].
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns true for any non-success outcome.
    #[inline]
    pub const fn is_failure(self) -> bool {
        !self.is_success()
    }

    /// Map a boolean outcome to `Success` / `SoftFailure`.
    #[inline]
    pub const fn from_handled(handled: bool) -> Self {
        if handled {
            Self::Success
        } else {
            Self::SoftFailure
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::SoftFailure => write!(f, "soft failure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(Status::Success.is_success());
        assert!(!Status::Success.is_failure());
        assert!(Status::InvalidArgument.is_failure());
        assert!(Status::SoftFailure.is_failure());
    }

    #[test]
    fn test_from_handled() {
        assert_eq!(Status::from_handled(true), Status::Success);
        assert_eq!(Status::from_handled(false), Status::SoftFailure);
    }

    #[test]
    fn test_display() {
        assert_eq!(Status::InvalidArgument.to_string(), "invalid argument");
        assert_eq!(Status::default(), Status::Success);
    }
}
