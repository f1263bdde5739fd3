//! Translation between [`Status`] and VST3 `tresult` codes.

use relay_core::Status;
use vst3::Steinberg::{kInvalidArgument, kResultFalse, kResultOk, tresult};

/// Convert a core status into the code returned to the host.
///
/// | Status            | tresult            |
/// |-------------------|--------------------|
/// | `Success`         | `kResultOk`        |
/// | `InvalidArgument` | `kInvalidArgument` |
/// | `SoftFailure`     | `kResultFalse`     |
#[inline]
pub fn to_tresult(status: Status) -> tresult {
    match status {
        Status::Success => kResultOk,
        Status::InvalidArgument => kInvalidArgument,
        Status::SoftFailure => kResultFalse,
    }
}

/// Convert a host result code back into a core status.
///
/// Returns `None` for codes outside the three the protocol uses
/// (e.g. `kNotImplemented`).
#[inline]
pub fn from_tresult(result: tresult) -> Option<Status> {
    if result == kResultOk {
        Some(Status::Success)
    } else if result == kInvalidArgument {
        Some(Status::InvalidArgument)
    } else if result == kResultFalse {
        Some(Status::SoftFailure)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vst3::Steinberg::kNotImplemented;

    #[test]
    fn test_to_tresult() {
        assert_eq!(to_tresult(Status::Success), kResultOk);
        assert_eq!(to_tresult(Status::InvalidArgument), kInvalidArgument);
        assert_eq!(to_tresult(Status::SoftFailure), kResultFalse);
    }

    #[test]
    fn test_from_tresult() {
        for status in [Status::Success, Status::InvalidArgument, Status::SoftFailure] {
            assert_eq!(from_tresult(to_tresult(status)), Some(status));
        }
        assert_eq!(from_tresult(kNotImplemented), None);
    }
}
