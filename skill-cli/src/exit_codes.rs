//! Process exit codes, stable for scripts and CI.

use skill_exec::DispatchError;

pub const SUCCESS: i32 = 0;
/// Bad manifest, bad arguments, unknown action.
pub const VALIDATION_FAILED: i32 = 2;
/// The upstream call failed or was cancelled.
pub const ACTION_FAILED: i32 = 3;
pub const RUNTIME_ERROR: i32 = 4;

pub fn for_dispatch_error(err: &DispatchError) -> i32 {
    match err {
        DispatchError::UnknownAction(_) | DispatchError::Binding(_) => VALIDATION_FAILED,
        DispatchError::Cancelled(_) | DispatchError::Execution(_) => ACTION_FAILED,
        DispatchError::Build(_) => RUNTIME_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::ParamLocation;
    use skill_exec::{BindingError, CancelReason};

    #[test]
    fn dispatch_errors_map_to_codes() {
        let missing = DispatchError::Binding(BindingError::MissingRequiredParameter {
            location: ParamLocation::Path,
            name: "owner".to_string(),
        });
        assert_eq!(for_dispatch_error(&missing), VALIDATION_FAILED);
        assert_eq!(
            for_dispatch_error(&DispatchError::UnknownAction("x".to_string())),
            VALIDATION_FAILED
        );
        assert_eq!(
            for_dispatch_error(&DispatchError::Cancelled(CancelReason::DeadlineExceeded)),
            ACTION_FAILED
        );
    }
}
