pub mod input;

use std::process::ExitCode;

/// Exit status for a validation verdict: 0 when valid, 2 when not.
pub fn verdict(is_valid: bool) -> ExitCode {
    if is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
