//! Pass-through handlers for result and error processing
//!
//! Drop these into `map`/`map_err` chains to log without
//! changing the value.

use crate::StackError;

/// Log successful operations and pass the value through
pub fn on_result<T>(result: T) -> T {
    tracing::debug!("Operation completed successfully");
    result
}

/// Log a stack error with its stack and pass it through
pub fn on_error(error: StackError) -> StackError {
    tracing::warn!(
        truncated = error.is_truncated(),
        stack = error.stack(),
        "Error occurred: {}",
        error.message()
    );
    error
}
