//! Structured logging for stack errors
//!
//! Provides env_logger-based initialisation and helpers that log a
//! [`StackError`] without flooding higher log levels with its stack.

use super::types::StackError;
use log::{debug, error, info};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging helpers for [`StackError`] values
pub struct ErrorLogger;

impl ErrorLogger {
    /// Initialize logging (call once at application startup)
    ///
    /// Configure levels via `RUST_LOG`:
    /// - `RUST_LOG=error` - messages only
    /// - `RUST_LOG=debug` - messages and captured stacks
    /// - `RUST_LOG=stackerr=trace` - also every capture
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a stack error: message at `error`, stack at `debug`
    pub fn log_stack_error(operation: &str, err: &StackError) {
        error!("{operation} failed: {}", err.message());
        if err.is_truncated() {
            debug!("{operation} stack (truncated):\n{}", err.stack());
        } else {
            debug!("{operation} stack:\n{}", err.stack());
        }
    }

    /// Log any error, including its stack when it is a [`StackError`]
    ///
    /// The concrete type is erased here, so non-stack errors are logged with
    /// their `Debug` form instead of a type name.
    pub fn log_error(operation: &str, err: &(dyn std::error::Error + 'static)) {
        match err.downcast_ref::<StackError>() {
            Some(stacked) => Self::log_stack_error(operation, stacked),
            None => error!("{operation} failed: {err} ({err:?})"),
        }
    }

    /// Log an error that carries no stack, tagged with its concrete type
    pub fn log_foreign_error<E>(operation: &str, err: &E)
    where
        E: std::error::Error + ?Sized,
    {
        error!("{}", Self::foreign_error_line(operation, err));
    }

    fn foreign_error_line<E>(operation: &str, err: &E) -> String
    where
        E: std::error::Error + ?Sized,
    {
        format!(
            "{operation} failed: {err} (error_type: {})",
            std::any::type_name::<E>()
        )
    }
}

/// Log a stack error through [`ErrorLogger`]
#[macro_export]
macro_rules! log_stack_error {
    ($operation:expr, $err:expr) => {
        $crate::ErrorLogger::log_stack_error($operation, &$err)
    };
}
