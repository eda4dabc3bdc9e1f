//! Error values that remember where they came from
//!
//! A [`StackError`] is an ordinary error (it implements
//! [`std::error::Error`], `Send` and `Sync`) that also carries the call stack
//! of the thread that created it:
//!
//! - [`new`] builds one from a message and captures the stack
//! - [`wrap`] turns any error into one, keeping the original stack if it
//!   already is a [`StackError`]
//! - [`stack`] reads the captured stack back from any error
//! - [`refresh_stack`] re-stamps an error with the current stack
//!
//! Captured stacks are bounded by [`config::buffer_size`] and silently
//! truncated past it.

#![forbid(unsafe_code)]

mod capture;
pub mod config;
pub mod error;
pub mod handlers;

pub use config::{ConfigError, StackConfig};
pub use error::*;
pub use handlers::{on_error, on_result};

/// Create an error with the given message and the current stack
#[must_use]
pub fn new<S: Into<String>>(message: S) -> StackError {
    StackError::new(message)
}

/// Wrap an error, see [`StackError::wrap`]
#[must_use]
pub fn wrap<E>(err: Option<E>) -> Option<StackError>
where
    E: std::error::Error + Send + Sync + 'static,
{
    StackError::wrap(err)
}

/// Wrap a boxed error, see [`StackError::wrap`]
#[must_use]
pub fn wrap_boxed(err: Option<BoxError>) -> Option<StackError> {
    StackError::wrap_boxed(err)
}

/// Wrap an already classified error, see [`StackError::wrap`]
#[must_use]
pub fn wrap_like(err: Option<ErrorLike>) -> Option<StackError> {
    StackError::wrap_like(err)
}

/// Captured stack of `err`, or `""` if it is not a [`StackError`]
#[must_use]
pub fn stack<'a>(err: &'a (dyn std::error::Error + 'static)) -> &'a str {
    err.downcast_ref::<StackError>()
        .map_or("", StackError::stack)
}

/// Copy of `err` with the stack captured at the current call site
#[must_use]
pub fn refresh_stack(err: &StackError) -> StackError {
    err.refresh_stack()
}
