//! Adapters from `Result` and `Option` into [`StackError`]

use super::types::StackError;

/// Conversions on `Result` values
pub trait ResultExt<T> {
    /// Wrap the error, capturing a stack unless it already is a [`StackError`]
    ///
    /// # Errors
    ///
    /// Returns the wrapped error when `self` is `Err`.
    fn stacked(self) -> Result<T, StackError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn stacked(self) -> Result<T, StackError> {
        self.map_err(|e| super::types::ErrorLike::from_error(e).into_stack_error())
    }
}

/// Re-stamping on results that already carry a [`StackError`]
pub trait RestackExt<T> {
    /// Replace the error's stack with one captured here
    ///
    /// # Errors
    ///
    /// Returns the refreshed error when `self` is `Err`.
    fn restacked(self) -> Result<T, StackError>;
}

impl<T> RestackExt<T> for Result<T, StackError> {
    fn restacked(self) -> Result<T, StackError> {
        self.map_err(|e| e.refresh_stack())
    }
}

/// Conversions on `Option` values
pub trait OptionExt<T> {
    /// Turn `None` into a new [`StackError`] with the given message
    ///
    /// # Errors
    ///
    /// Returns a fresh error when `self` is `None`.
    fn ok_or_stack<S: Into<String>>(self, message: S) -> Result<T, StackError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_stack<S: Into<String>>(self, message: S) -> Result<T, StackError> {
        self.ok_or_else(|| StackError::new(message))
    }
}
