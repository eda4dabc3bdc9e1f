//! Error constructors and methods

use super::types::{BoxError, ErrorLike, StackError, StackErrorInner};
use crate::capture::capture_stack;
use crate::config;
use std::sync::Arc;

impl StackError {
    /// Create an error with the given message and the current stack
    #[must_use]
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self::with_parts(message.into(), None)
    }

    /// Wrap an error, keeping the stack of an existing [`StackError`]
    ///
    /// `None` stays `None`. A `StackError` comes back as the same instance.
    /// Anything else gets its `Display` text copied into a new error whose
    /// stack is captured here, not where the original was created.
    #[must_use]
    pub fn wrap<E>(source: Option<E>) -> Option<Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::wrap_like(source.map(ErrorLike::from_error))
    }

    /// Wrap a boxed error, see [`StackError::wrap`]
    #[must_use]
    pub fn wrap_boxed(source: Option<BoxError>) -> Option<Self> {
        Self::wrap_like(source.map(ErrorLike::from_boxed))
    }

    /// Wrap an already classified error, see [`StackError::wrap`]
    #[must_use]
    pub fn wrap_like(source: Option<ErrorLike>) -> Option<Self> {
        source.map(ErrorLike::into_stack_error)
    }

    /// Copy of this error with the stack captured at the current call site
    ///
    /// The message and any wrapped source are shared with `self`, which is
    /// left untouched.
    #[must_use]
    pub fn refresh_stack(&self) -> Self {
        Self::with_parts(self.inner.message.clone(), self.inner.source.clone())
    }

    /// Get the error message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// Get the captured stack text
    #[must_use]
    pub fn stack(&self) -> &str {
        &self.inner.stack
    }

    /// Whether the captured stack was cut at the buffer limit
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.inner.truncated
    }

    /// Whether both handles refer to the same error instance
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn with_parts(
        message: String,
        source: Option<Arc<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        let capture = capture_stack(config::buffer_size());
        Self {
            inner: Arc::new(StackErrorInner {
                message,
                stack: capture.text,
                truncated: capture.truncated,
                source,
            }),
        }
    }
}

impl ErrorLike {
    /// Classify any error value
    pub fn from_error<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(err))
    }

    /// Classify a boxed error, unboxing it if it holds a [`StackError`]
    #[must_use]
    pub fn from_boxed(err: BoxError) -> Self {
        match err.downcast::<StackError>() {
            Ok(stacked) => Self::Stacked(*stacked),
            Err(foreign) => Self::Foreign(foreign),
        }
    }

    /// Turn into a [`StackError`], capturing a stack only for foreign errors
    #[must_use]
    pub fn into_stack_error(self) -> StackError {
        match self {
            Self::Stacked(err) => err,
            Self::Foreign(err) => {
                let message = err.to_string();
                StackError::with_parts(message, Some(Arc::from(err)))
            }
        }
    }
}

impl From<StackError> for ErrorLike {
    fn from(err: StackError) -> Self {
        Self::Stacked(err)
    }
}

impl From<BoxError> for ErrorLike {
    fn from(err: BoxError) -> Self {
        Self::from_boxed(err)
    }
}
