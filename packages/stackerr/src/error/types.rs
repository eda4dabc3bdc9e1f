//! Core error types and definitions

use std::sync::Arc;

/// Shared boxed error accepted as a wrap source
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error value carrying the stack captured when it was created
///
/// Cloning is cheap and yields the same instance: every clone shares the
/// message and the captured stack.
#[derive(Clone)]
pub struct StackError {
    pub(super) inner: Arc<StackErrorInner>,
}

pub(super) struct StackErrorInner {
    /// Message, verbatim
    pub message: String,
    /// Stack text captured at construction or refresh
    pub stack: Box<str>,
    /// Whether the capture hit the buffer limit
    pub truncated: bool,
    /// Foreign error this one was wrapped from
    pub source: Option<Arc<dyn std::error::Error + Send + Sync + 'static>>,
}

/// Everything [`StackError::wrap_like`] knows how to wrap
#[derive(Debug)]
pub enum ErrorLike {
    /// Already a stack error; wrapping returns it unchanged
    Stacked(StackError),
    /// Any other error; wrapping copies its text and captures a stack
    Foreign(BoxError),
}

/// Result type alias using [`StackError`]
pub type Result<T> = std::result::Result<T, StackError>;
