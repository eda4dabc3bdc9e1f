//! Error values with captured stacks
//!
//! - [`StackError`] construction, wrapping and refreshing
//! - `Display`/`Error` impls so it substitutes for any other error
//! - Extension traits and macros for everyday propagation
//! - Logging helpers that keep stacks at `debug`

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
pub mod macros;
pub mod types;

pub use extensions::{OptionExt, RestackExt, ResultExt};
pub use logging::ErrorLogger;
pub use types::{BoxError, ErrorLike, Result, StackError};
