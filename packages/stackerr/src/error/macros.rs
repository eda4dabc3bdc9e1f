//! Macros for error creation and handling

/// Create a [`StackError`](crate::StackError) from a format string
#[macro_export]
macro_rules! stack_err {
    ($msg:literal $(,)?) => {
        $crate::StackError::new(format!($msg))
    };
    ($msg:expr $(,)?) => {
        $crate::StackError::new($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::StackError::new(format!($fmt, $($arg)*))
    };
}

/// Return early with a [`StackError`](crate::StackError)
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::stack_err!($($arg)*))
    };
}

/// Bail unless a condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::bail!($($arg)*);
        }
    };
}
