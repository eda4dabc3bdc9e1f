//! Display and trait implementations for StackError

use super::types::StackError;
use std::fmt;

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.message)
    }
}

impl fmt::Debug for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return f
                .debug_struct("StackError")
                .field("message", &self.inner.message)
                .field("source", &self.inner.source)
                .field("truncated", &self.inner.truncated)
                .field("stack", &self.inner.stack)
                .finish();
        }

        writeln!(f, "{}", self.inner.message)?;
        if let Some(source) = &self.inner.source {
            writeln!(f, "Caused by: {source}")?;
        }
        write!(f, "\n{}", self.inner.stack)
    }
}

impl std::error::Error for StackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner
            .source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
