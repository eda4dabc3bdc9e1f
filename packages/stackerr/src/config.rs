//! Stack buffer configuration
//!
//! The only tunable is the upper bound, in bytes, on the captured stack
//! text. It is held process-wide and read once per capture.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Default upper bound on captured stack text, in bytes
#[cfg(not(feature = "compact-stack"))]
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Default upper bound on captured stack text, in bytes
#[cfg(feature = "compact-stack")]
pub const DEFAULT_BUFFER_SIZE: usize = 2048;

/// Smallest accepted buffer size
pub const MIN_BUFFER_SIZE: usize = 256;

/// Largest accepted buffer size (1 MiB)
pub const MAX_BUFFER_SIZE: usize = 1 << 20;

/// Environment variable consulted by [`StackConfig::from_env`]
pub const BUFFER_SIZE_ENV: &str = "STACKERR_BUFFER_SIZE";

static BUFFER_SIZE: AtomicUsize = AtomicUsize::new(DEFAULT_BUFFER_SIZE);

static ENV_APPLIED: Lazy<()> = Lazy::new(|| match StackConfig::from_env() {
    Ok(config) => {
        BUFFER_SIZE.store(config.buffer_size, Ordering::Relaxed);
        log::debug!("Stack buffer size set to {} bytes", config.buffer_size);
    }
    Err(e) => log::warn!("Ignoring {BUFFER_SIZE_ENV}: {e}"),
});

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The value could not be parsed as a byte count
    #[error("invalid buffer size {value:?}: {reason}")]
    InvalidBufferSize {
        /// Raw value that was rejected
        value: String,
        /// Parser message
        reason: String,
    },

    /// The value parsed but lies outside the accepted range
    #[error(
        "buffer size {0} outside of {min}..={max}",
        min = MIN_BUFFER_SIZE,
        max = MAX_BUFFER_SIZE
    )]
    OutOfRange(usize),
}

/// Stack capture settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Upper bound on captured stack text, in bytes
    pub buffer_size: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl StackConfig {
    /// Build a configuration with the given buffer size
    #[must_use]
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self { buffer_size }
    }

    /// Read `STACKERR_BUFFER_SIZE`, falling back to the default when unset
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the variable is set but is not a valid,
    /// in-range byte count.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(BUFFER_SIZE_ENV) {
            Ok(raw) => Self::parse_buffer_size(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Parse a buffer size as it would appear in the environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on unparsable or out-of-range input.
    pub fn parse_buffer_size(raw: &str) -> Result<Self, ConfigError> {
        let buffer_size =
            raw.trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidBufferSize {
                    value: raw.to_string(),
                    reason: e.to_string(),
                })?;
        let config = Self { buffer_size };
        config.validate()?;
        Ok(config)
    }

    /// Check the buffer size against the accepted range
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] when the size is rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (MIN_BUFFER_SIZE..=MAX_BUFFER_SIZE).contains(&self.buffer_size) {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange(self.buffer_size))
        }
    }

    /// Install this configuration process-wide
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration does not validate.
    pub fn apply(&self) -> Result<(), ConfigError> {
        set_buffer_size(self.buffer_size)
    }

    /// Snapshot of the configuration currently in effect
    #[must_use]
    pub fn current() -> Self {
        Self {
            buffer_size: buffer_size(),
        }
    }
}

/// Buffer size used by the next capture
///
/// The first call applies `STACKERR_BUFFER_SIZE` if it holds a valid value.
#[must_use]
pub fn buffer_size() -> usize {
    Lazy::force(&ENV_APPLIED);
    BUFFER_SIZE.load(Ordering::Relaxed)
}

/// Change the buffer size used by subsequent captures
///
/// # Errors
///
/// Returns [`ConfigError::OutOfRange`] and leaves the setting untouched if
/// `size` is rejected.
pub fn set_buffer_size(size: usize) -> Result<(), ConfigError> {
    StackConfig::with_buffer_size(size).validate()?;
    Lazy::force(&ENV_APPLIED);
    BUFFER_SIZE.store(size, Ordering::Relaxed);
    Ok(())
}
