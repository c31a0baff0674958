// Defaults and array generation settings

use std::time::Duration;
use thiserror::Error;

/// Number of elements in a generated array
pub const DEFAULT_LEN: usize = 20;

/// Smallest generated magnitude
pub const DEFAULT_MIN: u32 = 50;

/// Largest generated magnitude
pub const DEFAULT_MAX: u32 = 350;

/// Speed level selected at startup
pub const DEFAULT_SPEED: u32 = 25;

/// How long the event loop waits for input before advancing playback
pub const FRAME_POLL: Duration = Duration::from_millis(16);

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "SORTTY_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("array length must be at least 1")]
    EmptyArray,
    #[error("magnitudes must be positive (min was 0)")]
    ZeroMagnitude,
    #[error("min magnitude {min} is larger than max magnitude {max}")]
    InvertedRange { min: u32, max: u32 },
}

/// Shape of randomly generated arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayConfig {
    len: usize,
    min: u32,
    max: u32,
}

impl ArrayConfig {
    pub fn new(len: usize, min: u32, max: u32) -> Result<Self, ConfigError> {
        if len == 0 {
            return Err(ConfigError::EmptyArray);
        }
        if min == 0 {
            return Err(ConfigError::ZeroMagnitude);
        }
        if min > max {
            return Err(ConfigError::InvertedRange { min, max });
        }
        Ok(ArrayConfig { len, min, max })
    }

    /// Number of elements per generated array
    pub fn count(&self) -> usize {
        self.len
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        ArrayConfig {
            len: DEFAULT_LEN,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}
