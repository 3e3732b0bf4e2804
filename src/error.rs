// Error types for the carousel scroller
//
// This module defines error types using thiserror. Every scroller operation
// reports one of these instead of panicking.

use thiserror::Error;

/// Main error type for scroller operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrollerError {
    /// A caller passed an unusable value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No item carries the given handle
    #[error("Item not found")]
    NotFound,

    /// The scroller cannot take the request right now
    #[error("Scroller is busy")]
    Busy,

    /// The operation needs at least one item
    #[error("Scroller has no items")]
    Empty,

    /// Item storage could not grow
    #[error("Failed to allocate item storage")]
    ResourceExhausted,
}

impl ScrollerError {
    pub(crate) fn index_out_of_range(index: usize, count: usize) -> Self {
        Self::InvalidArgument(format!("index {} out of range (count {})", index, count))
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The config file is not valid TOML
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// No user config directory on this platform
    #[error("Config directory not found")]
    NoConfigDir,

    /// A value is outside its allowed range
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

// Convenience type aliases for common Result types
/// Result of a scroller operation
pub type Result<T> = std::result::Result<T, ScrollerError>;
/// Result of loading or validating configuration
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
