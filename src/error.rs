//! Crate-level error type.
//!
//! Tree operations themselves never fail. Errors come from the edges: commands issued while a
//! trace is still playing, input that doesn't parse, and configuration.

use thiserror::Error;

/// Errors produced by the treeviz crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An operation was requested while a trace is still being played back.
    #[error("an animation is still playing; wait for it to finish or reset")]
    Busy,
    /// Playback speed outside `1..=5`.
    #[error("speed must be between 1 and 5, got {0}")]
    InvalidSpeed(u8),
    /// Random generation was asked for more distinct keys than the key range holds.
    #[error("cannot draw {count} distinct keys from {min}..={max}")]
    KeySpace {
        /// Requested number of keys.
        count: usize,
        /// Smallest allowed key.
        min: i64,
        /// Largest allowed key.
        max: i64,
    },
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A textual command could not be understood.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    /// Generic I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML configuration could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
