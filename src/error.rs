//! Error types for stepper-pulse.
//!
//! Producer-facing operations return [`Result`]; the interrupt-context step
//! functions never fail openly — they either no-op behind the reentrancy
//! guard or transition to idle.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-pulse operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error.
    Config(ConfigError),
    /// Step/direction output port operation failed.
    Port,
    /// No free slot in the segment queue.
    ///
    /// This is backpressure, not data loss: the producer must wait and
    /// retry, never drop the segment.
    QueueFull,
    /// Capability exists in the API surface but is not implemented.
    Unimplemented(&'static str),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration.
    ParseError(heapless::String<128>),
    /// Step pulse width out of range (must be 2-1000 microseconds).
    InvalidPulseWidth(u32),
    /// Timer tick rate must be nonzero.
    ZeroTickRate,
    /// Default step rate must be nonzero.
    ZeroDefaultRate,
    /// Jog base interval must be nonzero.
    ZeroJogInterval,
    /// File I/O error (std only).
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Port => write!(f, "Step output port operation failed"),
            Error::QueueFull => write!(f, "Segment queue has no free slot"),
            Error::Unimplemented(what) => write!(f, "Not implemented: {}", what),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidPulseWidth(v) => {
                write!(f, "Invalid pulse width: {} us. Must be 2-1000", v)
            }
            ConfigError::ZeroTickRate => write!(f, "Timer ticks per microsecond must be > 0"),
            ConfigError::ZeroDefaultRate => write!(f, "Default step rate must be > 0"),
            ConfigError::ZeroJogInterval => write!(f, "Jog base interval must be > 0"),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
