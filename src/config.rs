//! Core configuration.
//!
//! Static parameters for the stepping core: per-axis backlash counts, step
//! pulse width, output inversion mask and timer calibration. Loadable from
//! TOML (with the `std` feature) or constructed directly.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Configuration for the stepping core.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Free steps inserted per axis when that axis reverses direction.
    #[serde(default)]
    pub backlash_steps: [u32; 3],

    /// Step pulse width in microseconds (2-1000).
    #[serde(default = "default_pulse_width")]
    pub pulse_width_us: u32,

    /// XOR mask applied to the combined step/direction byte before output,
    /// for drivers with active-low inputs.
    #[serde(default)]
    pub invert_mask: u8,

    /// Timer ticks per microsecond (timer clock in MHz).
    #[serde(default = "default_ticks_per_us")]
    pub ticks_per_us: u32,

    /// Conservative step rate programmed at startup, microseconds per step.
    #[serde(default = "default_rate_us")]
    pub default_rate_us: u32,

    /// Inter-step interval at full jog speed (speed class 8), microseconds.
    #[serde(default = "default_jog_interval")]
    pub jog_base_interval_us: u32,
}

fn default_pulse_width() -> u32 {
    10
}

fn default_ticks_per_us() -> u32 {
    16
}

fn default_rate_us() -> u32 {
    20_000
}

fn default_jog_interval() -> u32 {
    // Full seek rate of the reference machine works out to ~99 us/step.
    99
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            backlash_steps: [0; 3],
            pulse_width_us: default_pulse_width(),
            invert_mask: 0,
            ticks_per_us: default_ticks_per_us(),
            default_rate_us: default_rate_us(),
            jog_base_interval_us: default_jog_interval(),
        }
    }
}

/// Validate a configuration.
///
/// # Errors
///
/// Returns the first violated constraint.
pub fn validate_config(config: &CoreConfig) -> Result<()> {
    if config.pulse_width_us < 2 || config.pulse_width_us > 1000 {
        return Err(ConfigError::InvalidPulseWidth(config.pulse_width_us).into());
    }
    if config.ticks_per_us == 0 {
        return Err(ConfigError::ZeroTickRate.into());
    }
    if config.default_rate_us == 0 {
        return Err(ConfigError::ZeroDefaultRate.into());
    }
    if config.jog_base_interval_us == 0 {
        return Err(ConfigError::ZeroJogInterval.into());
    }
    Ok(())
}

/// Parse and validate configuration from a TOML string.
#[cfg(feature = "std")]
pub fn parse_config(content: &str) -> Result<CoreConfig> {
    let config: CoreConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        crate::error::Error::Config(ConfigError::ParseError(msg))
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
#[cfg(feature = "std")]
pub fn load_config<P: AsRef<std::path::Path>>(path: P) -> Result<CoreConfig> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        crate::error::Error::Config(ConfigError::IoError(msg))
    })?;
    parse_config(&content)
}
