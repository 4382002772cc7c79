//! Configuration loading and derived tick values for the coffee maker.
//!
//! Configuration is supplied once, before any component is constructed.
//! This module defines strongly-typed structs that mirror the YAML layout
//! of `drip-config.yaml`, a loader for that file, and the derived integer
//! tick values the components consume:
//!
//! - `ticks_per_minute` -- how many clock ticks elapse per wall-clock
//!   minute at the configured tick period.
//! - `ticks_per_cup_brewed` -- ticks of continuous brewing required to
//!   move one cup of water from the reservoir into the pot.
//! - `stay_hot_tick_limit` -- ticks the warmer plate stays hot after
//!   brewing stops.
//!
//! All derivations are integer floor divisions. A fractional remainder is
//! simply lost: brewing is always a whole number of ticks per cup, so some
//! configured brew rates under-brew relative to the nominal per-minute
//! rate. A combination that would floor to *zero* ticks per cup is
//! rejected at validation time instead.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::reservoir;

/// Errors raised during configuration loading or validation.
///
/// Every validation variant is fatal to startup: it is raised before any
/// component exists and is never retried.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The clock tick delay was zero.
    #[error("clock tick delay is required and must be > 0")]
    ZeroTickDelay,

    /// The clock tick unit was coarser than seconds.
    #[error("clock tick unit must be no coarser than seconds, got {unit:?}")]
    TickUnitTooCoarse {
        /// The rejected unit.
        unit: TickUnit,
    },

    /// The tick delay and unit combine to fewer than one tick per minute.
    #[error(
        "{tick_delay} {unit:?} per tick yields fewer than one tick per \
         minute, but the clock must tick at least once per minute"
    )]
    TickRateTooSlow {
        /// The configured delay between ticks.
        tick_delay: u64,
        /// The configured delay unit.
        unit: TickUnit,
    },

    /// The pot capacity was zero.
    #[error("pot max capacity must be > 0 cups")]
    ZeroPotCapacity,

    /// The brew rate was zero.
    #[error("reservoir brew rate must be > 0 cups per minute")]
    ZeroBrewRate,

    /// The brew rate outpaces the tick rate: one cup would take zero ticks.
    #[error(
        "brewing {cups_per_minute} cups per minute at {ticks_per_minute} \
         ticks per minute floors to zero ticks per cup"
    )]
    ZeroTicksPerCup {
        /// Derived ticks per minute.
        ticks_per_minute: u64,
        /// The configured brew rate.
        cups_per_minute: u32,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Unit of the clock tick delay.
///
/// Units coarser than seconds are rejected at validation time: a coffee
/// maker's clock must tick at least once per minute, and a coarse unit
/// cannot express that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickUnit {
    /// Tick delay expressed in milliseconds.
    Milliseconds,
    /// Tick delay expressed in seconds.
    Seconds,
    /// Tick delay expressed in minutes. Always rejected by validation.
    Minutes,
}

impl TickUnit {
    /// How many of this unit make up one minute.
    const fn per_minute(self) -> u64 {
        match self {
            Self::Milliseconds => 60_000,
            Self::Seconds => 60,
            Self::Minutes => 1,
        }
    }

    /// Convert a delay expressed in this unit to a [`Duration`].
    const fn delay_duration(self, delay: u64) -> Duration {
        match self {
            Self::Milliseconds => Duration::from_millis(delay),
            Self::Seconds => Duration::from_secs(delay),
            Self::Minutes => Duration::from_secs(delay.saturating_mul(60)),
        }
    }
}

/// Top-level coffee maker configuration.
///
/// Mirrors the structure of `drip-config.yaml`. All fields have defaults
/// matching a household drip machine: one tick per second, a 10-cup pot,
/// a cup brewed per second, and a two-minute warm-hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BrewConfig {
    /// Clock settings (tick delay and unit).
    #[serde(default)]
    pub clock: ClockConfig,

    /// Coffee pot settings.
    #[serde(default)]
    pub pot: PotConfig,

    /// Water reservoir settings.
    #[serde(default)]
    pub reservoir: ReservoirConfig,

    /// Warmer plate settings.
    #[serde(default)]
    pub warmer: WarmerConfig,
}

impl BrewConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Validate every setting and derivation at once.
    ///
    /// Useful at startup to fail fast with the first offending value
    /// before any component is built.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ticks_per_minute()?;
        self.pot_max_capacity_cups()?;
        self.ticks_per_cup_brewed()?;
        self.stay_hot_tick_limit()?;
        Ok(())
    }

    /// The wall-clock interval between automatic ticks.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTickDelay`] or
    /// [`ConfigError::TickUnitTooCoarse`] for an invalid clock section.
    pub fn tick_period(&self) -> Result<Duration, ConfigError> {
        self.ticks_per_minute()?;
        Ok(self
            .clock
            .tick_unit
            .delay_duration(self.clock.tick_delay))
    }

    /// Derived number of clock ticks per wall-clock minute.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTickDelay`] if the delay is zero,
    /// [`ConfigError::TickUnitTooCoarse`] if the unit cannot resolve a
    /// minute, or [`ConfigError::TickRateTooSlow`] if the combination
    /// yields fewer than one tick per minute.
    pub fn ticks_per_minute(&self) -> Result<u64, ConfigError> {
        if self.clock.tick_delay == 0 {
            return Err(ConfigError::ZeroTickDelay);
        }
        if matches!(self.clock.tick_unit, TickUnit::Minutes) {
            return Err(ConfigError::TickUnitTooCoarse {
                unit: self.clock.tick_unit,
            });
        }

        let per_minute = self
            .clock
            .tick_unit
            .per_minute()
            .checked_div(self.clock.tick_delay)
            .unwrap_or(0);

        if per_minute == 0 {
            return Err(ConfigError::TickRateTooSlow {
                tick_delay: self.clock.tick_delay,
                unit: self.clock.tick_unit,
            });
        }
        Ok(per_minute)
    }

    /// The coffee pot's maximum capacity in cups.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroPotCapacity`] if configured as zero.
    pub const fn pot_max_capacity_cups(&self) -> Result<u32, ConfigError> {
        if self.pot.max_capacity_cups == 0 {
            return Err(ConfigError::ZeroPotCapacity);
        }
        Ok(self.pot.max_capacity_cups)
    }

    /// The water reservoir's maximum capacity in cups.
    ///
    /// Always strictly greater than the pot capacity: a coffee maker never
    /// brews 100% of its water into coffee, so the reservoir holds a fixed
    /// extra allowance (see [`reservoir::CAPACITY_OFFSET_CUPS`]).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroPotCapacity`] if the pot capacity is zero.
    pub fn reservoir_max_capacity_cups(&self) -> Result<u32, ConfigError> {
        match self.pot_max_capacity_cups() {
            Ok(pot) => Ok(pot.saturating_add(reservoir::CAPACITY_OFFSET_CUPS)),
            Err(e) => Err(e),
        }
    }

    /// Derived ticks of continuous brewing required to brew one cup.
    ///
    /// Floor division of ticks-per-minute by the configured cups-per-minute
    /// brew rate; the fractional remainder is lost by design.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroBrewRate`] for a zero brew rate,
    /// [`ConfigError::ZeroTicksPerCup`] if the floor is zero, or any
    /// clock-section error from [`Self::ticks_per_minute`].
    pub fn ticks_per_cup_brewed(&self) -> Result<u64, ConfigError> {
        let ticks_per_minute = self.ticks_per_minute()?;
        if self.reservoir.cups_per_minute_brew_rate == 0 {
            return Err(ConfigError::ZeroBrewRate);
        }

        let ticks = ticks_per_minute
            .checked_div(u64::from(self.reservoir.cups_per_minute_brew_rate))
            .unwrap_or(0);

        if ticks == 0 {
            return Err(ConfigError::ZeroTicksPerCup {
                ticks_per_minute,
                cups_per_minute: self.reservoir.cups_per_minute_brew_rate,
            });
        }
        Ok(ticks)
    }

    /// Derived ticks the warmer plate stays hot after brewing stops.
    ///
    /// A stay-hot duration of zero minutes is accepted: the plate is then
    /// hot only while brewing.
    ///
    /// # Errors
    ///
    /// Returns any clock-section error from [`Self::ticks_per_minute`].
    pub fn stay_hot_tick_limit(&self) -> Result<u64, ConfigError> {
        let ticks_per_minute = self.ticks_per_minute()?;
        Ok(ticks_per_minute.saturating_mul(u64::from(self.warmer.stay_hot_minutes)))
    }
}

/// Clock configuration: the delay between automatic ticks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClockConfig {
    /// Number of `tick_unit`s between ticks.
    #[serde(default = "default_tick_delay")]
    pub tick_delay: u64,

    /// Unit of `tick_delay`.
    #[serde(default = "default_tick_unit")]
    pub tick_unit: TickUnit,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_delay: default_tick_delay(),
            tick_unit: default_tick_unit(),
        }
    }
}

/// Coffee pot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PotConfig {
    /// Maximum cups of coffee the pot can hold.
    #[serde(default = "default_pot_capacity")]
    pub max_capacity_cups: u32,
}

impl Default for PotConfig {
    fn default() -> Self {
        Self {
            max_capacity_cups: default_pot_capacity(),
        }
    }
}

/// Water reservoir configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReservoirConfig {
    /// Nominal brew rate in cups per wall-clock minute.
    #[serde(default = "default_brew_rate")]
    pub cups_per_minute_brew_rate: u32,
}

impl Default for ReservoirConfig {
    fn default() -> Self {
        Self {
            cups_per_minute_brew_rate: default_brew_rate(),
        }
    }
}

/// Warmer plate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WarmerConfig {
    /// Minutes the plate stays hot after brewing stops.
    #[serde(default = "default_stay_hot_minutes")]
    pub stay_hot_minutes: u32,
}

impl Default for WarmerConfig {
    fn default() -> Self {
        Self {
            stay_hot_minutes: default_stay_hot_minutes(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_tick_delay() -> u64 {
    1
}

const fn default_tick_unit() -> TickUnit {
    TickUnit::Seconds
}

const fn default_pot_capacity() -> u32 {
    10
}

const fn default_brew_rate() -> u32 {
    60
}

const fn default_stay_hot_minutes() -> u32 {
    2
}
