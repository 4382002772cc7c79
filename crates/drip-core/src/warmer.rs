//! Warmer plate: pot presence and heat with a stay-hot grace period.
//!
//! The plate is hot while the reservoir brews and stays hot for a
//! configured number of ticks after brewing stops. The comparison is a
//! strict `<` against the limit: the plate is still hot on the tick
//! exactly at the limit and turns cold on the tick after. That off-by-one
//! is part of the specified behavior and must be preserved.

use tracing::trace;

use crate::snapshot::{Snapshot, WarmerSnapshot};

/// Error returned for a pot removal or replacement that does not match
/// the plate's current state.
///
/// A real machine physically has or does not have a pot sitting on the
/// plate; removing an absent pot or replacing a present one is a caller
/// mistake. No state changes on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidStateError {
    /// The pot was already removed without being replaced.
    #[error("the coffee pot has already been removed; replace it before removing again")]
    PotAlreadyRemoved,

    /// The pot is already sitting on the warmer plate.
    #[error("the coffee pot is already on the warmer plate; remove it before replacing")]
    PotAlreadyPresent,
}

/// Warmer plate component.
///
/// Starts with the pot in place and the plate cold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmerPlate {
    /// Ticks the plate stays hot after brewing stops.
    stay_hot_tick_limit: u64,

    /// Ticks elapsed since brewing stopped, capped at the limit.
    cycles_after_brew_stopped: u64,

    /// Whether a pot sits on the plate (user-controlled).
    has_pot: bool,

    /// Whether the plate is hot (recomputed each tick).
    hot: bool,
}

impl WarmerPlate {
    /// Create a plate holding a pot, not yet hot.
    pub const fn new(stay_hot_tick_limit: u64) -> Self {
        Self {
            stay_hot_tick_limit,
            cycles_after_brew_stopped: 0,
            has_pot: true,
            hot: false,
        }
    }

    /// Remove the pot from the plate.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::PotAlreadyRemoved`] if the pot is not
    /// on the plate.
    pub const fn remove_pot(&mut self) -> Result<(), InvalidStateError> {
        if !self.has_pot {
            return Err(InvalidStateError::PotAlreadyRemoved);
        }
        self.has_pot = false;
        Ok(())
    }

    /// Replace the pot onto the plate.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::PotAlreadyPresent`] if a pot is
    /// already on the plate.
    pub const fn replace_pot(&mut self) -> Result<(), InvalidStateError> {
        if self.has_pot {
            return Err(InvalidStateError::PotAlreadyPresent);
        }
        self.has_pot = true;
        Ok(())
    }

    /// Recompute the plate's heat from the tick snapshot.
    ///
    /// Strict `<` against the limit: the plate naturally lags one tick
    /// behind the end of brewing, so it is hot for exactly
    /// `stay_hot_tick_limit` ticks after the last brewing tick it
    /// observed, and cold on the tick after.
    pub fn on_tick(&mut self, snapshot: &Snapshot) {
        let brewing = snapshot.reservoir.brewing;

        self.hot = brewing || self.cycles_after_brew_stopped < self.stay_hot_tick_limit;

        if brewing {
            self.cycles_after_brew_stopped = 0;
        } else if self.cycles_after_brew_stopped < self.stay_hot_tick_limit {
            self.cycles_after_brew_stopped = self.cycles_after_brew_stopped.saturating_add(1);
        }

        trace!(
            hot = self.hot,
            cycles_after_brew_stopped = self.cycles_after_brew_stopped,
            "Warmer plate tick"
        );
    }

    /// True if the plate is hot.
    pub const fn is_hot(&self) -> bool {
        self.hot
    }

    /// True if a pot sits on the plate.
    pub const fn has_pot(&self) -> bool {
        self.has_pot
    }

    /// Project this plate's public state for a snapshot.
    pub const fn snapshot(&self) -> WarmerSnapshot {
        WarmerSnapshot {
            has_pot: self.has_pot,
            hot: self.hot,
        }
    }
}
