//! Water reservoir: holds water and decides whether brewing is occurring.
//!
//! The reservoir is the component that *owns* the brewing decision. Each
//! tick it recomputes `brewing` from the snapshot -- the button must
//! request a brew, the pot must sit on the warmer plate and not be full,
//! and the reservoir itself must hold water -- and, while brewing,
//! removes one cup of water every `ticks_per_cup_brewed` consecutive
//! brewing ticks.
//!
//! The internal tick counter is only reset when the reservoir is idle
//! *and* empty. A paused brew (pot removed, button pressed again) keeps
//! the counter so that resuming picks up exactly where it left off.

use tracing::{debug, trace};

use crate::snapshot::{ReservoirSnapshot, Snapshot};

/// Extra cups the reservoir holds beyond its pot's capacity.
///
/// A coffee maker never brews 100% of its water into coffee -- some is
/// always lost to evaporation -- so the reservoir must hold strictly more
/// water than the pot can hold coffee.
pub const CAPACITY_OFFSET_CUPS: u32 = 1;

/// Error returned when a fill would exceed the reservoir's capacity.
///
/// The fill is rejected whole: no partial fill occurs and the reservoir
/// is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "filling {requested} cups of water would overfill the reservoir: it \
     currently contains {current} cups and its max capacity is {capacity}"
)]
pub struct OverflowError {
    /// Cups the caller attempted to fill.
    pub requested: u32,
    /// Cups in the reservoir at the time of the call.
    pub current: u32,
    /// The reservoir's maximum capacity.
    pub capacity: u32,
}

/// Water reservoir component.
///
/// Holds `0..=max_capacity_cups` cups of water. Depletes one cup per
/// `ticks_per_cup_brewed` ticks while brewing; filled by the user via
/// [`fill`](Self::fill).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterReservoir {
    /// Maximum cups of water this reservoir can hold.
    max_capacity_cups: u32,

    /// Brewing ticks required to remove one cup of water.
    ticks_per_cup_brewed: u64,

    /// Cups of water currently held.
    cups_of_water: u32,

    /// Whether brewing was occurring as of the last tick update.
    brewing: bool,

    /// Consecutive brewing ticks since the last cup was removed.
    ticks_since_last_cup: u64,
}

impl WaterReservoir {
    /// Create an empty reservoir.
    ///
    /// `max_capacity_cups` should already include the pot-capacity offset
    /// (see [`CAPACITY_OFFSET_CUPS`] and
    /// [`BrewConfig::reservoir_max_capacity_cups`]).
    ///
    /// [`BrewConfig::reservoir_max_capacity_cups`]:
    ///     crate::config::BrewConfig::reservoir_max_capacity_cups
    pub const fn new(max_capacity_cups: u32, ticks_per_cup_brewed: u64) -> Self {
        Self {
            max_capacity_cups,
            ticks_per_cup_brewed,
            cups_of_water: 0,
            brewing: false,
            ticks_since_last_cup: 0,
        }
    }

    /// Add `cups` of water to the reservoir.
    ///
    /// # Errors
    ///
    /// Returns [`OverflowError`] if the fill would exceed the reservoir's
    /// max capacity. The reservoir is left unchanged on failure.
    pub fn fill(&mut self, cups: u32) -> Result<(), OverflowError> {
        debug!(
            cups,
            current = self.cups_of_water,
            "Filling the water reservoir"
        );

        let next = self
            .cups_of_water
            .checked_add(cups)
            .filter(|next| *next <= self.max_capacity_cups)
            .ok_or(OverflowError {
                requested: cups,
                current: self.cups_of_water,
                capacity: self.max_capacity_cups,
            })?;

        self.cups_of_water = next;
        Ok(())
    }

    /// Recompute the reservoir's state from the tick snapshot.
    ///
    /// Brewing occurs when the button requests a brew, the pot sits on
    /// the warmer plate and is not full, and this reservoir holds water.
    /// The button, pot, and warmer states come from the snapshot; the
    /// water level is this component's own live state.
    pub fn on_tick(&mut self, snapshot: &Snapshot) {
        self.brewing = snapshot.button.brew_requested
            && snapshot.warmer.has_pot
            && !snapshot.pot.full
            && !self.is_empty();

        if self.brewing {
            trace!(
                ticks_since_last_cup = self.ticks_since_last_cup,
                ticks_per_cup = self.ticks_per_cup_brewed,
                "Reservoir brewing tick"
            );

            self.ticks_since_last_cup = self.ticks_since_last_cup.saturating_add(1);

            if self.ticks_since_last_cup >= self.ticks_per_cup_brewed {
                self.cups_of_water = self.cups_of_water.saturating_sub(1);
                self.ticks_since_last_cup = 0;
                debug!(
                    cups_of_water = self.cups_of_water,
                    "Reservoir used one cup of water"
                );
            }
        } else if self.is_empty() {
            // Only reset when there is nothing left to brew. Otherwise a
            // paused brew resumes exactly where it left off.
            self.ticks_since_last_cup = 0;
        }
    }

    /// Cups of water currently held.
    pub const fn cups_of_water(&self) -> u32 {
        self.cups_of_water
    }

    /// Maximum cups of water this reservoir can hold.
    pub const fn max_capacity_cups(&self) -> u32 {
        self.max_capacity_cups
    }

    /// True if the reservoir holds no water.
    pub const fn is_empty(&self) -> bool {
        self.cups_of_water == 0
    }

    /// Whether brewing was occurring as of the last tick update.
    pub const fn is_brewing(&self) -> bool {
        self.brewing
    }

    /// Project this reservoir's public state for a snapshot.
    pub const fn snapshot(&self) -> ReservoirSnapshot {
        ReservoirSnapshot {
            cups_of_water: self.cups_of_water,
            brewing: self.brewing,
        }
    }
}
