//! The immutable per-tick state snapshot broadcast to every component.
//!
//! Once per tick the bus assembles a [`Snapshot`] -- a plain `Copy` value
//! holding each component's *public* state at one instant -- and delivers
//! it to every component. Components recompute their next state from the
//! snapshot alone, never from another component's live, possibly
//! mid-update object, so the per-tick update order cannot be observed.
//!
//! A fresh snapshot is allocated per tick and discarded after delivery.
//! Because every field is a value copy, mutating a live component after
//! the snapshot is built can never change the snapshot's contents.

/// Public state of the water reservoir at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservoirSnapshot {
    /// Cups of water currently in the reservoir.
    pub cups_of_water: u32,

    /// Whether the reservoir was brewing as of its last tick update.
    pub brewing: bool,
}

impl ReservoirSnapshot {
    /// True if the reservoir held no water at the snapshot instant.
    pub const fn is_empty(self) -> bool {
        self.cups_of_water == 0
    }
}

/// Public state of the brew button at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSnapshot {
    /// Whether a brew was requested (pressed or already acknowledged).
    pub brew_requested: bool,
}

/// Public state of the coffee pot at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotSnapshot {
    /// Cups of brewed coffee currently in the pot.
    pub cups_of_coffee: u32,

    /// Whether the pot was at max capacity at the snapshot instant.
    pub full: bool,
}

/// Public state of the warmer plate at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmerSnapshot {
    /// Whether a pot sat on the plate at the snapshot instant.
    pub has_pot: bool,

    /// Whether the plate was hot at the snapshot instant.
    pub hot: bool,
}

/// An immutable, fully-copied view of all component states at one instant.
///
/// Exclusively owned by the tick that created it. The snapshot never
/// aliases the live components: it is built from value copies under the
/// same exclusive access that guards component updates, so all four
/// fields reflect a single consistent instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Reservoir state at the snapshot instant.
    pub reservoir: ReservoirSnapshot,

    /// Brew button state at the snapshot instant.
    pub button: ButtonSnapshot,

    /// Coffee pot state at the snapshot instant.
    pub pot: PotSnapshot,

    /// Warmer plate state at the snapshot instant.
    pub warmer: WarmerSnapshot,
}

impl Snapshot {
    /// Assemble a snapshot from the four per-component views.
    pub const fn new(
        reservoir: ReservoirSnapshot,
        button: ButtonSnapshot,
        pot: PotSnapshot,
        warmer: WarmerSnapshot,
    ) -> Self {
        Self {
            reservoir,
            button,
            pot,
            warmer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservoir_empty_at_zero_cups() {
        let snap = ReservoirSnapshot {
            cups_of_water: 0,
            brewing: false,
        };
        assert!(snap.is_empty());

        let snap = ReservoirSnapshot {
            cups_of_water: 1,
            brewing: false,
        };
        assert!(!snap.is_empty());
    }

    #[test]
    fn snapshot_is_a_value_copy() {
        let mut reservoir = ReservoirSnapshot {
            cups_of_water: 5,
            brewing: true,
        };
        let snap = Snapshot::new(
            reservoir,
            ButtonSnapshot {
                brew_requested: true,
            },
            PotSnapshot {
                cups_of_coffee: 2,
                full: false,
            },
            WarmerSnapshot {
                has_pot: true,
                hot: true,
            },
        );

        // Mutating the source after assembly must not change the snapshot.
        reservoir.cups_of_water = 0;
        assert_eq!(snap.reservoir.cups_of_water, 5);
    }
}
