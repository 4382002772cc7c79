//! The bus: owns the registered components and delivers tick snapshots.
//!
//! The four components are registered once, at construction, and live for
//! the coffee maker's lifetime. Each tick the bus assembles a fresh
//! [`Snapshot`] and delivers it to every component in a fixed order. The
//! order is a non-observable implementation detail: component update
//! logic depends only on the snapshot, never on another component's
//! already-updated live state.
//!
//! The bus itself is not thread-safe; callers wrap it in
//! `Arc<Mutex<Bus>>` (see [`lock_bus`]) so that foreground user actions
//! and the background clock serialize on the same exclusive access. That
//! single lock also makes snapshot construction atomic: all four fields
//! reflect one consistent instant, and a foreground action concurrent
//! with a tick is either fully visible or fully invisible to it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::button::BrewButton;
use crate::pot::CoffeePot;
use crate::reservoir::WaterReservoir;
use crate::snapshot::Snapshot;
use crate::warmer::WarmerPlate;

/// The four live components, bundled for exclusive access.
#[derive(Debug)]
pub struct Bus {
    /// The water reservoir.
    pub reservoir: WaterReservoir,

    /// The brew button.
    pub button: BrewButton,

    /// The coffee pot.
    pub pot: CoffeePot,

    /// The warmer plate.
    pub warmer: WarmerPlate,
}

impl Bus {
    /// Register the four components on a new bus.
    pub const fn new(
        reservoir: WaterReservoir,
        button: BrewButton,
        pot: CoffeePot,
        warmer: WarmerPlate,
    ) -> Self {
        Self {
            reservoir,
            button,
            pot,
            warmer,
        }
    }

    /// Assemble a fresh snapshot of every component's public state.
    ///
    /// The caller's exclusive access to the bus guarantees the snapshot
    /// reflects a single consistent instant.
    pub const fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.reservoir.snapshot(),
            self.button.snapshot(),
            self.pot.snapshot(),
            self.warmer.snapshot(),
        )
    }

    /// Deliver a snapshot to every registered component.
    ///
    /// Components update in a fixed order, but since each reads only the
    /// snapshot the order cannot be observed. No component update raises
    /// under normal operation; only user-facing operations do.
    pub fn deliver(&mut self, snapshot: &Snapshot) {
        self.reservoir.on_tick(snapshot);
        self.button.on_tick(snapshot);
        self.pot.on_tick(snapshot);
        self.warmer.on_tick(snapshot);
    }

    /// Run one tick: snapshot the current state, then deliver it.
    pub fn tick(&mut self) {
        let snapshot = self.snapshot();
        trace!(?snapshot, "Delivering tick snapshot");
        self.deliver(&snapshot);
    }
}

/// Lock a shared bus, absorbing mutex poisoning.
///
/// Component state is always internally consistent -- no code path can
/// panic mid-update -- so a poisoned lock carries no torn state and the
/// guard can be recovered.
pub fn lock_bus(bus: &Mutex<Bus>) -> MutexGuard<'_, Bus> {
    bus.lock().unwrap_or_else(PoisonError::into_inner)
}
