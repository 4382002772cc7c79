//! The coffee maker facade.
//!
//! [`CoffeeMaker`] wires the four components onto a shared bus, attaches
//! a [`Clock`], and exposes the whole appliance through one handle.
//! User actions (fill, press, pour, remove, replace) go straight to the
//! owning component under the bus lock; queries read the component's
//! live state under the same lock. Time only advances through the
//! clock, scheduled or manual.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::bus::{Bus, lock_bus};
use crate::button::BrewButton;
use crate::clock::Clock;
use crate::config::{BrewConfig, ConfigError};
use crate::pot::CoffeePot;
use crate::reservoir::{OverflowError, WaterReservoir};
use crate::warmer::{InvalidStateError, WarmerPlate};

/// A fully assembled coffee maker.
///
/// Construct one from a [`BrewConfig`], then drive it with
/// [`start_clock`](Self::start_clock) or manual
/// [`tick`](Self::tick) calls.
#[derive(Debug)]
pub struct CoffeeMaker {
    /// Shared bus carrying the four components.
    bus: Arc<Mutex<Bus>>,

    /// Tick scheduler for the bus.
    clock: Clock,
}

impl CoffeeMaker {
    /// Assemble a coffee maker from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any derived property of the
    /// configuration is invalid, for example a tick rate too slow to
    /// brew a whole cup per minute.
    pub fn new(config: &BrewConfig) -> Result<Self, ConfigError> {
        let period = config.tick_period()?;
        let ticks_per_cup = config.ticks_per_cup_brewed()?;
        let pot_capacity = config.pot_max_capacity_cups()?;
        let reservoir_capacity = config.reservoir_max_capacity_cups()?;
        let stay_hot_tick_limit = config.stay_hot_tick_limit()?;

        info!(
            ?period,
            ticks_per_cup,
            pot_capacity,
            reservoir_capacity,
            stay_hot_tick_limit,
            "Assembling the coffee maker"
        );

        let bus = Arc::new(Mutex::new(Bus::new(
            WaterReservoir::new(reservoir_capacity, ticks_per_cup),
            BrewButton::new(),
            CoffeePot::new(pot_capacity, ticks_per_cup),
            WarmerPlate::new(stay_hot_tick_limit),
        )));
        let clock = Clock::new(Arc::clone(&bus), period);

        Ok(Self { bus, clock })
    }

    /// Add `cups` of water to the reservoir.
    ///
    /// # Errors
    ///
    /// Returns [`OverflowError`] if the fill would exceed the
    /// reservoir's capacity; nothing is added in that case.
    pub fn fill(&self, cups: u32) -> Result<(), OverflowError> {
        lock_bus(&self.bus).reservoir.fill(cups)
    }

    /// Press the brew button.
    ///
    /// Pressing while idle requests a brew; pressing again before the
    /// request is picked up cancels it.
    pub fn press_brew_button(&self) {
        debug!("Brew button pressed");
        lock_bus(&self.bus).button.press();
    }

    /// Cups of water currently in the reservoir.
    pub fn cups_of_water(&self) -> u32 {
        lock_bus(&self.bus).reservoir.cups_of_water()
    }

    /// Maximum cups of water the reservoir can hold.
    pub fn max_water_capacity_cups(&self) -> u32 {
        lock_bus(&self.bus).reservoir.max_capacity_cups()
    }

    /// Cups of coffee currently in the pot.
    pub fn cups_of_coffee(&self) -> u32 {
        lock_bus(&self.bus).pot.cups_of_coffee()
    }

    /// Whether brewing was occurring as of the last tick.
    pub fn is_brewing(&self) -> bool {
        lock_bus(&self.bus).reservoir.is_brewing()
    }

    /// Whether the warmer plate is heating.
    pub fn is_warmer_plate_on(&self) -> bool {
        lock_bus(&self.bus).warmer.is_hot()
    }

    /// Take the pot off the warmer plate.
    ///
    /// Removal pauses any brew in progress at the next tick. The
    /// returned [`PotHandle`] lets the user pour coffee while holding
    /// the pot.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::PotAlreadyRemoved`] if the pot is
    /// not on the plate.
    pub fn remove_pot(&self) -> Result<PotHandle, InvalidStateError> {
        lock_bus(&self.bus).warmer.remove_pot()?;
        info!("Pot removed from the warmer plate");
        Ok(PotHandle {
            bus: Arc::clone(&self.bus),
        })
    }

    /// Put the pot back on the warmer plate.
    ///
    /// A paused brew resumes at the next tick, exactly where it left
    /// off.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::PotAlreadyPresent`] if the pot is
    /// already on the plate.
    pub fn replace_pot(&self) -> Result<(), InvalidStateError> {
        lock_bus(&self.bus).warmer.replace_pot()?;
        info!("Pot replaced on the warmer plate");
        Ok(())
    }

    /// Start scheduled ticking at the configured period.
    pub fn start_clock(&mut self) {
        self.clock.start();
    }

    /// Stop scheduled ticking.
    pub fn stop_clock(&mut self) {
        self.clock.stop();
    }

    /// True while the clock's scheduled ticking runs.
    pub const fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Advance time by one tick, regardless of the clock schedule.
    pub fn tick(&self) {
        self.clock.tick();
    }
}

/// Access to the pot while it is off the warmer plate.
///
/// Obtained from [`CoffeeMaker::remove_pot`]. The handle stays usable
/// after the pot is replaced; it always refers to this maker's one pot.
#[derive(Debug)]
pub struct PotHandle {
    bus: Arc<Mutex<Bus>>,
}

impl PotHandle {
    /// Pour `cups` of coffee out of the pot.
    ///
    /// Pouring more than the pot holds empties it; there is no error
    /// for over-pouring.
    pub fn pour_out(&self, cups: u32) {
        lock_bus(&self.bus).pot.pour_out(cups);
    }

    /// Cups of coffee currently in the pot.
    pub fn cups_of_coffee(&self) -> u32 {
        lock_bus(&self.bus).pot.cups_of_coffee()
    }

    /// True if the pot holds its maximum capacity.
    pub fn is_full(&self) -> bool {
        lock_bus(&self.bus).pot.is_full()
    }
}
