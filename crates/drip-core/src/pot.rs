//! Coffee pot: fills while the reservoir reports brewing.
//!
//! The pot keeps its *own* brew-tick counter, independent of the
//! reservoir's. Because that counter only starts advancing once brewing
//! becomes visible in the snapshot -- which is itself one tick behind the
//! button press -- the pot's first cup always lands one tick later than
//! it would if the two components shared a counter. This one-tick
//! propagation lag is a specified, testable property of the machine, not
//! an accident; a real pot fills slightly behind the water it draws from.

use tracing::{debug, trace};

use crate::snapshot::{PotSnapshot, Snapshot};

/// Coffee pot component.
///
/// Holds `0..=max_capacity_cups` cups of brewed coffee. Created empty at
/// construction time and lives for the coffee maker's lifetime; mutated
/// only by tick-driven brewing and by the user pouring coffee out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoffeePot {
    /// Maximum cups of coffee this pot can hold.
    max_capacity_cups: u32,

    /// Brewing ticks required to add one cup of coffee.
    ticks_per_cup_brewed: u64,

    /// Cups of coffee currently held.
    cups_of_coffee: u32,

    /// Consecutive brewing ticks since the last cup was added.
    ticks_since_last_cup: u64,
}

impl CoffeePot {
    /// Create an empty pot.
    pub const fn new(max_capacity_cups: u32, ticks_per_cup_brewed: u64) -> Self {
        Self {
            max_capacity_cups,
            ticks_per_cup_brewed,
            cups_of_coffee: 0,
            ticks_since_last_cup: 0,
        }
    }

    /// Pour out up to `cups` of coffee.
    ///
    /// Pouring more than the pot holds simply empties it; over-pouring is
    /// not an error.
    pub fn pour_out(&mut self, cups: u32) {
        self.cups_of_coffee = self.cups_of_coffee.saturating_sub(cups);
        debug!(
            cups,
            remaining = self.cups_of_coffee,
            "Poured coffee out of the pot"
        );
    }

    /// Advance the pot's brew progress from the tick snapshot.
    ///
    /// While the reservoir reports brewing, the pot's own counter
    /// advances; every `ticks_per_cup_brewed` ticks one cup is added,
    /// clamped at max capacity. When the reservoir is empty and idle the
    /// counter resets so no partial-cup progress leaks into the next
    /// brew; otherwise the counter is preserved across a pause.
    pub fn on_tick(&mut self, snapshot: &Snapshot) {
        if snapshot.reservoir.brewing {
            trace!(
                ticks_since_last_cup = self.ticks_since_last_cup,
                ticks_per_cup = self.ticks_per_cup_brewed,
                "Pot brewing tick"
            );

            self.ticks_since_last_cup = self.ticks_since_last_cup.saturating_add(1);

            if self.ticks_since_last_cup >= self.ticks_per_cup_brewed {
                self.ticks_since_last_cup = 0;
                if self.cups_of_coffee < self.max_capacity_cups {
                    self.cups_of_coffee = self.cups_of_coffee.saturating_add(1);
                    debug!(
                        cups_of_coffee = self.cups_of_coffee,
                        "Brewed a cup of coffee"
                    );
                }
            }
        } else if snapshot.reservoir.is_empty() {
            // Only reset when there is nothing left to brew; a paused brew
            // resumes exactly where it left off.
            self.ticks_since_last_cup = 0;
        }
    }

    /// Cups of coffee currently held.
    pub const fn cups_of_coffee(&self) -> u32 {
        self.cups_of_coffee
    }

    /// Maximum cups of coffee this pot can hold.
    pub const fn max_capacity_cups(&self) -> u32 {
        self.max_capacity_cups
    }

    /// True when the pot holds its max capacity of coffee.
    pub const fn is_full(&self) -> bool {
        self.cups_of_coffee >= self.max_capacity_cups
    }

    /// Project this pot's public state for a snapshot.
    pub const fn snapshot(&self) -> PotSnapshot {
        PotSnapshot {
            cups_of_coffee: self.cups_of_coffee,
            full: self.is_full(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ButtonSnapshot, ReservoirSnapshot, WarmerSnapshot};

    const fn snapshot(reservoir_cups: u32, brewing: bool) -> Snapshot {
        Snapshot::new(
            ReservoirSnapshot {
                cups_of_water: reservoir_cups,
                brewing,
            },
            ButtonSnapshot {
                brew_requested: brewing,
            },
            PotSnapshot {
                cups_of_coffee: 0,
                full: false,
            },
            WarmerSnapshot {
                has_pot: true,
                hot: brewing,
            },
        )
    }

    #[test]
    fn starts_empty() {
        let pot = CoffeePot::new(10, 1);
        assert_eq!(pot.cups_of_coffee(), 0);
        assert!(!pot.is_full());
    }

    #[test]
    fn fills_one_cup_per_brewing_tick() {
        let mut pot = CoffeePot::new(10, 1);
        let brewing = snapshot(5, true);

        pot.on_tick(&brewing);
        pot.on_tick(&brewing);
        pot.on_tick(&brewing);
        assert_eq!(pot.cups_of_coffee(), 3);
    }

    #[test]
    fn multi_tick_cups() {
        let mut pot = CoffeePot::new(10, 3);
        let brewing = snapshot(5, true);

        pot.on_tick(&brewing);
        pot.on_tick(&brewing);
        assert_eq!(pot.cups_of_coffee(), 0);
        pot.on_tick(&brewing);
        assert_eq!(pot.cups_of_coffee(), 1);
    }

    #[test]
    fn clamps_at_max_capacity() {
        let mut pot = CoffeePot::new(2, 1);
        let brewing = snapshot(5, true);

        for _ in 0..5 {
            pot.on_tick(&brewing);
            assert!(pot.cups_of_coffee() <= 2);
        }
        assert_eq!(pot.cups_of_coffee(), 2);
        assert!(pot.is_full());
    }

    #[test]
    fn ignores_ticks_while_not_brewing() {
        let mut pot = CoffeePot::new(10, 1);
        pot.on_tick(&snapshot(5, false));
        pot.on_tick(&snapshot(5, false));
        assert_eq!(pot.cups_of_coffee(), 0);
    }

    #[test]
    fn pause_preserves_the_counter() {
        let mut pot = CoffeePot::new(10, 3);
        let brewing = snapshot(5, true);
        let paused = snapshot(5, false);

        // Two of three ticks toward the first cup.
        pot.on_tick(&brewing);
        pot.on_tick(&brewing);
        // Paused but water remains: progress must be preserved.
        for _ in 0..4 {
            pot.on_tick(&paused);
        }
        // One more brewing tick completes the cup.
        pot.on_tick(&brewing);
        assert_eq!(pot.cups_of_coffee(), 1);
    }

    #[test]
    fn empty_idle_reservoir_resets_the_counter() {
        let mut pot = CoffeePot::new(10, 3);
        let brewing = snapshot(5, true);
        let drained = snapshot(0, false);

        // Partial progress toward a cup...
        pot.on_tick(&brewing);
        pot.on_tick(&brewing);
        // ...is discarded once the reservoir is empty and idle.
        pot.on_tick(&drained);

        // A fresh brew needs the full three ticks again.
        pot.on_tick(&brewing);
        pot.on_tick(&brewing);
        assert_eq!(pot.cups_of_coffee(), 0);
        pot.on_tick(&brewing);
        assert_eq!(pot.cups_of_coffee(), 1);
    }

    #[test]
    fn pour_out_removes_cups() {
        let mut pot = CoffeePot::new(10, 1);
        let brewing = snapshot(5, true);
        for _ in 0..4 {
            pot.on_tick(&brewing);
        }
        assert_eq!(pot.cups_of_coffee(), 4);

        pot.pour_out(3);
        assert_eq!(pot.cups_of_coffee(), 1);
    }

    #[test]
    fn over_pour_silently_empties() {
        let mut pot = CoffeePot::new(10, 1);
        let brewing = snapshot(5, true);
        pot.on_tick(&brewing);
        pot.on_tick(&brewing);

        pot.pour_out(100);
        assert_eq!(pot.cups_of_coffee(), 0);
    }

    #[test]
    fn pour_out_zero_is_a_no_op() {
        let mut pot = CoffeePot::new(10, 1);
        pot.pour_out(0);
        assert_eq!(pot.cups_of_coffee(), 0);
    }
}
