//! Brew button: a three-state request/acknowledge latch.
//!
//! The button turns a user's press into a brew request that auto-clears
//! once the reservoir acknowledges it stopped brewing. Three states are
//! needed -- not two -- to distinguish "the user just asked to brew and
//! the reservoir has not reacted yet" from "the brew completed or was
//! cancelled and the user must press again". With only two states, a
//! single tick's read of stale "not brewing yet" would cancel a request
//! the instant it was made.

use tracing::debug;

use crate::snapshot::{ButtonSnapshot, Snapshot};

/// The brew button's request latch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrewRequestState {
    /// No brew requested; a press will request one.
    NotRequested,
    /// The user pressed the button; the reservoir has not reacted yet.
    Requested,
    /// The reservoir acknowledged the request by starting to brew.
    Received,
}

/// Brew button component.
///
/// Created in the not-requested state. The state machine is cyclic and
/// lives for the coffee maker's lifetime; after a brew completes the
/// latch auto-clears and the button is ready for the next press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrewButton {
    state: BrewRequestState,
}

impl Default for BrewButton {
    fn default() -> Self {
        Self::new()
    }
}

impl BrewButton {
    /// Create a button with no brew requested.
    pub const fn new() -> Self {
        Self {
            state: BrewRequestState::NotRequested,
        }
    }

    /// Press the button.
    ///
    /// When idle this requests a brew; in any other state it cancels the
    /// outstanding request, acting as a toggle.
    pub fn press(&mut self) {
        debug!(state = ?self.state, "Brew button pressed");
        self.state = if self.state == BrewRequestState::NotRequested {
            BrewRequestState::Requested
        } else {
            BrewRequestState::NotRequested
        };
    }

    /// Advance the latch from the tick snapshot.
    ///
    /// A pending request is marked received once the reservoir reports it
    /// is brewing; a received request clears once the reservoir reports
    /// it stopped. The other states ignore ticks entirely.
    pub fn on_tick(&mut self, snapshot: &Snapshot) {
        match self.state {
            BrewRequestState::Requested if snapshot.reservoir.brewing => {
                debug!("Brew request acknowledged by the reservoir");
                self.state = BrewRequestState::Received;
            }
            BrewRequestState::Received if !snapshot.reservoir.brewing => {
                debug!("Brewing stopped, clearing the brew request");
                self.state = BrewRequestState::NotRequested;
            }
            _ => {}
        }
    }

    /// True if the user has an outstanding brew request (pressed or
    /// already acknowledged).
    pub const fn is_brew_requested(self) -> bool {
        !matches!(self.state, BrewRequestState::NotRequested)
    }

    /// Project this button's public state for a snapshot.
    pub const fn snapshot(self) -> ButtonSnapshot {
        ButtonSnapshot {
            brew_requested: self.is_brew_requested(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{PotSnapshot, ReservoirSnapshot, WarmerSnapshot};

    const fn snapshot_with_brewing(brewing: bool) -> Snapshot {
        Snapshot::new(
            ReservoirSnapshot {
                cups_of_water: 5,
                brewing,
            },
            ButtonSnapshot {
                brew_requested: false,
            },
            PotSnapshot {
                cups_of_coffee: 0,
                full: false,
            },
            WarmerSnapshot {
                has_pot: true,
                hot: false,
            },
        )
    }

    #[test]
    fn starts_with_no_request() {
        let button = BrewButton::new();
        assert!(!button.is_brew_requested());
    }

    #[test]
    fn press_requests_a_brew() {
        let mut button = BrewButton::new();
        button.press();
        assert!(button.is_brew_requested());
    }

    #[test]
    fn second_press_cancels() {
        let mut button = BrewButton::new();
        button.press();
        button.press();
        assert!(!button.is_brew_requested());
    }

    #[test]
    fn stale_not_brewing_does_not_cancel_a_fresh_request() {
        let mut button = BrewButton::new();
        button.press();

        // The reservoir has not reacted yet; the request must survive.
        button.on_tick(&snapshot_with_brewing(false));
        assert!(button.is_brew_requested());
    }

    #[test]
    fn request_is_acknowledged_then_cleared() {
        let mut button = BrewButton::new();
        button.press();

        // Reservoir starts brewing: request moves to received.
        button.on_tick(&snapshot_with_brewing(true));
        assert!(button.is_brew_requested());

        // Still brewing: nothing changes.
        button.on_tick(&snapshot_with_brewing(true));
        assert!(button.is_brew_requested());

        // Brewing stopped: the latch auto-clears.
        button.on_tick(&snapshot_with_brewing(false));
        assert!(!button.is_brew_requested());
    }

    #[test]
    fn press_cancels_an_acknowledged_request() {
        let mut button = BrewButton::new();
        button.press();
        button.on_tick(&snapshot_with_brewing(true));
        assert!(button.is_brew_requested());

        button.press();
        assert!(!button.is_brew_requested());
    }

    #[test]
    fn idle_button_ignores_ticks() {
        let mut button = BrewButton::new();
        button.on_tick(&snapshot_with_brewing(true));
        button.on_tick(&snapshot_with_brewing(false));
        assert!(!button.is_brew_requested());
    }
}
