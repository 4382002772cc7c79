//! Tick scheduler driving the bus at a fixed real-time period.
//!
//! A [`Clock`] owns a handle to the shared bus and, once started, spawns
//! a background task that sleeps for one tick period and then runs one
//! bus tick, over and over until stopped. The clock can also be driven
//! manually with [`tick`](Clock::tick) for deterministic tests: manual
//! and scheduled ticks serialize on the same bus lock, so there is one
//! timeline either way.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::bus::{Bus, lock_bus};

/// Tick scheduler for a shared [`Bus`].
#[derive(Debug)]
pub struct Clock {
    /// The bus to tick.
    bus: Arc<Mutex<Bus>>,

    /// Real-time delay between scheduled ticks.
    period: Duration,

    /// Background ticker task, present while the clock runs.
    ticker: Option<JoinHandle<()>>,

    /// Set to ask the ticker task to exit before its next tick.
    stop: Arc<AtomicBool>,
}

impl Clock {
    /// Create a stopped clock over the given bus.
    pub fn new(bus: Arc<Mutex<Bus>>, period: Duration) -> Self {
        Self {
            bus,
            period,
            ticker: None,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start scheduled ticking.
    ///
    /// Spawns the background ticker task. Calling `start` on a clock
    /// that is already running is a no-op.
    pub fn start(&mut self) {
        if self.is_running() {
            debug!("Clock already running, ignoring start");
            return;
        }

        info!(period = ?self.period, "Starting the clock");
        self.stop.store(false, Ordering::SeqCst);

        let bus = Arc::clone(&self.bus);
        let stop = Arc::clone(&self.stop);
        let period = self.period;

        self.ticker = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                // The flag must be checked under the bus lock: a check
                // outside it could pass just before stop() sets the flag,
                // letting a tick run after stop() has returned.
                let mut bus = lock_bus(&bus);
                if stop.load(Ordering::SeqCst) {
                    break;
                }
                bus.tick();
            }
        }));
    }

    /// Stop scheduled ticking.
    ///
    /// No scheduled tick starts after this returns: the flag is set,
    /// then the bus lock is taken once as a barrier, so a ticker not
    /// already mid-tick must observe the flag, and one that is mid-tick
    /// completes before the barrier is granted. Stopping a stopped
    /// clock is a no-op.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(ticker) = self.ticker.take() {
            info!("Stopping the clock");
            ticker.abort();
            drop(lock_bus(&self.bus));
        }
    }

    /// Run one tick immediately, regardless of the schedule.
    pub fn tick(&self) {
        lock_bus(&self.bus).tick();
    }

    /// True while the background ticker task exists.
    pub const fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// The real-time delay between scheduled ticks.
    pub const fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::button::BrewButton;
    use crate::pot::CoffeePot;
    use crate::reservoir::WaterReservoir;
    use crate::warmer::WarmerPlate;

    fn make_bus() -> Arc<Mutex<Bus>> {
        Arc::new(Mutex::new(Bus::new(
            WaterReservoir::new(11, 1),
            BrewButton::new(),
            CoffeePot::new(10, 1),
            WarmerPlate::new(3),
        )))
    }

    /// A bus whose reservoir and pot are deep enough that a brew keeps
    /// running for the whole test, no matter how many ticks land.
    fn make_deep_bus() -> Arc<Mutex<Bus>> {
        let bus = Arc::new(Mutex::new(Bus::new(
            WaterReservoir::new(100_000, 1),
            BrewButton::new(),
            CoffeePot::new(100_000, 1),
            WarmerPlate::new(3),
        )));
        {
            let mut guard = lock_bus(&bus);
            guard.reservoir.fill(100_000).unwrap();
            guard.button.press();
        }
        bus
    }

    fn water_level(bus: &Mutex<Bus>) -> u32 {
        lock_bus(bus).reservoir.cups_of_water()
    }

    #[test]
    fn manual_ticks_advance_the_bus() {
        let bus = make_bus();
        {
            let mut guard = lock_bus(&bus);
            guard.reservoir.fill(5).unwrap();
            guard.button.press();
        }

        let clock = Clock::new(Arc::clone(&bus), Duration::from_secs(60));
        clock.tick();
        clock.tick();
        assert_eq!(water_level(&bus), 3);
    }

    #[tokio::test]
    async fn scheduled_ticks_advance_the_bus() {
        let bus = make_bus();
        {
            let mut guard = lock_bus(&bus);
            guard.reservoir.fill(10).unwrap();
            guard.button.press();
        }

        let mut clock = Clock::new(Arc::clone(&bus), Duration::from_millis(5));
        clock.start();
        assert!(clock.is_running());

        // Generous margin: at 5ms per tick, 200ms allows plenty of
        // ticks even on a loaded test host.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(water_level(&bus) < 10);

        clock.stop();
    }

    #[tokio::test]
    async fn stop_halts_scheduled_ticks() {
        let bus = make_bus();
        {
            let mut guard = lock_bus(&bus);
            guard.reservoir.fill(10).unwrap();
            guard.button.press();
        }

        let mut clock = Clock::new(Arc::clone(&bus), Duration::from_millis(5));
        clock.start();
        tokio::time::sleep(Duration::from_millis(50)).await;
        clock.stop();
        assert!(!clock.is_running());

        let level = water_level(&bus);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(water_level(&bus), level);
    }

    #[tokio::test]
    async fn start_twice_is_a_no_op() {
        let bus = make_bus();
        let mut clock = Clock::new(bus, Duration::from_millis(5));
        clock.start();
        clock.start();
        assert!(clock.is_running());
        clock.stop();
    }

    #[tokio::test]
    async fn restart_after_stop_resumes_ticking() {
        let bus = make_deep_bus();

        let mut clock = Clock::new(Arc::clone(&bus), Duration::from_millis(5));
        clock.start();
        tokio::time::sleep(Duration::from_millis(50)).await;
        clock.stop();

        let level_after_stop = water_level(&bus);
        clock.start();
        // Generous margin: 200ms allows plenty of 5ms ticks, and the
        // reservoir is deep enough that the level must strictly drop.
        tokio::time::sleep(Duration::from_millis(200)).await;
        clock.stop();
        assert!(water_level(&bus) < level_after_stop);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn no_tick_lands_after_stop_returns() {
        let bus = make_deep_bus();
        let mut clock = Clock::new(Arc::clone(&bus), Duration::from_millis(1));

        // Repeated start/stop cycles race stop() against a waking
        // ticker. The flag is checked under the bus lock and stop()
        // takes that lock once as a barrier, so once stop() returns the
        // level must not move again.
        for _ in 0..20 {
            clock.start();
            tokio::time::sleep(Duration::from_millis(3)).await;
            clock.stop();

            let level = water_level(&bus);
            tokio::time::sleep(Duration::from_millis(10)).await;
            assert_eq!(water_level(&bus), level);
        }
    }
}
