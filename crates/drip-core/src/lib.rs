//! Tick-synchronized coffee maker simulation.
//!
//! This crate models the control logic of an automatic coffee maker as a
//! discrete-time simulation. Four hardware-like components -- the water
//! reservoir, brew button, coffee pot, and warmer plate -- each recompute
//! their own state once per clock tick from an immutable [`Snapshot`] of
//! every component's state at the start of that tick. User actions (fill
//! water, press the brew button, remove or replace the pot, pour coffee)
//! mutate a single component directly between ticks and become visible to
//! the others on the next tick.
//!
//! # Modules
//!
//! - [`config`] -- YAML-loadable configuration and derived tick values.
//! - [`snapshot`] -- The immutable per-tick state snapshot.
//! - [`reservoir`] -- Water reservoir: holds water, decides whether
//!   brewing occurs, depletes while brewing.
//! - [`button`] -- Brew button: three-state request/acknowledge latch.
//! - [`pot`] -- Coffee pot: fills while the reservoir brews.
//! - [`warmer`] -- Warmer plate: pot presence and heat with a stay-hot
//!   grace period.
//! - [`bus`] -- Owns the registered components and delivers snapshots.
//! - [`clock`] -- Manual and automatic (tokio-driven) tick sources.
//! - [`maker`] -- The [`CoffeeMaker`] facade tying everything together.
//!
//! # Design
//!
//! Component update logic depends only on the snapshot, never on another
//! component's live, possibly mid-update state. This makes the per-tick
//! update order a non-observable implementation detail and gives every
//! state change a deliberate one-tick propagation lag, which is a
//! specified, testable property of the machine rather than an accident.
//!
//! [`Snapshot`]: snapshot::Snapshot
//! [`CoffeeMaker`]: maker::CoffeeMaker

pub mod bus;
pub mod button;
pub mod clock;
pub mod config;
pub mod maker;
pub mod pot;
pub mod reservoir;
pub mod snapshot;
pub mod warmer;
