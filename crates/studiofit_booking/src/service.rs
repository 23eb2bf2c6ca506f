// --- File: crates/studiofit_booking/src/service.rs ---
//! Capacity provider implementations.
//!
//! The booking core only ever sees the [`CapacityProvider`] trait; the
//! implementations here cover the demo wiring and deterministic tests. A
//! production deployment would add an implementation that queries the real
//! scheduling backend instead.

use chrono::{NaiveDate, NaiveTime};
use rand::Rng;
use studiofit_common::services::CapacityProvider;

/// Pseudo-probabilistic capacity assignment: 30% chance of 0, 40% of 1,
/// 30% of 2.
///
/// This stands in for an authoritative backend capacity query. The
/// distribution is part of the demo contract and must keep the three-way
/// outcome; the "past slots are always 0" override is applied by the slot
/// generator, not here.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomizedCapacity;

impl CapacityProvider for RandomizedCapacity {
    fn capacity(&self, _date: NaiveDate, _time: NaiveTime) -> u8 {
        let draw: f64 = rand::thread_rng().gen();
        if draw < 0.3 {
            0
        } else if draw < 0.7 {
            1
        } else {
            2
        }
    }
}

/// Deterministic provider returning the same capacity for every slot.
#[derive(Debug, Clone, Copy)]
pub struct FixedCapacity(pub u8);

impl CapacityProvider for FixedCapacity {
    fn capacity(&self, _date: NaiveDate, _time: NaiveTime) -> u8 {
        self.0
    }
}
