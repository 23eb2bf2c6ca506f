// --- File: crates/studiofit_common/src/services.rs ---
//! Service abstractions for injectable collaborators.
//!
//! This module provides trait definitions for the collaborators the booking
//! core depends on. These traits allow for dependency injection and easier
//! testing by decoupling the scheduling logic from wall-clock time and from
//! the authoritative capacity source.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::sync::Mutex;

/// A trait for reading the current time.
///
/// Every policy evaluation (slot generation, cancellation gating) reads the
/// clock fresh through this seam instead of capturing a timestamp once, so
/// a flow left open across a real-time boundary still sees correct state.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock for deterministic tests.
///
/// Tests freeze time at construction and advance it explicitly, which makes
/// boundary conditions (exactly at the cancellation notice, a slot start
/// crossing "now") reproducible.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Replaces the current instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    /// Moves the clock forward (or backward, with a negative duration).
    pub fn advance(&self, delta: chrono::Duration) {
        let mut guard = self.now.lock().unwrap();
        *guard += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// A trait for the authoritative per-slot capacity source.
///
/// The booking core asks this provider how many concurrent bookings a slot
/// can still accept. The answer is clamped to the 0..=2 contract by the slot
/// generator; past slots never reach the provider.
pub trait CapacityProvider: Send + Sync {
    /// Remaining capacity for the slot starting at `time` on `date`.
    fn capacity(&self, date: NaiveDate, time: NaiveTime) -> u8;
}
