// --- File: crates/studiofit_booking/src/ledger.rs ---
//! The in-memory store of confirmed bookings for the active session.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::logic::Booking;

/// Calendar display state for one date, derived from the ledger.
///
/// A selected date that is also booked keeps both flags true; the selection
/// marker merely takes rendering precedence over the booked dot.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CalendarMarking {
    pub marked: bool,
    pub selected: bool,
}

/// Append/remove store of confirmed bookings, insertion-ordered.
///
/// The ledger performs no capacity validation; gating happens upstream at
/// slot-selection time. It is a pure store with no side effects beyond its
/// own state.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a booking with a fresh id and the start instant the caller
    /// computed at confirmation time.
    pub fn add(
        &mut self,
        date: NaiveDate,
        time: &str,
        start: DateTime<Utc>,
        quantity: u8,
    ) -> Booking {
        let booking = Booking {
            id: Uuid::new_v4(),
            date,
            time: time.to_string(),
            quantity,
            start,
        };
        debug!("Recorded booking {} for {} {}", booking.id, date, time);
        self.bookings.push(booking.clone());
        booking
    }

    /// Removes the booking with `id` if present. Unknown ids are benign and
    /// report `false` instead of failing.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.bookings.len();
        self.bookings.retain(|b| b.id != id);
        before != self.bookings.len()
    }

    pub fn get(&self, id: Uuid) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    /// All bookings in insertion order.
    pub fn all(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Derives the calendar marking map from the current ledger contents.
    ///
    /// Recomputed on every call, never cached across mutations, so the view
    /// cannot go stale. The selected date gets an entry even when no booking
    /// exists for it.
    pub fn markings_by_date(
        &self,
        selected: Option<NaiveDate>,
    ) -> HashMap<NaiveDate, CalendarMarking> {
        let mut markings: HashMap<NaiveDate, CalendarMarking> = HashMap::new();
        for booking in &self.bookings {
            markings.entry(booking.date).or_insert(CalendarMarking {
                marked: true,
                selected: false,
            });
        }
        if let Some(date) = selected {
            let entry = markings.entry(date).or_insert(CalendarMarking {
                marked: false,
                selected: false,
            });
            entry.selected = true;
        }
        markings
    }
}
