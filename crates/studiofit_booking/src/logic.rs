// --- File: crates/studiofit_booking/src/logic.rs ---
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use studiofit_common::services::CapacityProvider;
use studiofit_common::HttpStatusCode;
use tracing::debug;
use uuid::Uuid;

use crate::ledger::CalendarMarking;

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Date {0} is outside the selectable booking window")]
    OutsideHorizon(NaiveDate),
    #[error("No slot starts at {0}")]
    UnknownSlot(String),
    #[error("Slot {0} has no remaining capacity")]
    SlotUnavailable(String),
    #[error("Operation is not valid in the current booking state")]
    InvalidState,
    #[error("Quantity {0} exceeds the selected slot's capacity")]
    InvalidQuantity(u8),
    #[error("No booking with id {0}")]
    UnknownBooking(Uuid),
    #[error("Booking {0} starts too soon to be cancelled")]
    CancellationNotice(Uuid),
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::OutsideHorizon(_) => 400,
            BookingError::UnknownSlot(_) => 404,
            BookingError::SlotUnavailable(_) => 409,
            BookingError::InvalidState => 409,
            BookingError::InvalidQuantity(_) => 400,
            BookingError::UnknownBooking(_) => 404,
            BookingError::CancellationNotice(_) => 409,
        }
    }
}

// --- Grid Contract ---
// The bookable grid is a fixed contract shared with every client: one slot
// at :00 and one at :30 for each hour from 09 through 20, 24 slots per day,
// capacity 0..=2. Hosts must not make it configurable.
pub const GRID_START_HOUR: u32 = 9;
pub const GRID_END_HOUR: u32 = 20;
pub const SLOT_STEP_MINUTES: i64 = 30;
pub const SLOTS_PER_DAY: usize = 24;
pub const MAX_SLOT_CAPACITY: u8 = 2;
/// Last selectable day is today + 6: an inclusive 7-day rolling window.
pub const HORIZON_DAYS: i64 = 6;

// --- Data Structures ---
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TimeSlot {
    /// Display form of the slot start, `"H:MM"` with a non-padded hour.
    pub time: String,
    /// Absolute start instant, combined from date and slot time in the
    /// studio time zone.
    pub start: DateTime<Utc>,
    /// Remaining concurrent bookings this slot accepts. 0 means unselectable.
    pub capacity: u8,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub date: NaiveDate,
    pub time: String,
    pub quantity: u8,
    /// Computed once at creation from (date, time) and never re-derived from
    /// the strings afterwards, so later lead-time checks cannot drift.
    pub start: DateTime<Utc>,
}

// --- HTTP Payloads ---
#[derive(Deserialize, Debug)]
pub struct SelectDateRequest {
    /// Date in YYYY-MM-DD format
    pub date: NaiveDate,
}

#[derive(Serialize, Debug)]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

#[derive(Deserialize, Debug)]
pub struct SelectSlotRequest {
    /// Slot start in "H:MM" form, e.g. "9:30"
    pub time: String,
}

#[derive(Deserialize, Debug)]
pub struct QuantityRequest {
    pub quantity: u8,
}

#[derive(Serialize, Debug)]
pub struct ConfirmPendingResponse {
    pub date: NaiveDate,
    pub time: String,
    pub capacity: u8,
    pub quantity: u8,
}

#[derive(Serialize, Debug)]
pub struct ConfirmResponse {
    pub booking: Booking,
    /// Seconds the host should keep the confirmation up before auto-dismissal.
    pub display_secs: u64,
}

#[derive(Serialize, Debug)]
pub struct DismissResponse {
    pub dismissed: bool,
}

#[derive(Serialize, Debug)]
pub struct BookingView {
    pub id: Uuid,
    pub date: NaiveDate,
    pub time: String,
    pub quantity: u8,
    pub start: DateTime<Utc>,
    /// Snapshot of the cancellation policy at render time. The cancel
    /// endpoint re-evaluates the policy; this flag only drives the affordance.
    pub cancellable: bool,
}

#[derive(Serialize, Debug)]
pub struct BookingsResponse {
    pub bookings: Vec<BookingView>,
}

#[derive(Serialize, Debug)]
pub struct WindowResponse {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

#[derive(Serialize, Debug)]
pub struct MarkingsResponse {
    pub markings: HashMap<NaiveDate, CalendarMarking>,
}

#[derive(Serialize, Debug)]
pub struct CancellationResponse {
    pub success: bool,
    pub message: String,
}

// --- Slot Generation ---

/// The 24 grid positions of a day, ascending: H:00 and H:30 for each hour
/// from `GRID_START_HOUR` through `GRID_END_HOUR`.
pub fn slot_times() -> Vec<NaiveTime> {
    let mut times = Vec::with_capacity(SLOTS_PER_DAY);
    for hour in GRID_START_HOUR..=GRID_END_HOUR {
        times.push(NaiveTime::from_hms_opt(hour, 0, 0).unwrap());
        times.push(NaiveTime::from_hms_opt(hour, 30, 0).unwrap());
    }
    times
}

/// Formats a slot time in the `"H:MM"` wire form, hour not zero-padded.
pub fn format_slot_time(time: NaiveTime) -> String {
    format!("{}:{:02}", time.hour(), time.minute())
}

/// Combines a calendar date and slot time in the studio time zone into an
/// absolute instant.
pub fn slot_start(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let local = date.and_time(time);
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        // Spring-forward gap only; the wall time does not exist locally.
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}

/// Produces the candidate slot grid for one calendar day.
///
/// Pure in (date, now, provider): exactly `SLOTS_PER_DAY` slots in ascending
/// order, each carrying its absolute start instant. A slot whose start is at
/// or before `now` gets capacity 0 unconditionally; only future slots consult
/// the capacity provider, whose answer is clamped to `MAX_SLOT_CAPACITY`.
pub fn generate_day_slots(
    date: NaiveDate,
    now: DateTime<Utc>,
    tz: Tz,
    provider: &dyn CapacityProvider,
) -> Vec<TimeSlot> {
    let mut slots = Vec::with_capacity(SLOTS_PER_DAY);
    for time in slot_times() {
        let start = slot_start(date, time, tz);
        let capacity = if start <= now {
            0
        } else {
            provider.capacity(date, time).min(MAX_SLOT_CAPACITY)
        };
        slots.push(TimeSlot {
            time: format_slot_time(time),
            start,
            capacity,
        });
    }
    debug!("Generated {} slots for {}", slots.len(), date);
    slots
}

// --- Cancellation Policy ---

/// Whether `booking` may still be cancelled at `now`.
///
/// True iff the remaining lead time is at least `notice`; the boundary is
/// inclusive, so a booking exactly `notice` away is still cancellable.
/// Callers performing the removal must re-evaluate this with a fresh clock
/// read rather than trust a rendered flag.
pub fn is_cancellable(booking: &Booking, now: DateTime<Utc>, notice: Duration) -> bool {
    booking.start - now >= notice
}
