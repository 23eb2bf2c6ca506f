// --- File: crates/studiofit_booking/src/session.rs ---
//! The booking-session state machine.
//!
//! A [`BookingSession`] owns the slot grid, the booking ledger and the
//! current selection, and exposes pure query/command methods. The host layer
//! (HTTP handlers, a UI) renders snapshots and dispatches commands; all
//! temporal policy reads the injected clock fresh at evaluation time.

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::Arc;
use studiofit_common::services::{CapacityProvider, Clock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::ledger::{BookingLedger, CalendarMarking};
use crate::logic::{
    generate_day_slots, is_cancellable, Booking, BookingError, TimeSlot, HORIZON_DAYS,
};

/// Where the confirmation flow currently stands.
///
/// `Booked` is transient: the host reverts it to `DateSelected` either on
/// explicit dismissal or when its auto-dismiss timer fires. The `epoch`
/// carried by `Booked` guards against a stale timer firing after the state
/// already moved on.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    DateUnselected,
    DateSelected {
        date: NaiveDate,
    },
    SlotSelected {
        date: NaiveDate,
        slot: TimeSlot,
    },
    ConfirmPending {
        date: NaiveDate,
        slot: TimeSlot,
        quantity: u8,
    },
    Booked {
        date: NaiveDate,
        time: String,
        quantity: u8,
        epoch: u64,
    },
}

/// Single-actor booking session: slot generation, selection arbitration,
/// confirmation flow and cancellation gating in one injectable object.
pub struct BookingSession {
    clock: Arc<dyn Clock>,
    provider: Arc<dyn CapacityProvider>,
    tz: Tz,
    cancel_notice: Duration,
    ledger: BookingLedger,
    slots: Vec<TimeSlot>,
    flow: FlowState,
    epoch: u64,
}

impl BookingSession {
    pub fn new(
        clock: Arc<dyn Clock>,
        provider: Arc<dyn CapacityProvider>,
        tz: Tz,
        cancel_notice: Duration,
    ) -> Self {
        Self {
            clock,
            provider,
            tz,
            cancel_notice,
            ledger: BookingLedger::new(),
            slots: Vec::new(),
            flow: FlowState::DateUnselected,
            epoch: 0,
        }
    }

    // --- Queries ---

    pub fn state(&self) -> &FlowState {
        &self.flow
    }

    /// The current day's slot grid. Empty until a date has been selected.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn bookings(&self) -> &[Booking] {
        self.ledger.all()
    }

    /// Inclusive selectable date window, derived from a fresh clock read.
    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        let today = self.today();
        (today, today + Duration::days(HORIZON_DAYS))
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        match &self.flow {
            FlowState::DateUnselected => None,
            FlowState::DateSelected { date }
            | FlowState::SlotSelected { date, .. }
            | FlowState::ConfirmPending { date, .. }
            | FlowState::Booked { date, .. } => Some(*date),
        }
    }

    /// Calendar marking map, recomputed from the ledger on every call.
    pub fn markings(&self) -> HashMap<NaiveDate, CalendarMarking> {
        self.ledger.markings_by_date(self.selected_date())
    }

    /// Policy check against a fresh clock read, for rendering the cancel
    /// affordance. [`cancel_booking`](Self::cancel_booking) re-checks on its
    /// own; this result must not be cached across it.
    pub fn is_booking_cancellable(&self, booking: &Booking) -> bool {
        is_cancellable(booking, self.clock.now(), self.cancel_notice)
    }

    // --- Commands ---

    /// Selects a date inside the rolling window and regenerates the grid.
    ///
    /// Any prior slot selection, pending confirmation or transient booked
    /// banner is discarded; a pending auto-dismiss timer becomes stale.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<&[TimeSlot], BookingError> {
        let now = self.clock.now();
        let today = now.with_timezone(&self.tz).date_naive();
        if date < today || date > today + Duration::days(HORIZON_DAYS) {
            return Err(BookingError::OutsideHorizon(date));
        }
        self.slots = generate_day_slots(date, now, self.tz, self.provider.as_ref());
        self.flow = FlowState::DateSelected { date };
        Ok(&self.slots)
    }

    /// Selects the slot starting at `time` ("H:MM"). Slots with no remaining
    /// capacity are refused and the state is left untouched.
    pub fn select_slot(&mut self, time: &str) -> Result<TimeSlot, BookingError> {
        let date = match &self.flow {
            FlowState::DateSelected { date } | FlowState::SlotSelected { date, .. } => *date,
            _ => return Err(BookingError::InvalidState),
        };
        let slot = self
            .slots
            .iter()
            .find(|s| s.time == time)
            .ok_or_else(|| BookingError::UnknownSlot(time.to_string()))?;
        if slot.capacity == 0 {
            return Err(BookingError::SlotUnavailable(time.to_string()));
        }
        let slot = slot.clone();
        self.flow = FlowState::SlotSelected {
            date,
            slot: slot.clone(),
        };
        Ok(slot)
    }

    /// Moves the selected slot into the confirmation step, quantity 1.
    pub fn request_confirmation(&mut self) -> Result<(), BookingError> {
        match &self.flow {
            FlowState::SlotSelected { date, slot } => {
                self.flow = FlowState::ConfirmPending {
                    date: *date,
                    slot: slot.clone(),
                    quantity: 1,
                };
                Ok(())
            }
            _ => Err(BookingError::InvalidState),
        }
    }

    /// Adjusts the pending quantity, bounded by the selected slot's capacity.
    pub fn set_quantity(&mut self, quantity: u8) -> Result<(), BookingError> {
        match &mut self.flow {
            FlowState::ConfirmPending {
                slot,
                quantity: pending,
                ..
            } => {
                if quantity == 0 || quantity > slot.capacity {
                    return Err(BookingError::InvalidQuantity(quantity));
                }
                *pending = quantity;
                Ok(())
            }
            _ => Err(BookingError::InvalidState),
        }
    }

    /// Finalizes the pending confirmation: appends to the ledger and enters
    /// the transient `Booked` state.
    ///
    /// Returns the booking together with the confirmation epoch the host's
    /// auto-dismiss timer must present to
    /// [`dismiss_confirmation`](Self::dismiss_confirmation).
    ///
    /// The just-booked slot's displayed capacity is intentionally not
    /// decremented; the grid refreshes only on date reselection, when the
    /// capacity source is consulted again.
    pub fn confirm(&mut self) -> Result<(Booking, u64), BookingError> {
        let (date, slot, quantity) = match &self.flow {
            FlowState::ConfirmPending {
                date,
                slot,
                quantity,
            } => (*date, slot.clone(), *quantity),
            _ => return Err(BookingError::InvalidState),
        };
        let booking = self.ledger.add(date, &slot.time, slot.start, quantity);
        self.epoch += 1;
        let epoch = self.epoch;
        self.flow = FlowState::Booked {
            date,
            time: slot.time,
            quantity,
            epoch,
        };
        info!(
            "Confirmed booking {} for {} {} (quantity {})",
            booking.id, date, booking.time, quantity
        );
        Ok((booking, epoch))
    }

    /// Leaves the confirmation step without touching the ledger.
    pub fn abort_confirmation(&mut self) -> Result<(), BookingError> {
        match &self.flow {
            FlowState::ConfirmPending { date, slot, .. } => {
                self.flow = FlowState::SlotSelected {
                    date: *date,
                    slot: slot.clone(),
                };
                Ok(())
            }
            _ => Err(BookingError::InvalidState),
        }
    }

    /// Reverts the transient `Booked` state iff `epoch` is still current.
    ///
    /// This is the entry point for the host's auto-dismiss timer; a timer
    /// that fires after an explicit dismissal or a new confirmation finds a
    /// different epoch and becomes a no-op.
    pub fn dismiss_confirmation(&mut self, epoch: u64) -> bool {
        if let FlowState::Booked {
            date,
            epoch: current,
            ..
        } = &self.flow
        {
            if epoch == *current {
                let date = *date;
                self.flow = FlowState::DateSelected { date };
                debug!("Dismissed booking confirmation (epoch {})", epoch);
                return true;
            }
        }
        false
    }

    /// Explicit dismissal of the confirmed banner, whatever its epoch.
    pub fn dismiss(&mut self) -> bool {
        if let FlowState::Booked { date, .. } = &self.flow {
            let date = *date;
            self.flow = FlowState::DateSelected { date };
            true
        } else {
            false
        }
    }

    /// Removes a booking after re-evaluating the cancellation policy with a
    /// fresh clock read. Refusals leave the ledger untouched.
    pub fn cancel_booking(&mut self, id: Uuid) -> Result<(), BookingError> {
        let now = self.clock.now();
        let booking = self
            .ledger
            .get(id)
            .ok_or(BookingError::UnknownBooking(id))?;
        if !is_cancellable(booking, now, self.cancel_notice) {
            return Err(BookingError::CancellationNotice(id));
        }
        self.ledger.remove(id);
        info!("Cancelled booking {}", id);
        Ok(())
    }

    fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.tz).date_naive()
    }
}
