// End-to-end scenarios for the booking flow, driven through the public
// session API with a frozen clock and a deterministic capacity provider.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::sync::Arc;
use studiofit_booking::logic::BookingError;
use studiofit_booking::service::FixedCapacity;
use studiofit_booking::session::{BookingSession, FlowState};
use studiofit_common::services::ManualClock;

fn session(capacity: u8) -> (BookingSession, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 10, 5, 8, 0, 0).unwrap(),
    ));
    let session = BookingSession::new(
        clock.clone(),
        Arc::new(FixedCapacity(capacity)),
        chrono_tz::UTC,
        Duration::hours(4),
    );
    (session, clock)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 5).unwrap()
}

#[test]
fn test_book_and_cancel_three_days_out() {
    let (mut session, _) = session(2);
    let date = today() + Duration::days(3);

    let slots = session.select_date(date).unwrap().to_vec();
    assert_eq!(slots.len(), 24);

    // Pick a capacity-2 slot and book both places
    let slot = slots.iter().find(|s| s.capacity == 2).unwrap().clone();
    session.select_slot(&slot.time).unwrap();
    session.request_confirmation().unwrap();
    session.set_quantity(2).unwrap();
    let (booking, epoch) = session.confirm().unwrap();

    assert_eq!(session.bookings().len(), 1);
    assert_eq!(booking.date, date);
    assert_eq!(booking.quantity, 2);
    assert_eq!(booking.start, slot.start);

    session.dismiss_confirmation(epoch);
    assert_eq!(*session.state(), FlowState::DateSelected { date });

    // Three days of lead time: well past the four-hour notice
    assert!(session.is_booking_cancellable(&booking));
    session.cancel_booking(booking.id).unwrap();
    assert!(session.bookings().is_empty());

    // The ledger refuses a second removal of the same id
    assert!(matches!(
        session.cancel_booking(booking.id),
        Err(BookingError::UnknownBooking(_))
    ));
}

#[test]
fn test_same_day_past_slot_stays_disabled() {
    let (mut session, clock) = session(2);

    // 11:10 local: the 11:00 slot has started, 11:30 has not
    clock.set(Utc.with_ymd_and_hms(2025, 10, 5, 11, 10, 0).unwrap());
    session.select_date(today()).unwrap();

    let slots = session.slots().to_vec();
    let started = slots.iter().find(|s| s.time == "11:00").unwrap();
    assert_eq!(started.capacity, 0);
    assert!(matches!(
        session.select_slot("11:00"),
        Err(BookingError::SlotUnavailable(_))
    ));
    assert!(session.select_slot("11:30").is_ok());
}

#[test]
fn test_booked_capacity_is_not_decremented_until_regeneration() {
    // Carried-over behavior: the displayed grid keeps the pre-booking
    // capacity until the date is reselected and the provider re-queried.
    let (mut session, _) = session(2);
    let date = today() + Duration::days(2);
    session.select_date(date).unwrap();
    session.select_slot("9:00").unwrap();
    session.request_confirmation().unwrap();
    let (_, epoch) = session.confirm().unwrap();
    session.dismiss_confirmation(epoch);

    let shown = session.slots().iter().find(|s| s.time == "9:00").unwrap();
    assert_eq!(shown.capacity, 2);
}
