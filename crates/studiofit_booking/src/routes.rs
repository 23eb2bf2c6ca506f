// --- File: crates/studiofit_booking/src/routes.rs ---

use crate::handlers::{
    abort_confirmation_handler, cancel_booking_handler, confirm_handler, dismiss_handler,
    get_bookings_handler, get_markings_handler, get_slots_handler, get_window_handler,
    request_confirmation_handler, select_date_handler, select_slot_handler, set_quantity_handler,
    BookingState,
};
use crate::service::RandomizedCapacity;
use crate::session::BookingSession;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use chrono::Duration;
use chrono_tz::Tz;
use std::sync::Arc;
use studiofit_common::services::SystemClock;
use studiofit_config::AppConfig;
use tokio::sync::Mutex;
use tracing::warn;

/// Creates a router containing all routes for the booking feature.
///
/// The session is wired with the system clock and the randomized capacity
/// provider; swap the provider here once a real capacity source exists.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let tz: Tz = match config.booking.time_zone.parse() {
        Ok(tz) => tz,
        Err(_) => {
            warn!(
                "Invalid time zone {:?} in config, falling back to Europe/Zurich",
                config.booking.time_zone
            );
            chrono_tz::Europe::Zurich
        }
    };
    let session = BookingSession::new(
        Arc::new(SystemClock),
        Arc::new(RandomizedCapacity),
        tz,
        Duration::hours(config.booking.cancel_notice_hours),
    );
    let state = Arc::new(BookingState {
        config,
        session: Mutex::new(session),
    });

    Router::new()
        .route("/booking/window", get(get_window_handler))
        .route("/booking/date", put(select_date_handler))
        .route("/booking/slots", get(get_slots_handler))
        .route("/booking/slot", put(select_slot_handler))
        .route("/booking/confirm/request", post(request_confirmation_handler))
        .route("/booking/confirm/quantity", put(set_quantity_handler))
        .route("/booking/confirm", post(confirm_handler))
        .route("/booking/confirm/abort", post(abort_confirmation_handler))
        .route("/booking/dismiss", post(dismiss_handler))
        .route("/booking/bookings", get(get_bookings_handler))
        .route("/booking/bookings/{id}", delete(cancel_booking_handler))
        .route("/booking/markings", get(get_markings_handler))
        .with_state(state)
}
