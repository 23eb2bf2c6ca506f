// --- File: crates/studiofit_booking/src/handlers.rs ---
use crate::logic::{
    BookingError, BookingView, BookingsResponse, CancellationResponse, ConfirmPendingResponse,
    ConfirmResponse, DismissResponse, MarkingsResponse, QuantityRequest, SelectDateRequest,
    SelectSlotRequest, SlotsResponse, TimeSlot, WindowResponse,
};
use crate::session::{BookingSession, FlowState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use std::time::Duration;
use studiofit_common::HttpStatusCode;
use studiofit_config::AppConfig;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

// Shared state for the booking handlers. The mutex serializes commands,
// preserving the core's single-actor semantics under an async host.
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub session: Mutex<BookingSession>,
}

fn error_response(err: BookingError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

/// Handler returning the inclusive selectable date window.
#[axum::debug_handler]
pub async fn get_window_handler(
    State(state): State<Arc<BookingState>>,
) -> Json<WindowResponse> {
    let session = state.session.lock().await;
    let (min_date, max_date) = session.window();
    Json(WindowResponse { min_date, max_date })
}

/// Handler to select a date and regenerate the day's slot grid.
#[axum::debug_handler]
pub async fn select_date_handler(
    State(state): State<Arc<BookingState>>,
    Json(request): Json<SelectDateRequest>,
) -> Result<Json<SlotsResponse>, (StatusCode, String)> {
    let mut session = state.session.lock().await;
    let slots = session
        .select_date(request.date)
        .map_err(error_response)?
        .to_vec();
    Ok(Json(SlotsResponse {
        date: request.date,
        slots,
    }))
}

/// Handler returning the current day's slot grid.
#[axum::debug_handler]
pub async fn get_slots_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<SlotsResponse>, (StatusCode, String)> {
    let session = state.session.lock().await;
    let date = session
        .selected_date()
        .ok_or_else(|| error_response(BookingError::InvalidState))?;
    Ok(Json(SlotsResponse {
        date,
        slots: session.slots().to_vec(),
    }))
}

/// Handler to select a slot within the current grid.
#[axum::debug_handler]
pub async fn select_slot_handler(
    State(state): State<Arc<BookingState>>,
    Json(request): Json<SelectSlotRequest>,
) -> Result<Json<TimeSlot>, (StatusCode, String)> {
    let mut session = state.session.lock().await;
    let slot = session.select_slot(&request.time).map_err(error_response)?;
    Ok(Json(slot))
}

fn pending_response(session: &BookingSession) -> Result<ConfirmPendingResponse, (StatusCode, String)> {
    match session.state() {
        FlowState::ConfirmPending {
            date,
            slot,
            quantity,
        } => Ok(ConfirmPendingResponse {
            date: *date,
            time: slot.time.clone(),
            capacity: slot.capacity,
            quantity: *quantity,
        }),
        _ => Err(error_response(BookingError::InvalidState)),
    }
}

/// Handler entering the confirmation step for the selected slot.
#[axum::debug_handler]
pub async fn request_confirmation_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<ConfirmPendingResponse>, (StatusCode, String)> {
    let mut session = state.session.lock().await;
    session.request_confirmation().map_err(error_response)?;
    pending_response(&session).map(Json)
}

/// Handler adjusting the pending quantity (1 or 2, bounded by capacity).
#[axum::debug_handler]
pub async fn set_quantity_handler(
    State(state): State<Arc<BookingState>>,
    Json(request): Json<QuantityRequest>,
) -> Result<Json<ConfirmPendingResponse>, (StatusCode, String)> {
    let mut session = state.session.lock().await;
    session
        .set_quantity(request.quantity)
        .map_err(error_response)?;
    pending_response(&session).map(Json)
}

/// Handler finalizing the pending confirmation.
///
/// Spawns the auto-dismiss task for the transient confirmed banner: after
/// the configured display period it calls back with the confirmation epoch,
/// so a banner already dismissed (or replaced) is left alone.
#[axum::debug_handler]
pub async fn confirm_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<ConfirmResponse>, (StatusCode, String)> {
    let display_secs = state.config.booking.confirmation_display_secs;
    let (booking, epoch) = {
        let mut session = state.session.lock().await;
        session.confirm().map_err(error_response)?
    };

    let timer_state = state.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(display_secs)).await;
        let mut session = timer_state.session.lock().await;
        if session.dismiss_confirmation(epoch) {
            debug!("Auto-dismissed confirmation (epoch {})", epoch);
        }
    });

    Ok(Json(ConfirmResponse {
        booking,
        display_secs,
    }))
}

/// Handler aborting the confirmation step; the ledger is untouched.
#[axum::debug_handler]
pub async fn abort_confirmation_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut session = state.session.lock().await;
    session.abort_confirmation().map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for explicit dismissal of the confirmed banner.
#[axum::debug_handler]
pub async fn dismiss_handler(State(state): State<Arc<BookingState>>) -> Json<DismissResponse> {
    let mut session = state.session.lock().await;
    Json(DismissResponse {
        dismissed: session.dismiss(),
    })
}

/// Handler listing the ledger with a per-booking cancellability snapshot.
#[axum::debug_handler]
pub async fn get_bookings_handler(
    State(state): State<Arc<BookingState>>,
) -> Json<BookingsResponse> {
    let session = state.session.lock().await;
    let bookings = session
        .bookings()
        .iter()
        .map(|b| BookingView {
            id: b.id,
            date: b.date,
            time: b.time.clone(),
            quantity: b.quantity,
            start: b.start,
            cancellable: session.is_booking_cancellable(b),
        })
        .collect();
    Json(BookingsResponse { bookings })
}

/// Handler cancelling a booking, gated by the cancellation policy.
#[axum::debug_handler]
pub async fn cancel_booking_handler(
    State(state): State<Arc<BookingState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CancellationResponse>, (StatusCode, String)> {
    let mut session = state.session.lock().await;
    session.cancel_booking(id).map_err(error_response)?;
    Ok(Json(CancellationResponse {
        success: true,
        message: format!("Booking {} cancelled.", id),
    }))
}

/// Handler returning the calendar marking map.
#[axum::debug_handler]
pub async fn get_markings_handler(
    State(state): State<Arc<BookingState>>,
) -> Json<MarkingsResponse> {
    let session = state.session.lock().await;
    Json(MarkingsResponse {
        markings: session.markings(),
    })
}
