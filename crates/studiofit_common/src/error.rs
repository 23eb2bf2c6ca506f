// --- File: crates/studiofit_common/src/error.rs ---

/// A trait for converting errors to HTTP status codes.
///
/// Domain crates implement this for their error enums so the HTTP layer
/// can map refusals to responses without matching on every variant itself.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}
