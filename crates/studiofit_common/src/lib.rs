// --- File: crates/studiofit_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::HttpStatusCode;

// Re-export the injectable service seams for easier access
pub use services::{CapacityProvider, Clock, ManualClock, SystemClock};
