// --- File: crates/studiofit_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Booking Config ---
// Tunables of the booking flow. The slot grid itself (09:00-20:00, 30 minute
// step, capacity 0..=2) is a fixed contract and deliberately not configurable.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// IANA time zone the studio operates in. Slot times and the selectable
    /// date window are interpreted in this zone.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// Minimum notice, in hours, required to cancel a booking.
    #[serde(default = "default_cancel_notice_hours")]
    pub cancel_notice_hours: i64,
    /// How long the post-booking confirmation stays up before auto-dismissal.
    #[serde(default = "default_confirmation_display_secs")]
    pub confirmation_display_secs: u64,
}

fn default_time_zone() -> String {
    "Europe/Zurich".to_string()
}

fn default_cancel_notice_hours() -> i64 {
    4
}

fn default_confirmation_display_secs() -> u64 {
    3
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            cancel_notice_hours: default_cancel_notice_hours(),
            confirmation_display_secs: default_confirmation_display_secs(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub booking: BookingConfig,
}
