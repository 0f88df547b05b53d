// --- File: crates/slotbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- Booking API Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_url: String, // e.g., loaded via SLOTBOOK__API__BASE_URL
    #[serde(default)]
    pub request_timeout_secs: Option<u64>, // None: transport default
}

impl ApiConfig {
    /// The base URL without a trailing slash, ready for `"{base}/api/..."`.
    pub fn normalized_base_url(&self) -> String {
        self.base_url.trim().trim_end_matches('/').to_string()
    }
}

/// Where the page reads the user's identity from.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// `name` and `user_id` query parameters of the page URL
    #[default]
    Url,
    /// The user object the host (Telegram Mini App) injects
    Host,
}

/// Body shape of booking creation requests.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingPayload {
    /// `POST /api/bookings` with `{user_id, date, time}`
    #[default]
    UserId,
    /// `POST /api/book` with `{name, phone, date, time}`
    Contact,
}

/// Route used to list one user's bookings.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingLookup {
    /// `GET /api/bookings?user_id={id}`
    #[default]
    Query,
    /// `GET /api/bookings/by-user/{id}`
    Path,
}

// --- Booking Route Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BookingConfig {
    #[serde(default)]
    pub payload: BookingPayload,
    #[serde(default)]
    pub lookup: BookingLookup,
}

// --- Mini App Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MiniAppConfig {
    pub url: String, // page the bot links to, with ?name=&user_id= appended
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // API config is mandatory
    pub api: ApiConfig,

    // --- Runtime Flags (optional in config file) ---
    #[serde(default)]
    pub identity_source: IdentitySource,
    #[serde(default)]
    pub admin_mode: bool,

    // --- Optional Sections ---
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub mini_app: Option<MiniAppConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// A configuration with defaults everywhere except the base URL.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                request_timeout_secs: None,
            },
            identity_source: IdentitySource::default(),
            admin_mode: false,
            booking: BookingConfig::default(),
            mini_app: None,
            logging: LoggingConfig::default(),
        }
    }
}
