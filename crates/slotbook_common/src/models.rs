// --- File: crates/slotbook_common/src/models.rs ---

// Wire types of the booking service. The service owns every one of these
// resources; the client only reads them and sends creation bodies.

use serde::{Deserialize, Serialize};

/// Phone number sent when a user record is created without one.
pub const DEFAULT_PHONE: &str = "00000000";

/// Role assigned to lazily created users.
pub const DEFAULT_ROLE: &str = "user";

/// A user record as returned by `GET /api/users` and `GET /api/users/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Service-side row id, when the service exposes one
    #[serde(default)]
    pub id: Option<i64>,

    /// Platform-assigned (Telegram) user id
    pub telegram_id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    /// Creation timestamp exactly as the service formats it
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub telegram_id: i64,
    pub name: String,
    pub phone: String,
    pub role: String,
}

impl NewUser {
    /// A creation body with the default phone and role.
    pub fn with_defaults(telegram_id: i64, name: impl Into<String>) -> Self {
        Self {
            telegram_id,
            name: name.into(),
            phone: DEFAULT_PHONE.to_string(),
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

/// Query filters for `GET /api/users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserQuery {
    pub fn is_empty(&self) -> bool {
        self.telegram_id.is_none() && self.phone.is_none()
    }
}

/// A booking as listed by the bookings endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub date: String,
    pub time: String,
}

/// A `{date, time}` pair from the name-based record lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: String,
    pub time: String,
}

/// Response of `GET /api/myrecord?name=`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<Record>,
}

/// Response of `GET /api/slots?date=`. A missing array means no slots.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlotsResponse {
    #[serde(default)]
    pub available: Vec<String>,
}

/// Response of `GET /api/available-dates`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailableDatesResponse {
    #[serde(default)]
    pub dates: Vec<String>,
}

/// Response of `POST /api/generate-slots`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateSlotsResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub generated: u32,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of a booking creation request.
///
/// Deployments disagree on the shape: some key the booking by the resolved
/// user id, others by contact details.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BookingRequest {
    ByUser {
        user_id: i64,
        date: String,
        time: String,
    },
    ByContact {
        name: String,
        phone: String,
        date: String,
        time: String,
    },
}

impl BookingRequest {
    pub fn date(&self) -> &str {
        match self {
            BookingRequest::ByUser { date, .. } | BookingRequest::ByContact { date, .. } => date,
        }
    }

    pub fn time(&self) -> &str {
        match self {
            BookingRequest::ByUser { time, .. } | BookingRequest::ByContact { time, .. } => time,
        }
    }
}

/// Optional JSON envelope around success/failure answers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusBody {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}
