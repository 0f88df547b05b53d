// --- File: crates/slotbook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// Text shown for every transport-level failure (unreachable service,
/// malformed response body).
pub const CONNECTION_ERROR_TEXT: &str = "❌ Could not reach the booking service";

/// Status shown while no user identifier is known.
pub const UNRESOLVED_USER_TEXT: &str = "⚠️ Unresolved user: open the booking page from the bot";

/// A field of the booking form. Validation reports these and the view
/// focuses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Time,
    Name,
    Phone,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Date => "date",
            FormField::Time => "time",
            FormField::Name => "name",
            FormField::Phone => "phone",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The error type shared by every slotbook crate.
///
/// Each variant is one branch of the client's failure taxonomy: local
/// validation, service-reported failures and transport failures.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Required form fields are empty; nothing was sent.
    #[error("Missing required fields: {}", join_fields(.0))]
    Validation(Vec<FormField>),

    /// The date field is filled but is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The page context carried no usable user identifier.
    #[error("User is not resolved")]
    UnresolvedUser,

    /// The service answered with a failure status or an error marker.
    #[error("Booking service error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Service {
        status: u16,
        message: Option<String>,
    },

    /// The request never produced a usable response.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("Failed to parse data: {0}")]
    Parse(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl BookingError {
    /// Builds a service error from a status and the body's `error` field.
    pub fn service(status: u16, message: Option<String>) -> Self {
        BookingError::Service {
            status,
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    /// True for failures that happened below the HTTP status level.
    pub fn is_transport(&self) -> bool {
        matches!(self, BookingError::Transport(_) | BookingError::Parse(_))
    }

    /// The text a user sees for this error.
    ///
    /// Service errors show the service's own message verbatim when it sent
    /// one and `fallback` otherwise; transport errors always show
    /// [`CONNECTION_ERROR_TEXT`].
    pub fn display_text(&self, fallback: &str) -> String {
        match self {
            BookingError::Service {
                message: Some(message),
                ..
            } => format!("⚠️ {}", message),
            BookingError::Service { message: None, .. } => fallback.to_string(),
            BookingError::Transport(_) | BookingError::Parse(_) => {
                CONNECTION_ERROR_TEXT.to_string()
            }
            BookingError::Validation(fields) => {
                format!("⚠️ Required fields: {}", join_fields(fields))
            }
            BookingError::InvalidDate(date) => {
                format!("⚠️ Invalid date: {} (expected YYYY-MM-DD)", date)
            }
            BookingError::UnresolvedUser => UNRESOLVED_USER_TEXT.to_string(),
            BookingError::Config(_) => fallback.to_string(),
        }
    }
}

/// A trait for reading the HTTP status code behind an error.
pub trait HttpStatusCode {
    /// Returns the HTTP status the service answered with, if any.
    fn status_code(&self) -> Option<u16>;
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> Option<u16> {
        match self {
            BookingError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for BookingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BookingError::Parse(err.to_string())
        } else {
            BookingError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Parse(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BookingError {
    BookingError::Config(message.to_string())
}

pub fn validation_error(fields: Vec<FormField>) -> BookingError {
    BookingError::Validation(fields)
}
