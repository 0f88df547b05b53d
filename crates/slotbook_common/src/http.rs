// --- File: crates/slotbook_common/src/http.rs ---
//! Response checking shared by every call to the booking service.
//!
//! A call succeeds only through [`expect_status`] or [`read_json`]; any other
//! answer is turned into a [`BookingError`] here, so callers never inspect
//! status codes or error bodies themselves.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::BookingError;

// Include the client module
pub mod client;

/// Extracts the `error` field of a JSON body, if there is one.
pub fn error_field(body: &Value) -> Option<String> {
    match body.get("error") {
        Some(Value::String(message)) => Some(message.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

/// Converts a non-success response into a [`BookingError::Service`].
///
/// The body's `error` field becomes the message; bodies that are not JSON
/// leave the message empty so callers fall back to their generic text.
pub async fn error_from_response(response: Response) -> BookingError {
    let status = response.status().as_u16();
    let message = match response.text().await {
        Ok(text) => serde_json::from_str::<Value>(&text)
            .ok()
            .as_ref()
            .and_then(error_field),
        Err(_) => None,
    };
    warn!(status, message = ?message, "Booking service reported an error");
    BookingError::service(status, message)
}

/// Requires an exact status code and discards the body.
pub async fn expect_status(response: Response, expected: StatusCode) -> Result<(), BookingError> {
    if response.status() == expected {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

/// Reads a JSON body from a 2xx response.
///
/// A 2xx body that carries an `error` marker is treated as a service error
/// with that message. Bodies that fail to parse are transport-class
/// [`BookingError::Parse`] errors.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BookingError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    let status = response.status().as_u16();
    let text = response.text().await?;
    let value: Value = serde_json::from_str(&text)?;
    if let Some(message) = error_field(&value) {
        warn!(status, %message, "Booking service returned an error marker");
        return Err(BookingError::service(status, Some(message)));
    }
    Ok(serde_json::from_value(value)?)
}
